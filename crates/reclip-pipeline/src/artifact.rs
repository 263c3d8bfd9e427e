//! Fabricated export artifacts.
//!
//! Processing is simulated, so output sizes and download locations are
//! made up here with the shapes real renders would have.

use rand::Rng;

use reclip_models::{ExportFormat, JobId};

/// Base URL for fabricated download links.
pub const DOWNLOAD_BASE_URL: &str = "https://downloads.reclip.app";

/// A plausible output size between 5 and 25 MB, e.g. `"12.4 MB"`.
pub fn fabricate_file_size() -> String {
    let mut rng = rand::rng();
    format!("{:.1} MB", 5.0 + rng.random::<f64>() * 20.0)
}

/// Download URL for a finished job, keyed by job id and container.
pub fn download_url(job_id: &JobId, format: ExportFormat) -> String {
    format!("{}/{}.{}", DOWNLOAD_BASE_URL, job_id, format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_size_shape_and_range() {
        for _ in 0..50 {
            let size = fabricate_file_size();
            let mb: f64 = size.strip_suffix(" MB").unwrap().parse().unwrap();
            assert!((5.0..25.1).contains(&mb), "out of range: {}", size);
        }
    }

    #[test]
    fn test_download_url_uses_format_extension() {
        let id = JobId::from_string("export-clip-2-1700000000000");
        assert_eq!(
            download_url(&id, ExportFormat::Mov),
            "https://downloads.reclip.app/export-clip-2-1700000000000.mov"
        );
    }
}
