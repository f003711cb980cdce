//! Report sink port: where a downloaded report is delivered.

use std::path::PathBuf;

/// Fixed file name for downloaded reports.
pub const REPORT_FILE_NAME: &str = "readmission_report.pdf";

/// Destination for binary report downloads.
pub trait ReportSink: Send + Sync {
    /// Error type for sink operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Store `bytes` under `file_name`, replacing any earlier file of that name.
    ///
    /// # Returns
    /// The location the report was written to.
    ///
    /// # Errors
    /// Returns error if the report cannot be written.
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, Self::Error>;
}
