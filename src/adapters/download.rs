//! Filesystem report sink.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::ports::ReportSink;

/// Writes downloaded reports into a fixed directory.
#[derive(Debug, Clone)]
pub struct FsReportSink {
    dir: PathBuf,
}

impl FsReportSink {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ReportSink for FsReportSink {
    type Error = io::Error;

    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, Self::Error> {
        fs::create_dir_all(&self.dir)?;

        // Write beside the target and rename so a reader never sees a half-written PDF.
        let target = self.dir.join(file_name);
        let partial = self.dir.join(format!(".{file_name}.part"));
        fs::write(&partial, bytes)?;
        fs::rename(&partial, &target)?;

        tracing::info!(size = bytes.len(), path = %target.display(), "Report saved");
        Ok(target)
    }
}
