//! Saving downloaded reports to disk.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot use {dir:?} for reports: {reason}")]
    DownloadDir { dir: PathBuf, reason: String },
    #[error("could not save report: {0}")]
    Io(#[from] io::Error),
}

/// Creates the download directory when missing. An existing non-directory
/// at that path is an error.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    let unusable = |reason: String| PersistError::DownloadDir {
        dir: dir.to_path_buf(),
        reason,
    };
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(unusable("not a directory".to_string())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|err| unusable(err.to_string()))
        }
        Err(err) => Err(unusable(err.to_string())),
    }
}

/// Saves reports into one download directory.
///
/// A report is written to a temp file beside its target and renamed into
/// place, so an interrupted download never leaves a truncated PDF under the
/// report's name. Saving the same name again replaces the earlier copy.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Blocking; returns the saved path.
    pub fn write(&self, report_name: &str, bytes: &[u8]) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(bytes)?;
        staged.as_file_mut().sync_all()?;

        let target = self.dir.join(report_name);
        if target.exists() {
            fs::remove_file(&target)?;
        }
        staged.persist(&target).map_err(|err| err.error)?;
        Ok(target)
    }
}
