use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::debug;

use super::error::InfraError;

/// Writes the compiled document to its fixed destination, replacing any previous version.
///
/// The document is staged in a temporary file next to the destination and
/// persisted with a rename, so readers never observe a half-written report and
/// the staging file is removed whenever a step fails.
#[derive(Debug, Clone)]
pub struct DocumentWriter {
    path: PathBuf,
}

impl DocumentWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, html: &str) -> Result<(), InfraError> {
        let parent = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        fs::create_dir_all(parent).map_err(|err| InfraError::resource(parent, err))?;

        let mut staged =
            NamedTempFile::new_in(parent).map_err(|err| InfraError::resource(parent, err))?;
        staged
            .write_all(html.as_bytes())
            .map_err(|err| InfraError::resource(staged.path(), err))?;
        staged
            .persist(&self.path)
            .map_err(|err| InfraError::resource(&self.path, err.error))?;

        debug!(
            target = "infra::output",
            op = "document::write",
            path = %self.path.display(),
            bytes = html.len(),
            "Report document written"
        );
        Ok(())
    }
}
