//! Persistence of figure artifacts referenced by the report.

use std::{fs, io, path::PathBuf};

use tracing::debug;

use crate::domain::artifact::ArtifactSource;

use super::error::InfraError;

/// Persists one artifact into the slot it was assigned and returns the
/// document-relative reference to embed in markup.
pub trait ArtifactRegistry {
    fn render_artifact(&mut self, slot: usize, source: &ArtifactSource)
    -> Result<String, InfraError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteMode {
    Persist,
    Plan,
}

/// Stores artifacts as `<root>/<plots_dir>/plot_{slot}.{ext}`.
#[derive(Debug, Clone)]
pub struct FsArtifactRegistry {
    root: PathBuf,
    plots_dir: String,
    mode: WriteMode,
}

impl FsArtifactRegistry {
    pub fn new(root: impl Into<PathBuf>, plots_dir: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            plots_dir: plots_dir.into(),
            mode: WriteMode::Persist,
        }
    }

    /// Registry that resolves references and checks sources exist without writing anything.
    pub fn planning(root: impl Into<PathBuf>, plots_dir: impl Into<String>) -> Self {
        Self {
            mode: WriteMode::Plan,
            ..Self::new(root, plots_dir)
        }
    }

    fn reference(&self, slot: usize, source: &ArtifactSource) -> String {
        let file_name = format!("plot_{slot}.{}", source.extension());
        let plots_dir = self.plots_dir.trim_matches('/');
        if plots_dir.is_empty() {
            file_name
        } else {
            format!("{plots_dir}/{file_name}")
        }
    }
}

impl ArtifactRegistry for FsArtifactRegistry {
    fn render_artifact(
        &mut self,
        slot: usize,
        source: &ArtifactSource,
    ) -> Result<String, InfraError> {
        let reference = self.reference(slot, source);
        let destination = self.root.join(&reference);

        match (self.mode, source) {
            (WriteMode::Plan, ArtifactSource::Bytes { .. }) => {}
            (WriteMode::Plan, ArtifactSource::File(path)) => {
                if !path.is_file() {
                    return Err(InfraError::resource(
                        path,
                        io::Error::new(io::ErrorKind::NotFound, "artifact source not found"),
                    ));
                }
            }
            (WriteMode::Persist, _) => {
                if let Some(parent) = destination.parent() {
                    fs::create_dir_all(parent).map_err(|err| InfraError::resource(parent, err))?;
                }
                match source {
                    ArtifactSource::Bytes { data, .. } => fs::write(&destination, data)
                        .map_err(|err| InfraError::resource(&destination, err))?,
                    ArtifactSource::File(path) => {
                        fs::copy(path, &destination)
                            .map_err(|err| InfraError::resource(path, err))?;
                    }
                }
            }
        }

        debug!(
            target = "infra::artifacts",
            op = "artifact::render",
            slot,
            reference = %reference,
            planned = self.mode == WriteMode::Plan,
            "Artifact registered"
        );
        Ok(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persists_bytes_under_slot_name() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut registry = FsArtifactRegistry::new(dir.path(), "plots");

        let reference = registry
            .render_artifact(7, &ArtifactSource::svg("<svg></svg>"))
            .expect("artifact persisted");

        assert_eq!(reference, "plots/plot_7.svg");
        let stored = fs::read_to_string(dir.path().join("plots/plot_7.svg")).expect("stored");
        assert_eq!(stored, "<svg></svg>");
    }

    #[test]
    fn copies_file_sources() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source_path = dir.path().join("loss.png");
        fs::write(&source_path, [0x89, b'P', b'N', b'G']).expect("source file");

        let mut registry = FsArtifactRegistry::new(dir.path().join("report"), "plots");
        let reference = registry
            .render_artifact(0, &ArtifactSource::File(source_path))
            .expect("artifact copied");

        assert_eq!(reference, "plots/plot_0.png");
        assert!(dir.path().join("report/plots/plot_0.png").is_file());
    }

    #[test]
    fn planning_mode_writes_nothing_but_checks_sources() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut registry = FsArtifactRegistry::planning(dir.path().join("report"), "plots");

        let reference = registry
            .render_artifact(3, &ArtifactSource::html("<html></html>"))
            .expect("planned");
        assert_eq!(reference, "plots/plot_3.html");
        assert!(!dir.path().join("report").exists());

        let missing = ArtifactSource::File(dir.path().join("missing.svg"));
        let err = registry
            .render_artifact(4, &missing)
            .expect_err("missing source");
        assert!(matches!(err, InfraError::Resource { .. }));
    }
}
