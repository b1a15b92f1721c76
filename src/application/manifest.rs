//! Declarative report manifests.
//!
//! A manifest is a TOML document with an optional `title` and an ordered list
//! of `[[instruction]]` tables. Applying it replays every entry against a
//! [`ReportSession`] in file order.
//!
//! ```toml
//! title = "Training run"
//!
//! [[instruction]]
//! kind = "title"
//! text = "Loss curves"
//!
//! [[instruction]]
//! kind = "stacker"
//! layout = "two"
//!
//! [[instruction]]
//! kind = "figure"
//! path = "figures/loss.svg"
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    application::{error::AppError, session::ReportSession},
    domain::{
        artifact::{ArtifactKind, ArtifactSource, EmbeddingMode},
        error::DomainError,
        instruction::{Placement, RenderUnit},
    },
    infra::artifacts::ArtifactRegistry,
};

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportManifest {
    pub title: Option<String>,
    #[serde(default, rename = "instruction")]
    pub instructions: Vec<ManifestEntry>,
}

/// One `[[instruction]]` table. Which fields are required depends on `kind`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestEntry {
    pub kind: String,
    pub text: Option<String>,
    pub markup: Option<String>,
    pub script: Option<String>,
    pub placement: Option<Placement>,
    pub layout: Option<String>,
    pub path: Option<PathBuf>,
    pub embedding: Option<String>,
    #[serde(default)]
    pub paths: Vec<PathBuf>,
    pub artifact: Option<String>,
}

impl ReportManifest {
    pub fn from_toml(input: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let input = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&input)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Replay every entry against `session`. Relative artifact paths are
    /// resolved against `base_dir`.
    ///
    /// Stops at the first invalid entry and drops every instruction this call
    /// queued, so a later compile never emits a partially applied manifest.
    pub fn apply<R>(
        &self,
        session: &mut ReportSession,
        registry: &mut R,
        base_dir: &Path,
    ) -> Result<(), AppError>
    where
        R: ArtifactRegistry + ?Sized,
    {
        let queued_before = session.len();
        for (index, entry) in self.instructions.iter().enumerate() {
            if let Err(err) = entry.apply(index, session, registry, base_dir) {
                session.truncate(queued_before);
                debug!(
                    target = "application::manifest",
                    op = "manifest::apply",
                    result = "error",
                    entry = index,
                    kind = err.kind(),
                    "Manifest rolled back"
                );
                return Err(err);
            }
        }
        debug!(
            target = "application::manifest",
            op = "manifest::apply",
            entries = self.instructions.len(),
            queued = session.len(),
            "Manifest applied"
        );
        Ok(())
    }
}

impl ManifestEntry {
    fn apply<R>(
        &self,
        index: usize,
        session: &mut ReportSession,
        registry: &mut R,
        base_dir: &Path,
    ) -> Result<(), AppError>
    where
        R: ArtifactRegistry + ?Sized,
    {
        match self.kind.as_str() {
            "title" => session.title(self.required_text(index, "text", &self.text)?),
            "subtitle" => session.subtitle(self.required_text(index, "text", &self.text)?),
            "comment" => session.comment(self.required_text(index, "text", &self.text)?),
            "rule" => session.rule(),
            "html" => {
                let markup = self.required_text(index, "markup", &self.markup)?;
                let mut unit = RenderUnit::new(markup, self.placement.unwrap_or_default())?;
                if let Some(script) = &self.script {
                    unit = unit.with_script(script.as_str());
                }
                session.html(unit);
            }
            "stacker" => session.stacker(self.required_text(index, "layout", &self.layout)?)?,
            "figure" => {
                let path = self
                    .path
                    .as_deref()
                    .ok_or_else(|| missing_field(index, &self.kind, "path"))?;
                let mode = match &self.embedding {
                    Some(name) => name.parse::<EmbeddingMode>()?,
                    None => EmbeddingMode::default(),
                };
                let source = ArtifactSource::File(base_dir.join(path));
                session.figure(registry, &source, mode)?;
            }
            "slider" => {
                if self.paths.is_empty() {
                    return Err(missing_field(index, &self.kind, "paths").into());
                }
                let kind = match &self.artifact {
                    Some(name) => name.parse::<ArtifactKind>()?,
                    None => ArtifactKind::default(),
                };
                let sources: Vec<_> = self
                    .paths
                    .iter()
                    .map(|path| ArtifactSource::File(base_dir.join(path)))
                    .collect();
                session.slider(registry, &sources, kind)?;
            }
            other => return Err(DomainError::unknown_instruction(other).into()),
        }
        Ok(())
    }

    fn required_text<'a>(
        &self,
        index: usize,
        field: &str,
        value: &'a Option<String>,
    ) -> Result<&'a str, DomainError> {
        value
            .as_deref()
            .ok_or_else(|| missing_field(index, &self.kind, field))
    }
}

fn missing_field(index: usize, kind: &str, field: &str) -> DomainError {
    DomainError::invalid_configuration(format!(
        "instruction #{index} (`{kind}`) is missing `{field}`"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::instruction::Instruction, infra::error::InfraError};

    #[derive(Default)]
    struct RecordingRegistry {
        sources: Vec<ArtifactSource>,
    }

    impl ArtifactRegistry for RecordingRegistry {
        fn render_artifact(
            &mut self,
            slot: usize,
            source: &ArtifactSource,
        ) -> Result<String, InfraError> {
            self.sources.push(source.clone());
            Ok(format!("plots/plot_{slot}.{}", source.extension()))
        }
    }

    fn apply(input: &str) -> Result<(ReportSession, RecordingRegistry), AppError> {
        let manifest = ReportManifest::from_toml(input)?;
        let mut session = ReportSession::new();
        let mut registry = RecordingRegistry::default();
        manifest.apply(&mut session, &mut registry, Path::new("/data/run"))?;
        Ok((session, registry))
    }

    #[test]
    fn entries_replay_in_file_order() {
        let (session, registry) = apply(
            r#"
title = "ignored here"

[[instruction]]
kind = "title"
text = "Report"

[[instruction]]
kind = "rule"

[[instruction]]
kind = "stacker"
layout = "two"

[[instruction]]
kind = "figure"
path = "loss.svg"

[[instruction]]
kind = "slider"
paths = ["a.svg", "b.svg"]

[[instruction]]
kind = "html"
markup = "<em>done</em>"
placement = "block"
script = "done();"
"#,
        )
        .expect("manifest applies");

        let kinds: Vec<_> = session.instructions().iter().map(Instruction::kind).collect();
        assert_eq!(kinds, ["unit", "unit", "directive", "unit", "unit", "unit"]);
        assert_eq!(session.next_slot(), 3);
        assert_eq!(
            registry.sources[0],
            ArtifactSource::File(PathBuf::from("/data/run/loss.svg"))
        );

        let Some(Instruction::Unit(last)) = session.instructions().last() else {
            panic!("expected html unit last");
        };
        assert_eq!(last.placement(), Placement::Block);
        assert_eq!(last.script(), Some("done();"));
    }

    #[test]
    fn failed_apply_drops_entries_it_queued() {
        let manifest = ReportManifest::from_toml(
            "[[instruction]]\nkind = \"title\"\ntext = \"Stale\"\n\n\
             [[instruction]]\nkind = \"figure\"\npath = \"a.svg\"\n\n\
             [[instruction]]\nkind = \"bogus\"\n",
        )
        .expect("manifest parses");
        let mut session = ReportSession::new();
        let mut registry = RecordingRegistry::default();
        session.rule();

        let err = manifest
            .apply(&mut session, &mut registry, Path::new("/data/run"))
            .expect_err("unknown kind");

        assert_eq!(err.kind(), "unknown_instruction");
        assert_eq!(session.len(), 1, "only the pre-existing rule stays queued");
        assert_eq!(session.next_slot(), 1, "slots stay reserved");
    }

    #[test]
    fn unknown_kind_is_unknown_instruction() {
        let err = apply("[[instruction]]\nkind = \"chart\"\n")
            .err()
            .expect("unknown kind");
        assert!(matches!(
            err,
            AppError::Domain(DomainError::UnknownInstruction { ref kind }) if kind == "chart"
        ));
    }

    #[test]
    fn missing_field_names_entry_and_field() {
        let err = apply("[[instruction]]\nkind = \"rule\"\n\n[[instruction]]\nkind = \"comment\"\n")
            .err()
            .expect("missing text");
        assert_eq!(err.kind(), "invalid_configuration");
        let message = err.to_string();
        assert!(message.contains("#1"), "{message}");
        assert!(message.contains("`text`"), "{message}");
    }

    #[test]
    fn empty_slider_paths_are_rejected() {
        let err = apply("[[instruction]]\nkind = \"slider\"\npaths = []\n")
            .err()
            .expect("empty slider");
        assert!(err.to_string().contains("`paths`"));
    }

    #[test]
    fn unknown_embedding_is_invalid_configuration() {
        let err = apply("[[instruction]]\nkind = \"figure\"\npath = \"a.svg\"\nembedding = \"boxed\"\n")
            .err()
            .expect("bad embedding");
        assert_eq!(err.kind(), "invalid_configuration");
    }

    #[test]
    fn syntax_errors_surface_as_manifest_errors() {
        let err = ReportManifest::from_toml("[[instruction]\nkind = ").expect_err("bad toml");
        assert!(matches!(err, ManifestError::Parse(_)));
    }

    #[test]
    fn missing_manifest_file_is_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = ReportManifest::load(&dir.path().join("absent.toml")).expect_err("missing");
        assert!(matches!(err, ManifestError::Read { .. }));
    }
}
