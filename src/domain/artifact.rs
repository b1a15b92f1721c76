//! Artifact descriptors exchanged with the artifact registry.

use std::{fmt, path::PathBuf, str::FromStr};

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// What kind of file an artifact is once persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Static image shown through `<img>`.
    #[default]
    Image,
    /// Standalone document shown through `<iframe>`.
    Interactive,
}

impl FromStr for ArtifactKind {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "image" => Ok(ArtifactKind::Image),
            "interactive" => Ok(ArtifactKind::Interactive),
            other => Err(DomainError::invalid_configuration(format!(
                "unknown artifact kind `{other}`"
            ))),
        }
    }
}

/// How a single figure is embedded into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingMode {
    #[default]
    Plain,
    Scrollable,
    Interactive,
}

impl EmbeddingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            EmbeddingMode::Plain => "plain",
            EmbeddingMode::Scrollable => "scrollable",
            EmbeddingMode::Interactive => "interactive",
        }
    }

    /// Kind of artifact the registry is expected to persist for this mode.
    pub fn artifact_kind(self) -> ArtifactKind {
        match self {
            EmbeddingMode::Plain | EmbeddingMode::Scrollable => ArtifactKind::Image,
            EmbeddingMode::Interactive => ArtifactKind::Interactive,
        }
    }
}

impl fmt::Display for EmbeddingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmbeddingMode {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "plain" => Ok(EmbeddingMode::Plain),
            "scrollable" => Ok(EmbeddingMode::Scrollable),
            "interactive" => Ok(EmbeddingMode::Interactive),
            other => Err(DomainError::invalid_configuration(format!(
                "unknown embedding mode `{other}`"
            ))),
        }
    }
}

/// Content handed to the registry for persistence. The compiler never looks inside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactSource {
    /// Already rendered bytes, stored under the given file extension.
    Bytes { data: Vec<u8>, extension: String },
    /// Existing file copied into the report.
    File(PathBuf),
}

impl ArtifactSource {
    pub fn svg(markup: impl Into<String>) -> Self {
        ArtifactSource::Bytes {
            data: markup.into().into_bytes(),
            extension: "svg".to_string(),
        }
    }

    pub fn html(document: impl Into<String>) -> Self {
        ArtifactSource::Bytes {
            data: document.into().into_bytes(),
            extension: "html".to_string(),
        }
    }

    /// File extension used for the persisted copy.
    pub fn extension(&self) -> &str {
        match self {
            ArtifactSource::Bytes { extension, .. } => extension.as_str(),
            ArtifactSource::File(path) => path
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or("bin"),
        }
    }
}
