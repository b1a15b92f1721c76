use thiserror::Error;

use crate::{
    application::manifest::ManifestError, domain::error::DomainError, infra::error::InfraError,
    presentation::views::TemplateRenderError,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Template(#[from] TemplateRenderError),
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    #[error("failed to encode script data: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Short machine-friendly label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Domain(DomainError::InvalidConfiguration { .. }) => "invalid_configuration",
            AppError::Domain(DomainError::UnknownInstruction { .. }) => "unknown_instruction",
            AppError::Infra(InfraError::Resource { .. }) => "resource",
            AppError::Infra(InfraError::Telemetry(_)) => "telemetry",
            AppError::Template(_) => "template",
            AppError::Manifest(_) => "manifest",
            AppError::Encoding(_) => "encoding",
            AppError::Unexpected(_) => "unexpected",
        }
    }

    pub fn is_resource_error(&self) -> bool {
        matches!(self, AppError::Infra(InfraError::Resource { .. }))
    }
}
