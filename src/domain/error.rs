use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },
    #[error("unknown instruction `{kind}`")]
    UnknownInstruction { kind: String },
}

impl DomainError {
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    pub fn unknown_instruction(kind: impl Into<String>) -> Self {
        Self::UnknownInstruction { kind: kind.into() }
    }
}
