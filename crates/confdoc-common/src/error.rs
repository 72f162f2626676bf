use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfdocError {
    #[error("XML parse error: {0}")]
    Xml(String),

    #[error("Unexpected document structure: {0}")]
    Structure(String),

    #[error("Paper {paper} is missing required field `{field}`")]
    Schema { paper: usize, field: &'static str },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConfdocError {
    /// True for failures of the raw input's shape, as opposed to field-level problems.
    pub fn is_structural(&self) -> bool {
        matches!(self, ConfdocError::Xml(_) | ConfdocError::Structure(_))
    }
}

pub type Result<T> = std::result::Result<T, ConfdocError>;
