use thiserror::Error;

/// Errors raised by the import pipeline and grid builder.
///
/// All variants are raised synchronously to the immediate caller and none
/// are retried internally; re-fetching or re-selecting is the caller's
/// decision.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Bytes are not valid compressed/text/JSON data.
    #[error("Format error: {0}")]
    Format(String),

    /// Content is an HTML document, implying the wrong resource was fetched.
    #[error("Content looks like a web page, not a league export")]
    WebPage,

    /// JSON parsed but lacks a recognizable league shape.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Not enough teams/players to build a valid grid.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Input exceeds the configured size ceiling.
    #[error("Input too large: {size} bytes (limit {limit})")]
    TooLarge { size: usize, limit: usize },
}

impl ImportError {
    /// Stable kind tag for collaborators across the API boundary.
    pub fn kind(&self) -> &'static str {
        match self {
            ImportError::Format(_) => "format",
            ImportError::WebPage => "web_page",
            ImportError::Schema(_) => "schema",
            ImportError::InsufficientData(_) => "insufficient_data",
            ImportError::TooLarge { .. } => "too_large",
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
