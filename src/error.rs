use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to read payload file {path}: {source}")]
    PayloadRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse payload file {path}: {source}")]
    PayloadParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Report payload must be a JSON object")]
    InvalidPayload,

    #[error("Invalid '{section}' section: {source}")]
    Section {
        section: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Font file not found: {0}")]
    FontNotFound(PathBuf),

    #[error("Template references '${0}' but no value was provided")]
    MissingTemplateKey(String),

    #[error("WeasyPrint not found. Install it with: pip install weasyprint")]
    RendererNotFound,

    #[error("Failed to render PDF: {0}")]
    RenderFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
