use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum HarvestError {
    #[error("granule search returned status {status}: {body}")]
    Search { status: u16, body: String },

    #[error("catalog request failed: {0}")]
    CatalogHttp(String),

    #[error("catalog returned status {status}: {message}")]
    CatalogStatus { status: u16, message: String },

    #[error("malformed collection entry: {0}")]
    CollectionParse(String),

    #[error("malformed granule page: {0}")]
    GranulePage(String),

    #[error("failed to carry continuation token: {0}")]
    ContinuationToken(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}
