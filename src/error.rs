use thiserror::Error;

#[derive(Error, Debug)]
pub enum DemocracyError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Timestamp Parsing Error: {0}")]
    Timestamp(#[from] chrono::ParseError),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Validation Error: event #{index} ('{article_id}'): {reason}")]
    Validation {
        index: usize,
        article_id: String,
        reason: String,
    },

    #[error("History Source Unavailable: {0}")]
    SourceUnavailable(String),
}

pub type DsResult<T> = Result<T, DemocracyError>;
