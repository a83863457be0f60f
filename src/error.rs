use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("{field} must be positive")]
    NonPositive { field: String },

    #[error("contact name is required")]
    NameRequired,

    #[error("label not found: {name}")]
    LabelNotFound { name: String },

    #[error("label already exists: {name}")]
    LabelAlreadyExists { name: String },

    #[error("API request failed: {0}")]
    Api(String),

    #[error("page request failed after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type ReportResult<T> = Result<T, ReportError>;
