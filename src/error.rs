#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Connectivity check failed: server answered {status}")]
    Connectivity { status: u16 },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Malformed posting: missing or invalid '{field}'")]
    Shape { field: String },

    #[error("Invalid parameter: {0}")]
    Parameter(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    pub(crate) fn shape(field: impl Into<String>) -> Self {
        AppError::Shape {
            field: field.into(),
        }
    }
}
