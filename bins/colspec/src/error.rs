use colspec_core::{ColumnError, TypeError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("config ({context}): {detail}")]
    Config { context: &'static str, detail: String },

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{}: {}", .0.kind(), .0)]
    Column(#[from] ColumnError),
}

impl From<TypeError> for CliError {
    fn from(e: TypeError) -> Self {
        CliError::Column(ColumnError::Type(e))
    }
}
