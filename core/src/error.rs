use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("section {section} incomplete: missing {}", .missing.join(", "))]
    SectionIncomplete { section: u8, missing: Vec<String> },

    #[error("workflow transition refused: {0}")]
    WorkflowTransition(String),

    #[error("submission already in flight")]
    SubmissionInFlight,

    #[error("submission failed: {0}")]
    SubmissionFailed(String),

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
