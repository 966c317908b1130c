use thiserror::Error;

#[derive(Debug, Error)]
pub enum DialogError {
    /// No device of the required kind is configured.
    #[error("no device of type {0}")]
    NoDevice(String),

    /// Compilation reached a stage with unresolved slots. A defect, never user-facing.
    #[error("program is incomplete: {0}")]
    IncompleteProgram(String),

    /// The intent lacks required fields, or is meaningless in the current state.
    #[error("malformed intent: {0}")]
    MalformedIntent(String),

    #[error("unknown function {0}")]
    UnknownFunction(String),

    /// The person named on a query is not in the contact book.
    #[error("unknown contact {0}")]
    UnknownContact(String),

    #[error("no semantic parser is configured")]
    NoParser,

    #[error("invalid intent JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("service failure: {0}")]
    Service(#[from] anyhow::Error),
}

pub type DialogResult<T> = Result<T, DialogError>;
