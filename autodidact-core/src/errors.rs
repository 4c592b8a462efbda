use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("not found: {0}")]
    NotFound(&'static str),
    #[error("invalid input: {0}")]
    Invalid(&'static str),
    #[error("malformed {what}: {detail}")]
    Malformed { what: &'static str, detail: String },
    #[error("storage error: {0}")]
    Storage(&'static str),
}

impl CoreError {
    pub fn malformed(what: &'static str, err: impl std::fmt::Display) -> Self {
        CoreError::Malformed {
            what,
            detail: err.to_string(),
        }
    }
}
