use thiserror::Error;
use uuid::Uuid;

/// Error type shared by the ledger services, import validator and record stores.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Invalid import payload: {0}")]
    Format(String),
    #[error("Record store unavailable: {0}")]
    Store(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl TrackerError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        TrackerError::Validation(message.into())
    }

    /// True for failures of the backing medium rather than of the caller's input.
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            TrackerError::Store(_) | TrackerError::Io(_) | TrackerError::Serde(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_and_serde_failures_are_store_class() {
        let io = TrackerError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert!(io.is_store_failure());
        assert!(TrackerError::Store("gone".into()).is_store_failure());
        assert!(!TrackerError::validation("bad amount").is_store_failure());
        assert!(!TrackerError::Format("not an array".into()).is_store_failure());
    }
}
