use thiserror::Error;

/// Errors raised while acquiring and normalizing application metrics.
///
/// Identifier errors are recovered where they happen (the entity is dropped).
/// Query errors abort a single metric kind for one acquisition cycle.
#[derive(Error, Debug)]
pub enum MetricError {
    /// The raw identifier does not follow the expected grammar
    #[error("Malformed identifier '{identifier}': {reason}")]
    MalformedIdentifier { identifier: String, reason: String },

    /// The backend reported the service identifier as "unknown"
    #[error("Unknown identifier")]
    UnknownIdentifier,

    /// The backend answered with an error envelope
    #[error("Backend error ({error_type}): {message}")]
    BackendError { error_type: String, message: String },

    /// The backend answered with something other than an instant vector
    #[error("Unexpected result type: {0} Vs. vector")]
    UnexpectedResultType(String),

    /// Network failure, timeout or client construction failure
    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    /// The backend answered with a non-success HTTP status
    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// Structurally invalid JSON
    #[error("Decode error: {0}")]
    DecodeError(#[from] serde_json::Error),

    /// Every fetch of a fan-out failed
    #[error("Not able to get {0}")]
    AllFetchesFailed(String),

    /// A spawned acquisition task panicked or was cancelled
    #[error("Acquisition task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),

    /// Invalid backend address or query parameter
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl MetricError {
    pub fn malformed(identifier: &str, reason: impl Into<String>) -> Self {
        MetricError::MalformedIdentifier {
            identifier: identifier.to_string(),
            reason: reason.into(),
        }
    }

    /// Identifier level errors never leave the merge step.
    pub fn is_identifier_error(&self) -> bool {
        matches!(
            self,
            MetricError::MalformedIdentifier { .. } | MetricError::UnknownIdentifier
        )
    }
}
