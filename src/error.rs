//! Error types for graph operation parsing, submission and command execution.
//!
//! Only parse-time and submission-time failures are errors. Everything that
//! happens after a request is accepted (timeouts, failed cancellation, remote
//! failures) is reported as data by the tracker and the reporter.

use thiserror::Error;

/// Malformed path expression (`Type[/Type...]:id[,id...]`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Missing ':' between type path and ids in '{0}'")]
    MissingSeparator(String),

    #[error("Empty type path in '{0}'")]
    EmptyPath(String),

    #[error("Empty segment in type path '{0}'")]
    EmptySegment(String),

    #[error("Type path must not start with '/': '{0}'")]
    LeadingSlash(String),

    #[error("Type segment must not contain '+': '{0}'")]
    PlusInSegment(String),

    #[error("Type segment must not contain whitespace: '{0}'")]
    WhitespaceInSegment(String),

    #[error("Invalid object id '{id}' in '{token}'")]
    InvalidId { id: String, token: String },
}

/// The remote service refused a composite request outright.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Graph service unavailable: {0}")]
    Unavailable(String),
}

/// Command-level errors surfaced to the CLI.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Submission failed: {0}")]
    Submission(#[from] SubmissionError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for GraphError {
    fn from(err: config::ConfigError) -> Self {
        GraphError::ConfigError(err.to_string())
    }
}
