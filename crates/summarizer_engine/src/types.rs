use std::fmt;
use std::path::PathBuf;

use summarizer_core::{AnalysisResult, SubmissionId};
use thiserror::Error;

pub const MSG_TRANSPORT: &str =
    "An error occurred while processing the document. Please try again.";
pub const MSG_REJECTED: &str = "Failed to process document";
pub const MSG_NO_DATA: &str = "No data received from server";
pub const MSG_MALFORMED: &str = "Invalid response from server";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SummarizeCompleted {
        submission_id: SubmissionId,
        result: Result<AnalysisResult, RequestError>,
    },
    ReportCompleted {
        url: String,
        result: Result<PathBuf, String>,
    },
}

/// Failure of one request; `message` is fit to show the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RequestError {
    pub kind: FailureKind,
    pub message: String,
    /// Technical detail for the log.
    pub detail: Option<String>,
}

impl RequestError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    pub(crate) fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    /// The request could not be assembled from the document.
    InvalidRequest,
    Network,
    Timeout,
    HttpStatus(u16),
    /// 2xx response with `success: false`.
    Rejected,
    /// `success: true` without a `data` payload.
    MissingData,
    MalformedResponse,
    TooLarge { max_bytes: u64, actual: Option<u64> },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::InvalidRequest => write!(f, "invalid request"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Rejected => write!(f, "rejected by server"),
            FailureKind::MissingData => write!(f, "missing data"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
        }
    }
}

/// A downloaded report, not yet written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}
