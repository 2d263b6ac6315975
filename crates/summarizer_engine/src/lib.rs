//! Summarizer engine: HTTP client, report persistence and effect execution.
mod client;
mod engine;
mod persist;
mod types;

pub use client::{
    interpret_response, report_file_name, ClientSettings, ReqwestClient, SummarizeClient,
    DEFAULT_BASE_URL, DEFAULT_ENDPOINT, DOCUMENT_FIELD,
};
pub use engine::{EngineEvents, EngineHandle};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{
    EngineEvent, FailureKind, ReportFile, RequestError, MSG_MALFORMED, MSG_NO_DATA, MSG_REJECTED,
    MSG_TRANSPORT,
};
