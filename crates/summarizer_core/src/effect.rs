use std::time::Duration;

use crate::{InputSource, NotificationId, SubmissionId, UploadRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the user for a document path.
    OpenFilePicker,
    /// POST the document to the summarize endpoint.
    Submit {
        submission_id: SubmissionId,
        source: InputSource,
        request: UploadRequest,
    },
    /// Bring the freshly rendered results into view.
    RevealResults,
    CopyToClipboard { text: String },
    DownloadReport { url: String },
    /// Deliver `Msg::NotificationExpired(id)` after the delay.
    ScheduleDismiss { id: NotificationId, after: Duration },
}
