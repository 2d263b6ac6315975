use crate::{AnalysisResult, NotificationId, SubmissionId, Tier, UploadRequest};

/// Where a chosen document came from. All sources share one submission path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Picker,
    DragDrop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User activated the upload area or button.
    BrowseClicked,
    /// A document was chosen through any input method.
    FileChosen {
        source: InputSource,
        request: UploadRequest,
    },
    /// The chosen path could not be read from disk.
    FileUnreadable { path: String, reason: String },
    /// The summarize request resolved. `Err` carries the user-facing message.
    SummarizeFinished {
        submission_id: SubmissionId,
        result: Result<AnalysisResult, String>,
    },
    /// User selected an importance tab.
    TierSelected(Tier),
    CopySummaryClicked,
    /// Clipboard write finished; `Err` carries the reason for the log.
    ClipboardFinished(Result<(), String>),
    DownloadClicked,
    /// Report download finished with the saved path or a reason.
    ReportSaved(Result<String, String>),
    NotificationExpired(NotificationId),
}
