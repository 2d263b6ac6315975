//! Summarizer core: pure upload/render state machine and view-model helpers.
mod analysis;
mod document;
mod effect;
mod msg;
mod notification;
mod state;
mod update;
mod view;
mod view_model;

pub use analysis::{AnalysisResult, DateEntry, Importance, SuggestedArticle, SummarizeResponse, Tier};
pub use document::{
    media_type_for_file_name, validate, UploadLimits, UploadRequest, ValidationError,
    ACCEPTED_MEDIA_TYPES, DEFAULT_MAX_UPLOAD_MB, MEDIA_TYPE_DOCX, MEDIA_TYPE_PDF, MEDIA_TYPE_TEXT,
    MEDIA_TYPE_UNKNOWN, MIB,
};
pub use effect::Effect;
pub use msg::{InputSource, Msg};
pub use notification::{
    Notification, NotificationId, NotificationKind, NOTIFICATION_TIMEOUT,
};
pub use state::{AppState, ControllerStage, SubmissionId, SubmissionPhase};
pub use update::{update, MSG_BUSY, MSG_COPIED, MSG_COPY_FAILED, MSG_NO_REPORT, MSG_PROCESSED};
pub use view::{present, View};
pub use view_model::{
    build_results, render_articles, render_dates, render_download, render_importance,
    render_summary, render_tabs, AppViewModel, ArticleRow, DownloadControl, ListRow,
    NotificationView, ResultsView, TierTab, ICON_CALENDAR, ICON_INFO, NO_ARTICLES, NO_DATES,
    NO_IMPORTANCE_DATA, NO_SUMMARY, NO_TIER_ITEMS,
};
