use std::time::Duration;

/// How long a notification stays visible.
pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(5);

pub type NotificationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Error,
    Success,
}

impl NotificationKind {
    pub fn icon(self) -> &'static str {
        match self {
            NotificationKind::Error => "exclamation-circle",
            NotificationKind::Success => "check-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
}
