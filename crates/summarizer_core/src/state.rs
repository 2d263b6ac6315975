use std::time::Duration;

use crate::view_model::{self, AppViewModel};
use crate::{
    AnalysisResult, Effect, Notification, NotificationId, NotificationKind, Tier, UploadLimits,
    NOTIFICATION_TIMEOUT,
};

pub type SubmissionId = u64;

/// Whether a request is in flight. At most one may be outstanding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting {
        submission_id: SubmissionId,
        file_name: String,
    },
}

/// Coarse lifecycle stage as the user sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerStage {
    #[default]
    Idle,
    Submitting,
    Displaying,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    limits: UploadLimits,
    notification_timeout: Duration,
    phase: SubmissionPhase,
    current: Option<AnalysisResult>,
    selected_tier: Tier,
    notification: Option<Notification>,
    next_submission_id: SubmissionId,
    next_notification_id: NotificationId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(UploadLimits::default(), NOTIFICATION_TIMEOUT)
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(limits: UploadLimits, notification_timeout: Duration) -> Self {
        Self {
            limits,
            notification_timeout,
            phase: SubmissionPhase::Idle,
            current: None,
            selected_tier: Tier::High,
            notification: None,
            next_submission_id: 0,
            next_notification_id: 0,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        view_model::build(self)
    }

    pub fn limits(&self) -> &UploadLimits {
        &self.limits
    }

    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    pub fn stage(&self) -> ControllerStage {
        match (&self.phase, &self.current) {
            (SubmissionPhase::Submitting { .. }, _) => ControllerStage::Submitting,
            (SubmissionPhase::Idle, Some(_)) => ControllerStage::Displaying,
            (SubmissionPhase::Idle, None) => ControllerStage::Idle,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, SubmissionPhase::Submitting { .. })
    }

    pub fn current(&self) -> Option<&AnalysisResult> {
        self.current.as_ref()
    }

    pub fn selected_tier(&self) -> Tier {
        self.selected_tier
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin_submission(&mut self, file_name: String) -> SubmissionId {
        self.next_submission_id += 1;
        let submission_id = self.next_submission_id;
        self.phase = SubmissionPhase::Submitting {
            submission_id,
            file_name,
        };
        self.dirty = true;
        submission_id
    }

    /// Leaves `Submitting` if `submission_id` is the one in flight.
    pub(crate) fn finish_submission(&mut self, submission_id: SubmissionId) -> bool {
        match &self.phase {
            SubmissionPhase::Submitting {
                submission_id: active,
                ..
            } if *active == submission_id => {
                self.phase = SubmissionPhase::Idle;
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn replace_result(&mut self, result: AnalysisResult) {
        self.current = Some(result);
        self.selected_tier = Tier::High;
        self.dirty = true;
    }

    pub(crate) fn select_tier(&mut self, tier: Tier) {
        if self.selected_tier != tier {
            self.selected_tier = tier;
            self.dirty = true;
        }
    }

    /// Replaces the visible notification and schedules its dismissal.
    pub(crate) fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) -> Effect {
        self.next_notification_id += 1;
        let id = self.next_notification_id;
        self.notification = Some(Notification {
            id,
            kind,
            message: message.into(),
        });
        self.dirty = true;
        Effect::ScheduleDismiss {
            id,
            after: self.notification_timeout,
        }
    }

    /// Dismisses the notification only if it is still the one with `id`.
    pub(crate) fn dismiss(&mut self, id: NotificationId) {
        if self.notification.as_ref().is_some_and(|n| n.id == id) {
            self.notification = None;
            self.dirty = true;
        }
    }
}
