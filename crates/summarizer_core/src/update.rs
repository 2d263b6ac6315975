use crate::{validate, AppState, Effect, InputSource, Msg, NotificationKind, UploadRequest};

pub const MSG_BUSY: &str = "A document is already being processed";
pub const MSG_PROCESSED: &str = "Document processed successfully";
pub const MSG_COPIED: &str = "Summary copied to clipboard!";
pub const MSG_COPY_FAILED: &str = "Failed to copy summary";
pub const MSG_NO_REPORT: &str = "No report available for download";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::BrowseClicked => {
            if state.is_submitting() {
                Vec::new()
            } else {
                vec![Effect::OpenFilePicker]
            }
        }
        Msg::FileChosen { source, request } => submit(&mut state, source, request),
        Msg::FileUnreadable { path, reason } => vec![state.notify(
            NotificationKind::Error,
            format!("Could not read {path}: {reason}"),
        )],
        Msg::SummarizeFinished {
            submission_id,
            result,
        } => {
            // Completions for anything but the in-flight request are stale.
            if !state.finish_submission(submission_id) {
                return (state, Vec::new());
            }
            match result {
                Ok(analysis) => {
                    state.replace_result(analysis);
                    vec![
                        Effect::RevealResults,
                        state.notify(NotificationKind::Success, MSG_PROCESSED),
                    ]
                }
                Err(message) => vec![state.notify(NotificationKind::Error, message)],
            }
        }
        Msg::TierSelected(tier) => {
            state.select_tier(tier);
            Vec::new()
        }
        Msg::CopySummaryClicked => match state.current() {
            Some(result) => vec![Effect::CopyToClipboard {
                text: crate::render_summary(result),
            }],
            None => vec![state.notify(NotificationKind::Error, MSG_COPY_FAILED)],
        },
        Msg::ClipboardFinished(Ok(())) => {
            vec![state.notify(NotificationKind::Success, MSG_COPIED)]
        }
        Msg::ClipboardFinished(Err(_)) => {
            vec![state.notify(NotificationKind::Error, MSG_COPY_FAILED)]
        }
        Msg::DownloadClicked => {
            let url = state
                .current()
                .and_then(|result| crate::render_download(result.report_url.as_deref()).url);
            match url {
                Some(url) => vec![Effect::DownloadReport { url }],
                None => vec![state.notify(NotificationKind::Error, MSG_NO_REPORT)],
            }
        }
        Msg::ReportSaved(Ok(path)) => vec![state.notify(
            NotificationKind::Success,
            format!("Report saved to {path}"),
        )],
        Msg::ReportSaved(Err(reason)) => vec![state.notify(
            NotificationKind::Error,
            format!("Failed to download report: {reason}"),
        )],
        Msg::NotificationExpired(id) => {
            state.dismiss(id);
            Vec::new()
        }
    };

    (state, effects)
}

// Validating is transient: the request either becomes a submission or an error.
fn submit(state: &mut AppState, source: InputSource, request: UploadRequest) -> Vec<Effect> {
    if state.is_submitting() {
        return vec![state.notify(NotificationKind::Error, MSG_BUSY)];
    }
    if let Err(err) = validate(&request, state.limits()) {
        return vec![state.notify(NotificationKind::Error, err.to_string())];
    }
    let submission_id = state.begin_submission(request.file_name.clone());
    vec![Effect::Submit {
        submission_id,
        source,
        request,
    }]
}
