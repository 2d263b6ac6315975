use std::sync::Once;
use std::time::Duration;

use pretty_assertions::assert_eq;
use summarizer_core::{
    update, AnalysisResult, AppState, ControllerStage, DateEntry, Effect, Importance, InputSource,
    Msg, NotificationKind, SubmissionId, Tier, UploadLimits, UploadRequest, MEDIA_TYPE_PDF, MIB,
    MSG_BUSY, MSG_PROCESSED, NOTIFICATION_TIMEOUT, NO_DATES, NO_TIER_ITEMS,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(summarizer_logging::initialize_for_tests);
}

fn pdf(size: usize) -> UploadRequest {
    UploadRequest::new("contract.pdf", MEDIA_TYPE_PDF, vec![0u8; size])
}

fn choose(state: AppState, request: UploadRequest) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::FileChosen {
            source: InputSource::Picker,
            request,
        },
    )
}

fn submission_id(effects: &[Effect]) -> SubmissionId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Submit { submission_id, .. } => Some(*submission_id),
            _ => None,
        })
        .expect("submit effect")
}

fn sample_result(summary: &str, high: &[&str]) -> AnalysisResult {
    AnalysisResult {
        summary: Some(summary.to_string()),
        dates: Vec::new(),
        importance: Some(Importance {
            high: high.iter().map(|s| s.to_string()).collect(),
            medium: Vec::new(),
            low: Vec::new(),
        }),
        suggested_articles: None,
        report_url: None,
    }
}

fn displaying(result: AnalysisResult) -> AppState {
    let (state, effects) = choose(AppState::new(), pdf(16));
    let id = submission_id(&effects);
    let (state, _) = update(
        state,
        Msg::SummarizeFinished {
            submission_id: id,
            result: Ok(result),
        },
    );
    state
}

#[test]
fn png_is_rejected_without_network_call() {
    init_logging();
    let request = UploadRequest::from_file_name("scan.png", vec![1, 2, 3]);

    let (state, effects) = choose(AppState::new(), request);

    assert!(effects.iter().all(|e| !matches!(e, Effect::Submit { .. })));
    let view = state.view();
    let notification = view.notification.expect("error shown");
    assert_eq!(notification.kind, NotificationKind::Error);
    assert!(notification
        .message
        .starts_with("Please upload a valid file type"));
    assert_eq!(view.stage, ControllerStage::Idle);
}

#[test]
fn oversized_file_is_rejected_without_network_call() {
    init_logging();
    let state = AppState::with_settings(UploadLimits::with_max_mb(16), NOTIFICATION_TIMEOUT);

    let (state, effects) = choose(state, pdf(16 * MIB as usize + 1));

    assert_eq!(effects.len(), 1);
    assert!(matches!(effects[0], Effect::ScheduleDismiss { .. }));
    assert_eq!(
        state.view().notification.expect("error").message,
        "File size exceeds 16MB limit"
    );
    assert!(!state.is_submitting());
}

#[test]
fn accepted_file_submits_and_disables_upload() {
    init_logging();
    let (state, effects) = choose(AppState::new(), pdf(2 * MIB as usize));

    assert_eq!(effects.len(), 1);
    let Effect::Submit { source, request, .. } = &effects[0] else {
        panic!("expected submit, got {effects:?}");
    };
    assert_eq!(*source, InputSource::Picker);
    assert_eq!(request.file_name, "contract.pdf");

    let view = state.view();
    assert_eq!(view.stage, ControllerStage::Submitting);
    assert_eq!(view.loading.as_deref(), Some("contract.pdf"));
    assert!(!view.upload_enabled);
}

#[test]
fn second_submission_while_in_flight_is_refused() {
    init_logging();
    let (state, _) = choose(AppState::new(), pdf(8));

    let (state, effects) = update(
        state,
        Msg::FileChosen {
            source: InputSource::DragDrop,
            request: pdf(8),
        },
    );

    assert!(effects.iter().all(|e| !matches!(e, Effect::Submit { .. })));
    assert_eq!(state.view().notification.expect("busy").message, MSG_BUSY);
    assert!(state.is_submitting());

    let (_state, effects) = update(state, Msg::BrowseClicked);
    assert!(effects.is_empty());
}

#[test]
fn browse_opens_picker_when_idle() {
    init_logging();
    let (_state, effects) = update(AppState::new(), Msg::BrowseClicked);
    assert_eq!(effects, vec![Effect::OpenFilePicker]);
}

#[test]
fn two_megabyte_pdf_example_renders_expected_views() {
    init_logging();
    let (state, effects) = choose(AppState::new(), pdf(2 * MIB as usize));
    let id = submission_id(&effects);

    let (state, effects) = update(
        state,
        Msg::SummarizeFinished {
            submission_id: id,
            result: Ok(sample_result("X", &["A"])),
        },
    );

    assert_eq!(effects[0], Effect::RevealResults);
    let view = state.view();
    assert_eq!(view.stage, ControllerStage::Displaying);
    assert!(view.results_visible);
    assert!(view.upload_enabled);
    assert_eq!(view.notification.as_ref().unwrap().message, MSG_PROCESSED);

    let results = view.results.expect("results");
    assert_eq!(results.summary, "X");
    assert_eq!(results.dates.len(), 1);
    assert_eq!(results.dates[0].text, NO_DATES);
    assert_eq!(results.importance.len(), 1);
    assert_eq!(results.importance[0].text, "A");
    assert_eq!(results.importance[0].icon, "exclamation-circle");
    assert!(results.tabs[0].active);
    assert_eq!(results.tabs[0].label, "very-important");
    assert!(!results.download.enabled);

    for tier in [Tier::Medium, Tier::Low] {
        let (next, effects) = update(state.clone(), Msg::TierSelected(tier));
        assert!(effects.is_empty());
        let rows = next.view().results.unwrap().importance;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text, NO_TIER_ITEMS);
    }
}

#[test]
fn new_result_replaces_previous_and_resets_tier() {
    init_logging();
    let state = displaying(sample_result("first", &["old"]));
    let (state, _) = update(state, Msg::TierSelected(Tier::Low));
    assert_eq!(state.selected_tier(), Tier::Low);

    let (state, effects) = choose(state, pdf(8));
    let id = submission_id(&effects);
    let mut second = sample_result("second", &["new"]);
    second.dates = vec![DateEntry::bare("2024-05-01")];
    let (state, _) = update(
        state,
        Msg::SummarizeFinished {
            submission_id: id,
            result: Ok(second.clone()),
        },
    );

    assert_eq!(state.current(), Some(&second));
    assert_eq!(state.selected_tier(), Tier::High);
    let results = state.view().results.unwrap();
    assert_eq!(results.summary, "second");
    assert_eq!(results.dates[0].text, "2024-05-01");
    assert_eq!(results.importance[0].text, "new");
}

#[test]
fn server_failure_keeps_prior_results() {
    init_logging();
    let state = displaying(sample_result("kept", &["A"]));
    let before = state.current().cloned();

    let (state, effects) = choose(state, pdf(8));
    assert!(!state.view().results_visible);
    let id = submission_id(&effects);
    let (state, _) = update(
        state,
        Msg::SummarizeFinished {
            submission_id: id,
            result: Err("Internal failure".to_string()),
        },
    );

    assert_eq!(state.current().cloned(), before);
    let view = state.view();
    assert_eq!(view.stage, ControllerStage::Displaying);
    assert!(view.results_visible);
    assert_eq!(view.results.unwrap().summary, "kept");
    let notification = view.notification.unwrap();
    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(notification.message, "Internal failure");
}

#[test]
fn stale_completion_is_ignored() {
    init_logging();
    let (state, effects) = choose(AppState::new(), pdf(8));
    let id = submission_id(&effects);

    let (mut state, effects) = update(
        state,
        Msg::SummarizeFinished {
            submission_id: id + 7,
            result: Ok(sample_result("ghost", &[])),
        },
    );

    assert!(effects.is_empty());
    assert!(state.is_submitting());
    assert_eq!(state.current(), None);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn tier_switch_changes_only_visible_subset() {
    init_logging();
    let mut result = sample_result("S", &["h1", "h2"]);
    result.importance.as_mut().unwrap().low = vec!["l1".to_string()];
    let mut state = displaying(result);
    assert!(state.consume_dirty());

    let (mut state, effects) = update(state, Msg::TierSelected(Tier::Low));
    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    let results = state.view().results.unwrap();
    assert_eq!(results.summary, "S");
    assert_eq!(results.importance.len(), 1);
    assert_eq!(results.importance[0].text, "l1");
    assert_eq!(results.importance[0].icon, "comment");
    let counts: Vec<_> = results.tabs.iter().map(|t| t.count).collect();
    assert_eq!(counts, vec![2, 0, 1]);

    let (mut state, _) = update(state, Msg::TierSelected(Tier::Low));
    assert!(!state.consume_dirty());
}

#[test]
fn notification_expires_only_for_its_own_id() {
    init_logging();
    let state = AppState::with_settings(UploadLimits::default(), Duration::from_millis(250));
    let (state, first) = update(state, Msg::CopySummaryClicked);
    let Effect::ScheduleDismiss { id: first_id, after } = first[0] else {
        panic!("expected dismissal, got {first:?}");
    };
    assert_eq!(after, Duration::from_millis(250));

    let (state, second) = update(state, Msg::DownloadClicked);
    let Effect::ScheduleDismiss { id: second_id, .. } = second[0] else {
        panic!("expected dismissal, got {second:?}");
    };

    let (state, _) = update(state, Msg::NotificationExpired(first_id));
    assert!(state.view().notification.is_some());

    let (state, _) = update(state, Msg::NotificationExpired(second_id));
    assert!(state.view().notification.is_none());
}

#[test]
fn unreadable_file_reports_error() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::FileUnreadable {
            path: "missing.pdf".to_string(),
            reason: "not found".to_string(),
        },
    );

    assert_eq!(effects.len(), 1);
    assert_eq!(
        state.view().notification.unwrap().message,
        "Could not read missing.pdf: not found"
    );
}
