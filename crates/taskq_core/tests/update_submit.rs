use std::sync::Once;

use pretty_assertions::assert_eq;
use taskq_core::{
    update, ClientError, ControllerState, Effect, JobRequest, Msg, Phase, RequestPhase, Severity,
    TaskKind,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(taskq_logging::initialize_for_tests);
}

fn fill_form(state: ControllerState, kind: TaskKind, text: &str) -> ControllerState {
    let (state, _) = update(state, Msg::TaskKindSelected(kind));
    let (state, _) = update(state, Msg::ParameterChanged(text.to_string()));
    state
}

#[test]
fn submit_emits_request_for_selected_kind() {
    init_logging();
    let state = fill_form(ControllerState::new(), TaskKind::FetchIp, "example.com");

    let (mut next, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(
        effects,
        vec![Effect::Submit {
            cycle: 1,
            request: JobRequest::new(TaskKind::FetchIp, "example.com"),
        }]
    );
    let view = next.view();
    assert!(!view.submit_enabled);
    assert!(view.busy);
    assert_eq!(view.message.unwrap().severity, Severity::Info);
    assert_eq!(next.phase(), &Phase::Submitting { cycle: 1 });
    assert!(next.consume_dirty());
}

#[test]
fn placeholder_follows_selected_kind() {
    init_logging();
    let state = ControllerState::new();
    assert_eq!(state.view().placeholder, "https://example.com");

    let (state, _) = update(state, Msg::TaskKindSelected(TaskKind::FetchIp));
    assert_eq!(state.view().placeholder, "example.com");
    assert_eq!(state.view().task_kind, TaskKind::FetchIp);
}

#[test]
fn blank_parameter_is_rejected_without_request() {
    init_logging();
    let state = fill_form(ControllerState::new(), TaskKind::ScanUrl, "   ");

    let (next, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    let view = next.view();
    assert!(view.submit_enabled);
    let message = view.message.unwrap();
    assert_eq!(message.severity, Severity::Warning);
    assert!(message.headline.contains("url"));
}

#[test]
fn repeated_blank_submit_reissues_warning() {
    init_logging();
    let state = fill_form(ControllerState::new(), TaskKind::FetchIp, "");

    let (mut state, _) = update(state, Msg::SubmitClicked);
    let first = state.view();
    assert!(state.consume_dirty());

    let (mut state, effects) = update(state, Msg::SubmitClicked);
    let second = state.view();

    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    assert_eq!(first.message, second.message);
    assert_ne!(first.message_seq, second.message_seq);
}

#[test]
fn submit_while_busy_is_ignored() {
    init_logging();
    let state = fill_form(ControllerState::new(), TaskKind::ScanUrl, "https://a.example");
    let (state, _) = update(state, Msg::SubmitClicked);
    let before = state.clone();

    let (next, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
    assert_eq!(next, before);

    let (polling, _) = update(
        next,
        Msg::SubmitSucceeded {
            cycle: 1,
            task_id: "abc123".into(),
        },
    );
    let (_, effects) = update(polling, Msg::SubmitClicked);
    assert!(effects.is_empty());
}

#[test]
fn submit_success_starts_polling_the_returned_id() {
    init_logging();
    let state = fill_form(ControllerState::new(), TaskKind::ScanUrl, "https://a.example");
    let (state, _) = update(state, Msg::SubmitClicked);

    let (next, effects) = update(
        state,
        Msg::SubmitSucceeded {
            cycle: 1,
            task_id: "abc123".into(),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::StartPolling {
            cycle: 1,
            task_id: "abc123".into(),
        }]
    );
    let view = next.view();
    assert_eq!(view.active_task.as_deref(), Some("abc123"));
    assert!(!view.submit_enabled);
    assert!(view.message.unwrap().headline.contains("abc123"));
}

#[test]
fn submit_failure_shows_detail_and_reenables() {
    init_logging();
    let state = fill_form(ControllerState::new(), TaskKind::ScanUrl, "not a url");
    let (state, _) = update(state, Msg::SubmitClicked);

    let (next, effects) = update(
        state,
        Msg::SubmitFailed {
            cycle: 1,
            error: ClientError::Submission {
                status: 400,
                detail: Some("bad url".into()),
            },
        },
    );

    assert!(effects.is_empty());
    let view = next.view();
    assert!(view.submit_enabled);
    assert!(!view.busy);
    assert_eq!(view.active_task, None);
    let message = view.message.unwrap();
    assert_eq!(message.severity, Severity::Danger);
    assert!(message.headline.contains("bad url"));
}

#[test]
fn submit_failure_without_detail_names_status_code() {
    init_logging();
    let state = fill_form(ControllerState::new(), TaskKind::ScanUrl, "https://a.example");
    let (state, _) = update(state, Msg::SubmitClicked);

    let (next, _) = update(
        state,
        Msg::SubmitFailed {
            cycle: 1,
            error: ClientError::Submission {
                status: 500,
                detail: None,
            },
        },
    );

    assert!(next.view().message.unwrap().headline.contains("500"));
}

#[test]
fn network_failure_during_submit_returns_to_idle() {
    init_logging();
    let state = fill_form(ControllerState::new(), TaskKind::FetchIp, "example.com");
    let (state, _) = update(state, Msg::SubmitClicked);

    let (next, _) = update(
        state,
        Msg::SubmitFailed {
            cycle: 1,
            error: ClientError::NetworkOrParse {
                phase: RequestPhase::Submission,
                message: "connection refused".into(),
            },
        },
    );

    assert!(next.is_idle());
    assert!(next
        .view()
        .message
        .unwrap()
        .headline
        .contains("connection refused"));
}

#[test]
fn results_for_another_cycle_are_ignored() {
    init_logging();
    let state = fill_form(ControllerState::new(), TaskKind::ScanUrl, "https://a.example");
    let (state, _) = update(state, Msg::SubmitClicked);
    let before = state.clone();

    let (next, effects) = update(
        state,
        Msg::SubmitSucceeded {
            cycle: 7,
            task_id: "stale".into(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(next, before);
}
