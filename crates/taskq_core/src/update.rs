use crate::view_model::{Severity, StatusMessage};
use crate::{ControllerState, Effect, JobStatus, Msg, StatusReport};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ControllerState, msg: Msg) -> (ControllerState, Vec<Effect>) {
    let effects = match msg {
        Msg::TaskKindSelected(kind) => {
            state.select_kind(kind);
            Vec::new()
        }
        Msg::ParameterChanged(text) => {
            state.set_parameter(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // The disabled submit control is the only guard against a second cycle.
            if !state.is_idle() {
                return (state, Vec::new());
            }
            if state.parameter().trim().is_empty() {
                let key = state.kind().parameter_key();
                state.show(StatusMessage::new(
                    Severity::Warning,
                    format!("Please enter a {key}."),
                ));
                return (state, Vec::new());
            }
            let (cycle, request) = state.begin_submission();
            state.show(StatusMessage::new(
                Severity::Info,
                format!(
                    "Submitting {} task for {}...",
                    request.kind.label(),
                    request.parameter
                ),
            ));
            vec![Effect::Submit { cycle, request }]
        }
        Msg::SubmitSucceeded { cycle, task_id } => {
            if !state.is_submitting(cycle) {
                return (state, Vec::new());
            }
            state.show(StatusMessage::new(
                Severity::Info,
                format!("Task submitted with ID: {task_id}. Waiting for status..."),
            ));
            state.begin_polling(cycle, task_id.clone());
            vec![Effect::StartPolling { cycle, task_id }]
        }
        Msg::SubmitFailed { cycle, error } => {
            if !state.is_submitting(cycle) {
                return (state, Vec::new());
            }
            state.finish_cycle();
            state.show(StatusMessage::new(Severity::Danger, error.to_string()));
            Vec::new()
        }
        Msg::StatusReceived { cycle, report } => {
            if !state.is_polling(cycle) {
                return (state, Vec::new());
            }
            let terminal = report.status.is_terminal();
            state.show(status_message(&report));
            if terminal {
                state.finish_cycle();
                vec![Effect::StopPolling { cycle }]
            } else {
                Vec::new()
            }
        }
        Msg::PollFailed { cycle, error } => {
            if !state.is_polling(cycle) {
                return (state, Vec::new());
            }
            state.finish_cycle();
            state.show(StatusMessage::new(Severity::Danger, error.to_string()));
            vec![Effect::StopPolling { cycle }]
        }
    };

    (state, effects)
}

fn status_message(report: &StatusReport) -> StatusMessage {
    let headline = format!("Task {}: {}", report.task_id, report.status);
    let (severity, label) = match &report.status {
        JobStatus::Pending => return StatusMessage::new(Severity::Info, headline),
        JobStatus::InProgress => return StatusMessage::new(Severity::Warning, headline),
        JobStatus::Completed => (Severity::Success, "Result"),
        JobStatus::Other(_) => (Severity::Danger, "Error detail"),
    };
    let mut detail = format!("{label}:\n{}", pretty_result(report));
    if let Some(timing) = timing_line(report) {
        detail.push('\n');
        detail.push_str(&timing);
    }
    StatusMessage::new(severity, headline).with_detail(detail)
}

fn timing_line(report: &StatusReport) -> Option<String> {
    match (&report.started_at, &report.completed_at) {
        (Some(started), Some(completed)) => {
            Some(format!("Started: {started} | Completed: {completed}"))
        }
        (None, Some(completed)) => Some(format!("Completed: {completed}")),
        _ => None,
    }
}

fn pretty_result(report: &StatusReport) -> String {
    let value = report.result.clone().unwrap_or(serde_json::Value::Null);
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}
