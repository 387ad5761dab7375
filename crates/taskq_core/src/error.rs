use thiserror::Error;

use crate::TaskId;

/// Which request was in flight when a network or decode failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Submission,
    Polling,
}

/// Failures that end a submit or poll cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("Submission failed: {}", http_detail(.status, .detail))]
    Submission { status: u16, detail: Option<String> },
    #[error("Task {task_id} not found.")]
    NotFound { task_id: TaskId },
    #[error("Polling failed: {}", http_detail(.status, .detail))]
    PollHttp { status: u16, detail: Option<String> },
    #[error("{} error: {message}", phase_label(.phase))]
    NetworkOrParse { phase: RequestPhase, message: String },
}

fn http_detail(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => detail.clone(),
        None => format!("HTTP error, status {status}"),
    }
}

fn phase_label(phase: &RequestPhase) -> &'static str {
    match phase {
        RequestPhase::Submission => "Submission",
        RequestPhase::Polling => "Polling",
    }
}
