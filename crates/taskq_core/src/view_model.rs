use crate::{TaskId, TaskKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub severity: Severity,
    pub headline: String,
    /// Pretty-printed JSON or other multi-line detail shown under the headline.
    pub detail: Option<String>,
}

impl StatusMessage {
    pub fn new(severity: Severity, headline: impl Into<String>) -> Self {
        Self {
            severity,
            headline: headline.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControllerView {
    pub task_kind: TaskKind,
    pub parameter: String,
    pub placeholder: &'static str,
    pub submit_enabled: bool,
    /// Busy indicator on the submit control.
    pub busy: bool,
    pub active_task: Option<TaskId>,
    pub message: Option<StatusMessage>,
    /// Changes whenever `message` is (re)issued.
    pub message_seq: u64,
    pub dirty: bool,
}
