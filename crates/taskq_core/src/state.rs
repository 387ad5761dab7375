use crate::view_model::{ControllerView, StatusMessage};
use crate::{CycleId, JobRequest, TaskId, TaskKind};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Creation request in flight.
    Submitting { cycle: CycleId },
    /// Task accepted; its poll loop is running.
    Polling { cycle: CycleId, task_id: TaskId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerState {
    kind: TaskKind,
    parameter: String,
    phase: Phase,
    next_cycle: CycleId,
    message: Option<StatusMessage>,
    /// Bumped on every `show`, so an identical message re-issued later still counts as new.
    message_seq: u64,
    dirty: bool,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self {
            kind: TaskKind::default(),
            parameter: String::new(),
            phase: Phase::Idle,
            next_cycle: 1,
            message: None,
            message_seq: 0,
            dirty: false,
        }
    }
}

impl ControllerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ControllerView {
        let busy = !matches!(self.phase, Phase::Idle);
        let active_task = match &self.phase {
            Phase::Polling { task_id, .. } => Some(task_id.clone()),
            _ => None,
        };
        ControllerView {
            task_kind: self.kind,
            parameter: self.parameter.clone(),
            placeholder: self.kind.placeholder(),
            submit_enabled: !busy,
            busy,
            active_task,
            message: self.message.clone(),
            message_seq: self.message_seq,
            dirty: self.dirty,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn kind(&self) -> TaskKind {
        self.kind
    }

    pub(crate) fn parameter(&self) -> &str {
        &self.parameter
    }

    pub(crate) fn select_kind(&mut self, kind: TaskKind) {
        if self.kind != kind {
            self.kind = kind;
            self.dirty = true;
        }
    }

    pub(crate) fn set_parameter(&mut self, text: String) {
        if self.parameter != text {
            self.parameter = text;
            self.dirty = true;
        }
    }

    /// Allocates a fresh cycle and enters `Submitting`.
    pub(crate) fn begin_submission(&mut self) -> (CycleId, JobRequest) {
        let cycle = self.next_cycle;
        self.next_cycle += 1;
        self.phase = Phase::Submitting { cycle };
        (cycle, JobRequest::new(self.kind, self.parameter.clone()))
    }

    pub(crate) fn begin_polling(&mut self, cycle: CycleId, task_id: TaskId) {
        self.phase = Phase::Polling { cycle, task_id };
        self.dirty = true;
    }

    pub(crate) fn finish_cycle(&mut self) {
        self.phase = Phase::Idle;
        self.dirty = true;
    }

    pub(crate) fn show(&mut self, message: StatusMessage) {
        self.message = Some(message);
        self.message_seq += 1;
        self.dirty = true;
    }

    pub(crate) fn is_submitting(&self, cycle: CycleId) -> bool {
        self.phase == Phase::Submitting { cycle }
    }

    pub(crate) fn is_polling(&self, cycle: CycleId) -> bool {
        matches!(&self.phase, Phase::Polling { cycle: active, .. } if *active == cycle)
    }
}
