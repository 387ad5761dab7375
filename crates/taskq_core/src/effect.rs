use crate::{CycleId, JobRequest, TaskId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Submit { cycle: CycleId, request: JobRequest },
    StartPolling { cycle: CycleId, task_id: TaskId },
    StopPolling { cycle: CycleId },
}
