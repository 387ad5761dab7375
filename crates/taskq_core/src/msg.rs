use crate::{ClientError, CycleId, StatusReport, TaskId, TaskKind};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked a task kind in the selector.
    TaskKindSelected(TaskKind),
    /// User edited the parameter field.
    ParameterChanged(String),
    /// User pressed the submit control.
    SubmitClicked,
    /// Creation endpoint accepted the task.
    SubmitSucceeded { cycle: CycleId, task_id: TaskId },
    /// Creation request failed.
    SubmitFailed { cycle: CycleId, error: ClientError },
    /// A poll tick decoded a status response.
    StatusReceived { cycle: CycleId, report: StatusReport },
    /// A poll tick failed; the poll loop has stopped.
    PollFailed { cycle: CycleId, error: ClientError },
}
