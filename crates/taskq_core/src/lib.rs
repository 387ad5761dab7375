//! Taskq core: pure submit-and-poll controller state machine and view-model helpers.
mod effect;
mod error;
mod msg;
mod state;
mod task;
mod update;
mod view_model;

pub use effect::Effect;
pub use error::{ClientError, RequestPhase};
pub use msg::Msg;
pub use state::{ControllerState, Phase};
pub use task::{CycleId, JobRequest, JobStatus, StatusReport, TaskId, TaskKind};
pub use update::update;
pub use view_model::{ControllerView, Severity, StatusMessage};
