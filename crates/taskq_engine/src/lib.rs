//! Taskq engine: task API client, poll loop and effect execution.
mod api;
mod engine;
mod poll;
mod types;

pub use api::{ApiSettings, ReqwestTaskApi, TaskApi};
pub use engine::{EngineError, EngineEvents, EngineHandle, EngineSettings};
pub use poll::{ends_polling, poll_task, ChannelEventSink, EventSink, PollMode, PollSettings};
pub use types::{
    ApiError, ApiFailureKind, CycleId, EngineEvent, TaskCreated, TaskRequest, TaskSnapshot,
    TaskState,
};
