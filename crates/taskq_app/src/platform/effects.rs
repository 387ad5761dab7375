use std::sync::mpsc;
use std::thread;

use taskq_core::{
    ClientError, Effect, JobRequest, JobStatus, Msg, RequestPhase, StatusReport, TaskKind,
};
use taskq_engine::{
    ApiError, ApiFailureKind, EngineError, EngineEvent, EngineEvents, EngineHandle,
    EngineSettings, TaskRequest, TaskSnapshot, TaskState,
};
use taskq_logging::{taskq_debug, taskq_info, taskq_warn};

use super::app::Inbound;

/// Executes controller effects on the engine and feeds engine events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: EngineSettings, inbox: mpsc::Sender<Inbound>) -> Result<Self, EngineError> {
        let (engine, events) = EngineHandle::spawn(settings)?;
        spawn_event_loop(events, inbox);
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Submit { cycle, request } => {
                    taskq_info!(
                        "Submit cycle={} task_name={} param_len={}",
                        cycle,
                        request.kind,
                        request.parameter.len()
                    );
                    self.engine.submit(cycle, to_task_request(request));
                }
                Effect::StartPolling { cycle, task_id } => {
                    taskq_info!("StartPolling cycle={} task_id={}", cycle, task_id);
                    self.engine.start_polling(cycle, task_id);
                }
                Effect::StopPolling { cycle } => {
                    taskq_debug!("StopPolling cycle={}", cycle);
                    self.engine.stop_polling(cycle);
                }
            }
        }
    }
}

fn spawn_event_loop(events: EngineEvents, inbox: mpsc::Sender<Inbound>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if inbox.send(Inbound::Msg(map_event(event))).is_err() {
                break;
            }
        }
    });
}

fn to_task_request(request: JobRequest) -> TaskRequest {
    match request.kind {
        TaskKind::ScanUrl => TaskRequest::ScanUrl {
            url: request.parameter,
        },
        TaskKind::FetchIp => TaskRequest::FetchIp {
            hostname: request.parameter,
        },
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Submitted { cycle, result } => match result {
            Ok(created) => Msg::SubmitSucceeded {
                cycle,
                task_id: created.task_id,
            },
            Err(err) => {
                taskq_warn!("Submission for cycle {} failed: {}", cycle, err);
                Msg::SubmitFailed {
                    cycle,
                    error: submit_error(err),
                }
            }
        },
        EngineEvent::StatusPolled {
            cycle,
            task_id,
            result,
        } => match result {
            Ok(snapshot) => Msg::StatusReceived {
                cycle,
                report: map_snapshot(snapshot),
            },
            Err(err) => {
                taskq_warn!("Polling {} (cycle {}) failed: {}", task_id, cycle, err);
                Msg::PollFailed {
                    cycle,
                    error: poll_error(task_id, err),
                }
            }
        },
    }
}

fn map_snapshot(snapshot: TaskSnapshot) -> StatusReport {
    StatusReport {
        task_id: snapshot.id,
        task_name: snapshot.task_name,
        status: map_status(snapshot.status),
        submitted_at: snapshot.submitted_at,
        started_at: snapshot.started_at,
        completed_at: snapshot.completed_at,
        result: snapshot.result,
    }
}

fn map_status(state: TaskState) -> JobStatus {
    match state {
        TaskState::Pending => JobStatus::Pending,
        TaskState::InProgress => JobStatus::InProgress,
        TaskState::Completed => JobStatus::Completed,
        TaskState::Other(value) => JobStatus::Other(value),
    }
}

fn submit_error(err: ApiError) -> ClientError {
    let text = err.to_string();
    match err.kind {
        ApiFailureKind::HttpStatus { code, detail } => ClientError::Submission {
            status: code,
            detail,
        },
        ApiFailureKind::NotFound { detail } => ClientError::Submission {
            status: 404,
            detail,
        },
        _ => ClientError::NetworkOrParse {
            phase: RequestPhase::Submission,
            message: text,
        },
    }
}

fn poll_error(task_id: String, err: ApiError) -> ClientError {
    let text = err.to_string();
    match err.kind {
        ApiFailureKind::NotFound { .. } => ClientError::NotFound { task_id },
        ApiFailureKind::HttpStatus { code, detail } => ClientError::PollHttp {
            status: code,
            detail,
        },
        _ => ClientError::NetworkOrParse {
            phase: RequestPhase::Polling,
            message: text,
        },
    }
}
