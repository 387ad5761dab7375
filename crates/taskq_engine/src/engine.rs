use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use taskq_logging::{taskq_debug, taskq_info, taskq_warn};
use tokio_util::sync::CancellationToken;

use crate::api::{ApiSettings, ReqwestTaskApi, TaskApi};
use crate::poll::{poll_task, ChannelEventSink, EventSink, PollSettings};
use crate::{ApiError, CycleId, EngineEvent, TaskRequest};

#[derive(Debug, Clone, Default)]
pub struct EngineSettings {
    pub api: ApiSettings,
    pub poll: PollSettings,
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("invalid api settings: {0}")]
    Api(#[from] ApiError),
}

enum EngineCommand {
    Submit { cycle: CycleId, request: TaskRequest },
    StartPolling { cycle: CycleId, task_id: String },
    StopPolling { cycle: CycleId },
}

/// Sends commands to the engine thread. Dropping it shuts the engine down.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving side for events produced by the engine thread.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineEvents {
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

impl EngineHandle {
    /// Starts an engine talking to the real task API.
    pub fn spawn(settings: EngineSettings) -> Result<(Self, EngineEvents), EngineError> {
        let api = Arc::new(ReqwestTaskApi::new(settings.api)?);
        Self::with_api(api, settings.poll)
    }

    /// Starts an engine over any `TaskApi` implementation.
    pub fn with_api(
        api: Arc<dyn TaskApi>,
        poll: PollSettings,
    ) -> Result<(Self, EngineEvents), EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let sink: Arc<dyn EventSink> = Arc::new(ChannelEventSink::new(event_tx));
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("taskq-engine".to_string())
            .spawn(move || {
                let mut polls: HashMap<CycleId, CancellationToken> = HashMap::new();
                while let Ok(command) = cmd_rx.recv() {
                    handle_command(&runtime, &api, &poll, &sink, &mut polls, command);
                }
                for (_, token) in polls.drain() {
                    token.cancel();
                }
                runtime.shutdown_timeout(Duration::from_secs(1));
                taskq_debug!("engine thread stopped");
            })?;

        Ok((Self { cmd_tx }, EngineEvents { event_rx }))
    }

    pub fn submit(&self, cycle: CycleId, request: TaskRequest) {
        self.send(EngineCommand::Submit { cycle, request });
    }

    pub fn start_polling(&self, cycle: CycleId, task_id: impl Into<String>) {
        self.send(EngineCommand::StartPolling {
            cycle,
            task_id: task_id.into(),
        });
    }

    pub fn stop_polling(&self, cycle: CycleId) {
        self.send(EngineCommand::StopPolling { cycle });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            taskq_warn!("engine thread is gone; command dropped");
        }
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    api: &Arc<dyn TaskApi>,
    poll: &PollSettings,
    sink: &Arc<dyn EventSink>,
    polls: &mut HashMap<CycleId, CancellationToken>,
    command: EngineCommand,
) {
    match command {
        EngineCommand::Submit { cycle, request } => {
            let api = Arc::clone(api);
            let sink = Arc::clone(sink);
            runtime.spawn(async move {
                let result = api.submit(&request).await;
                match &result {
                    Ok(created) => {
                        taskq_info!("submit ok cycle={} task_id={}", cycle, created.task_id);
                    }
                    Err(err) => taskq_warn!("submit failed cycle={}: {}", cycle, err),
                }
                sink.emit(EngineEvent::Submitted { cycle, result });
            });
        }
        EngineCommand::StartPolling { cycle, task_id } => {
            let token = CancellationToken::new();
            if let Some(previous) = polls.insert(cycle, token.clone()) {
                taskq_warn!("cycle={} already had a poll loop; replacing it", cycle);
                previous.cancel();
            }
            runtime.spawn(poll_task(
                Arc::clone(api),
                cycle,
                task_id,
                poll.clone(),
                Arc::clone(sink),
                token,
            ));
        }
        EngineCommand::StopPolling { cycle } => {
            if let Some(token) = polls.remove(&cycle) {
                token.cancel();
            }
        }
    }
}
