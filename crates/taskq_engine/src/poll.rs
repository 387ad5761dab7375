use std::sync::Arc;
use std::time::Duration;

use taskq_logging::{taskq_debug, taskq_info};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::{ApiError, CycleId, EngineEvent, TaskApi, TaskSnapshot};

/// Floor for the poll period; `tokio::time::interval` rejects a zero period.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// How poll ticks are scheduled relative to in-flight requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollMode {
    /// Wait for each response, then sleep one interval. Requests never overlap.
    #[default]
    Sequential,
    /// Fire a request every interval whether or not the previous one answered.
    FixedRate,
}

#[derive(Debug, Clone)]
pub struct PollSettings {
    pub interval: Duration,
    pub mode: PollMode,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(2000),
            mode: PollMode::Sequential,
        }
    }
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Whether a poll outcome ends the loop: any error, or a terminal status.
pub fn ends_polling(result: &Result<TaskSnapshot, ApiError>) -> bool {
    match result {
        Ok(snapshot) => snapshot.status.is_terminal(),
        Err(_) => true,
    }
}

/// Polls `task_id` until a terminal outcome or until `cancel` fires.
///
/// The first request goes out immediately. Every outcome is reported to `sink`
/// as `EngineEvent::StatusPolled`; nothing is emitted after the terminal one.
pub async fn poll_task(
    api: Arc<dyn TaskApi>,
    cycle: CycleId,
    task_id: String,
    settings: PollSettings,
    sink: Arc<dyn EventSink>,
    cancel: CancellationToken,
) {
    taskq_info!(
        "poll start cycle={} task_id={} mode={:?} interval_ms={}",
        cycle,
        task_id,
        settings.mode,
        settings.interval.as_millis()
    );
    let interval = settings.interval.max(MIN_INTERVAL);
    match settings.mode {
        PollMode::Sequential => {
            poll_sequential(api, cycle, &task_id, interval, sink, &cancel).await;
        }
        PollMode::FixedRate => {
            poll_fixed_rate(api, cycle, &task_id, interval, sink, &cancel).await;
        }
    }
    taskq_info!("poll end cycle={} task_id={}", cycle, task_id);
}

async fn poll_sequential(
    api: Arc<dyn TaskApi>,
    cycle: CycleId,
    task_id: &str,
    interval: Duration,
    sink: Arc<dyn EventSink>,
    cancel: &CancellationToken,
) {
    loop {
        let result = tokio::select! {
            () = cancel.cancelled() => return,
            result = api.status(task_id) => result,
        };
        let stop = ends_polling(&result);
        sink.emit(EngineEvent::StatusPolled {
            cycle,
            task_id: task_id.to_string(),
            result,
        });
        if stop {
            return;
        }
        tokio::select! {
            () = cancel.cancelled() => return,
            () = tokio::time::sleep(interval) => {}
        }
    }
}

async fn poll_fixed_rate(
    api: Arc<dyn TaskApi>,
    cycle: CycleId,
    task_id: &str,
    interval: Duration,
    sink: Arc<dyn EventSink>,
    cancel: &CancellationToken,
) {
    let done = cancel.child_token();
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut tick: u64 = 0;

    loop {
        tokio::select! {
            () = done.cancelled() => break,
            _ = ticker.tick() => {}
        }
        tick += 1;
        taskq_debug!("poll tick cycle={} tick={}", cycle, tick);

        let api = Arc::clone(&api);
        let sink = Arc::clone(&sink);
        let done = done.clone();
        let task_id = task_id.to_string();
        tokio::spawn(async move {
            let result = tokio::select! {
                () = done.cancelled() => return,
                result = api.status(&task_id) => result,
            };
            // An earlier tick may have ended the loop while this one was in flight.
            if done.is_cancelled() {
                return;
            }
            let stop = ends_polling(&result);
            sink.emit(EngineEvent::StatusPolled {
                cycle,
                task_id,
                result,
            });
            if stop {
                done.cancel();
            }
        });
    }
}
