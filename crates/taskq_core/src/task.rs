use std::fmt;

/// Client-side id of one submit-then-poll cycle.
pub type CycleId = u64;

/// Opaque server-issued task identifier.
pub type TaskId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskKind {
    #[default]
    ScanUrl,
    FetchIp,
}

impl TaskKind {
    pub const ALL: [TaskKind; 2] = [TaskKind::ScanUrl, TaskKind::FetchIp];

    /// Name the task API uses in `task_name`.
    pub fn wire_name(self) -> &'static str {
        match self {
            TaskKind::ScanUrl => "scan_url",
            TaskKind::FetchIp => "fetch_ip",
        }
    }

    /// Key under `params` that carries the user's text.
    pub fn parameter_key(self) -> &'static str {
        match self {
            TaskKind::ScanUrl => "url",
            TaskKind::FetchIp => "hostname",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            TaskKind::ScanUrl => "https://example.com",
            TaskKind::FetchIp => "example.com",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskKind::ScanUrl => "Scan URL",
            TaskKind::FetchIp => "Fetch IP",
        }
    }

    /// Accepts the wire name or its dashed form, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.wire_name() == normalized)
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    pub kind: TaskKind,
    pub parameter: String,
}

impl JobRequest {
    pub fn new(kind: TaskKind, parameter: impl Into<String>) -> Self {
        Self {
            kind,
            parameter: parameter.into(),
        }
    }
}

/// Task status as reported by the status endpoint.
///
/// Open-ended: any value other than `PENDING` and `IN_PROGRESS` is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    InProgress,
    Completed,
    /// Any other terminal value, upper-cased (e.g. `FAILED`).
    Other(String),
}

impl JobStatus {
    pub fn parse(raw: &str) -> Self {
        let upper = raw.trim().to_ascii_uppercase();
        match upper.as_str() {
            "PENDING" => JobStatus::Pending,
            "IN_PROGRESS" => JobStatus::InProgress,
            "COMPLETED" => JobStatus::Completed,
            _ => JobStatus::Other(upper),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Pending | JobStatus::InProgress)
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Pending => "PENDING",
            JobStatus::InProgress => "IN_PROGRESS",
            JobStatus::Completed => "COMPLETED",
            JobStatus::Other(value) => value,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded status response.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub task_id: TaskId,
    pub task_name: Option<String>,
    pub status: JobStatus,
    pub submitted_at: Option<String>,
    pub started_at: Option<String>,
    pub completed_at: Option<String>,
    pub result: Option<serde_json::Value>,
}

impl StatusReport {
    pub fn new(task_id: impl Into<TaskId>, status: JobStatus) -> Self {
        Self {
            task_id: task_id.into(),
            task_name: None,
            status,
            submitted_at: None,
            started_at: None,
            completed_at: None,
            result: None,
        }
    }

    pub fn with_result(mut self, result: serde_json::Value) -> Self {
        self.result = Some(result);
        self
    }
}
