use std::fmt;

use serde::{Deserialize, Serialize};

pub type CycleId = u64;

/// Body of `POST /tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "task_name", content = "params", rename_all = "snake_case")]
pub enum TaskRequest {
    ScanUrl { url: String },
    FetchIp { hostname: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskCreated {
    pub task_id: String,
}

/// Body of a successful `GET /tasks/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaskSnapshot {
    pub id: String,
    #[serde(default)]
    pub task_name: Option<String>,
    pub status: TaskState,
    #[serde(default)]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
}

/// Status string decoded case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum TaskState {
    Pending,
    InProgress,
    Completed,
    /// Any other status, upper-cased (`FAILED` included).
    Other(String),
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskState::Pending | TaskState::InProgress)
    }

    pub fn as_str(&self) -> &str {
        match self {
            TaskState::Pending => "PENDING",
            TaskState::InProgress => "IN_PROGRESS",
            TaskState::Completed => "COMPLETED",
            TaskState::Other(value) => value,
        }
    }
}

impl From<String> for TaskState {
    fn from(raw: String) -> Self {
        let upper = raw.trim().to_ascii_uppercase();
        match upper.as_str() {
            "PENDING" => TaskState::Pending,
            "IN_PROGRESS" => TaskState::InProgress,
            "COMPLETED" => TaskState::Completed,
            _ => TaskState::Other(upper),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Submitted {
        cycle: CycleId,
        result: Result<TaskCreated, ApiError>,
    },
    StatusPolled {
        cycle: CycleId,
        task_id: String,
        result: Result<TaskSnapshot, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ApiFailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: ApiFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Server-provided `detail`, if the failure carried one.
    pub fn detail(&self) -> Option<&str> {
        match &self.kind {
            ApiFailureKind::HttpStatus { detail, .. } | ApiFailureKind::NotFound { detail } => {
                detail.as_deref()
            }
            _ => None,
        }
    }

    /// HTTP status code for failures that got a response.
    pub fn status_code(&self) -> Option<u16> {
        match &self.kind {
            ApiFailureKind::HttpStatus { code, .. } => Some(*code),
            ApiFailureKind::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailureKind {
    InvalidBaseUrl,
    NotFound { detail: Option<String> },
    HttpStatus { code: u16, detail: Option<String> },
    Timeout,
    Network,
    Decode,
}

impl fmt::Display for ApiFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailureKind::InvalidBaseUrl => write!(f, "invalid base url"),
            ApiFailureKind::NotFound { .. } => write!(f, "not found"),
            ApiFailureKind::HttpStatus { code, .. } => write!(f, "http status {code}"),
            ApiFailureKind::Timeout => write!(f, "timeout"),
            ApiFailureKind::Network => write!(f, "network error"),
            ApiFailureKind::Decode => write!(f, "malformed response"),
        }
    }
}
