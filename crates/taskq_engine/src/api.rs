use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use taskq_logging::{taskq_debug, taskq_trace};

use crate::{ApiError, ApiFailureKind, TaskCreated, TaskRequest, TaskSnapshot};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The two task endpoints, decoded into typed responses.
#[async_trait::async_trait]
pub trait TaskApi: Send + Sync {
    async fn submit(&self, request: &TaskRequest) -> Result<TaskCreated, ApiError>;

    async fn status(&self, task_id: &str) -> Result<TaskSnapshot, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTaskApi {
    client: reqwest::Client,
    base: Url,
}

impl ReqwestTaskApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let mut base = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(ApiFailureKind::InvalidBaseUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::new(
                ApiFailureKind::InvalidBaseUrl,
                format!("{} cannot be used as a base url", settings.base_url),
            ));
        }
        // Keep any path prefix when joining endpoint paths.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(ApiFailureKind::Network, err.to_string()))?;

        Ok(Self { client, base })
    }

    fn tasks_url(&self) -> Result<Url, ApiError> {
        self.base
            .join("tasks")
            .map_err(|err| ApiError::new(ApiFailureKind::InvalidBaseUrl, err.to_string()))
    }

    fn task_url(&self, task_id: &str) -> Result<Url, ApiError> {
        let mut url = self.tasks_url()?;
        url.path_segments_mut()
            .map_err(|()| ApiError::new(ApiFailureKind::InvalidBaseUrl, "base url has no path"))?
            .pop_if_empty()
            .push(task_id);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl TaskApi for ReqwestTaskApi {
    async fn submit(&self, request: &TaskRequest) -> Result<TaskCreated, ApiError> {
        let url = self.tasks_url()?;
        let body = serde_json::to_vec(request)
            .map_err(|err| ApiError::new(ApiFailureKind::Decode, err.to_string()))?;
        taskq_debug!("POST {} body_len={}", url, body.len());

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        read_json(response).await
    }

    async fn status(&self, task_id: &str) -> Result<TaskSnapshot, ApiError> {
        let url = self.task_url(task_id)?;
        taskq_trace!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_reqwest_error)?;

    if !status.is_success() {
        return Err(http_error(status, &body));
    }

    serde_json::from_slice(&body)
        .map_err(|err| ApiError::new(ApiFailureKind::Decode, err.to_string()))
}

fn http_error(status: StatusCode, body: &[u8]) -> ApiError {
    let detail = extract_detail(body);
    let message = detail
        .clone()
        .unwrap_or_else(|| format!("HTTP error, status {}", status.as_u16()));
    let kind = if status == StatusCode::NOT_FOUND {
        ApiFailureKind::NotFound { detail }
    } else {
        ApiFailureKind::HttpStatus {
            code: status.as_u16(),
            detail,
        }
    };
    ApiError::new(kind, message)
}

/// Reads `detail` from an error body; non-string details (validation lists) are kept as JSON.
fn extract_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiFailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(ApiFailureKind::Decode, err.to_string());
    }
    ApiError::new(ApiFailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{extract_detail, ApiSettings, ReqwestTaskApi};
    use crate::ApiFailureKind;

    fn api(base_url: &str) -> ReqwestTaskApi {
        ReqwestTaskApi::new(ApiSettings {
            base_url: base_url.to_string(),
            ..ApiSettings::default()
        })
        .unwrap()
    }

    #[test]
    fn task_urls_keep_base_path_prefix() {
        let api = api("http://host:8000/api");
        assert_eq!(api.tasks_url().unwrap().as_str(), "http://host:8000/api/tasks");
        assert_eq!(
            api.task_url("abc123").unwrap().as_str(),
            "http://host:8000/api/tasks/abc123"
        );
    }

    #[test]
    fn task_id_is_path_escaped() {
        let api = api("http://host:8000");
        assert_eq!(
            api.task_url("a/b c").unwrap().as_str(),
            "http://host:8000/tasks/a%2Fb%20c"
        );
    }

    #[test]
    fn rejects_unusable_base_url() {
        let err = ReqwestTaskApi::new(ApiSettings {
            base_url: "not a url".to_string(),
            ..ApiSettings::default()
        })
        .unwrap_err();
        assert_eq!(err.kind, ApiFailureKind::InvalidBaseUrl);
    }

    #[test]
    fn detail_extraction_handles_shapes() {
        assert_eq!(
            extract_detail(br#"{"detail":"bad url"}"#),
            Some("bad url".to_string())
        );
        assert_eq!(
            extract_detail(br#"{"detail":[{"loc":["body"]}]}"#),
            Some(r#"[{"loc":["body"]}]"#.to_string())
        );
        assert_eq!(extract_detail(b"Internal Server Error"), None);
        assert_eq!(extract_detail(br#"{"message":"x"}"#), None);
    }
}
