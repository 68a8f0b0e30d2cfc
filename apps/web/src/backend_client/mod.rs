//! Backend client — every call to the ranking backend goes through here.
//!
//! Page handlers depend on the `RankerBackend` trait, never on `reqwest`
//! directly. Responses come back as `UnknownPayload` and are sanitized by the
//! caller. No call is retried.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::analysis::form::{AnalysisForm, ResumeFile};
use crate::models::{AuthResponse, SignInRequest, SignUpRequest, UnknownPayload};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl BackendError {
    /// The single line shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Http(e) if e.is_timeout() => {
                "The analysis service took too long to respond".to_string()
            }
            BackendError::Http(_) => "Network error: the analysis service is unreachable".to_string(),
            BackendError::Status { status, .. } => {
                format!("Request failed with status code {status}")
            }
            BackendError::Parse(_) => "The analysis service returned an unreadable response".to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The ranking backend as seen by the page handlers.
///
/// Carried in `AppState` as `Arc<dyn RankerBackend>`.
#[async_trait]
pub trait RankerBackend: Send + Sync {
    /// `POST /api/rank`.
    async fn rank(
        &self,
        form: &AnalysisForm,
        token: Option<&str>,
    ) -> Result<UnknownPayload, BackendError>;

    /// `POST /auth/signin`.
    async fn sign_in(&self, request: &SignInRequest) -> Result<AuthResponse, BackendError>;

    /// `POST /auth/signup`.
    async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthResponse, BackendError>;

    /// `GET /api/rank`.
    async fn list_evaluations(&self, token: Option<&str>) -> Result<UnknownPayload, BackendError>;

    /// `GET /api/rank/{id}`.
    async fn get_evaluation(
        &self,
        id: i64,
        token: Option<&str>,
    ) -> Result<UnknownPayload, BackendError>;
}

// ────────────────────────────────────────────────────────────────────────────
// HttpBackend — reqwest implementation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl RankerBackend for HttpBackend {
    async fn rank(
        &self,
        form: &AnalysisForm,
        token: Option<&str>,
    ) -> Result<UnknownPayload, BackendError> {
        let mut body = multipart::Form::new();
        if let Some(file) = &form.resume_file {
            body = body.part("resumeFile", resume_part(file));
        }
        if form.has_resume_text() {
            body = body.text("resumeText", form.resume_text.clone());
        }
        body = body.text("jobDescription", form.job_description.clone());

        debug!(
            "POST /api/rank (file: {}, text: {}, authenticated: {})",
            form.resume_file.is_some(),
            form.has_resume_text(),
            token.is_some()
        );

        let mut request = self.client.post(self.url("/api/rank")).multipart(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        read_payload(request.send().await?).await
    }

    async fn sign_in(&self, request: &SignInRequest) -> Result<AuthResponse, BackendError> {
        let response = self
            .client
            .post(self.url("/auth/signin"))
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthResponse, BackendError> {
        let response = self
            .client
            .post(self.url("/auth/signup"))
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    async fn list_evaluations(&self, token: Option<&str>) -> Result<UnknownPayload, BackendError> {
        let mut request = self.client.get(self.url("/api/rank"));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        read_payload(request.send().await?).await
    }

    async fn get_evaluation(
        &self,
        id: i64,
        token: Option<&str>,
    ) -> Result<UnknownPayload, BackendError> {
        let mut request = self.client.get(self.url(&format!("/api/rank/{id}")));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        read_payload(request.send().await?).await
    }
}

/// The uploaded file as a multipart part. A content type the browser sent
/// that does not parse as a MIME type is dropped rather than failing the
/// submission.
fn resume_part(file: &ResumeFile) -> multipart::Part {
    let part = || multipart::Part::bytes(file.bytes.to_vec()).file_name(file.file_name.clone());
    match file.content_type.as_deref() {
        Some(content_type) => part().mime_str(content_type).unwrap_or_else(|e| {
            debug!("Sending '{}' without its content type '{content_type}': {e}", file.file_name);
            part()
        }),
        None => part(),
    }
}

/// Rejects non-2xx statuses, keeping a snippet of the body for the logs.
async fn ensure_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message: String = body.chars().take(200).collect();
    warn!("Backend returned {}: {}", status, message);
    Err(BackendError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Reads a 2xx body as untyped JSON. An empty body reads as `null`.
async fn read_payload(response: Response) -> Result<UnknownPayload, BackendError> {
    let bytes = ensure_success(response).await?.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(UnknownPayload::new(Value::Null));
    }
    Ok(UnknownPayload::new(serde_json::from_slice(&bytes)?))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let bytes = ensure_success(response).await?.bytes().await?;
    serde_json::from_slice(&bytes).map_err(BackendError::Parse)
}
