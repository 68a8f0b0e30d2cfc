//! In-memory `RankerBackend` for handler and router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::analysis::form::AnalysisForm;
use crate::backend_client::{BackendError, RankerBackend};
use crate::models::{AuthResponse, SignInRequest, SignUpRequest, UnknownPayload};

/// What the fake saw for one `rank` call.
#[derive(Debug, Clone)]
pub struct RankCall {
    pub token: Option<String>,
    pub file_name: Option<String>,
    pub resume_text: String,
    pub job_description: String,
}

/// Canned responses; an `Err(status)` becomes `BackendError::Status`.
pub struct FakeBackend {
    rank: Result<Value, u16>,
    auth: Result<Value, u16>,
    history: Result<Value, u16>,
    evaluation: Result<Value, u16>,
    rank_calls: Mutex<Vec<RankCall>>,
    auth_calls: Mutex<Vec<String>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            rank: Ok(json!({})),
            auth: Ok(json!({"token": "fake-token"})),
            history: Ok(json!([])),
            evaluation: Ok(Value::Null),
            rank_calls: Mutex::new(Vec::new()),
            auth_calls: Mutex::new(Vec::new()),
        }
    }
}

fn canned(response: &Result<Value, u16>) -> Result<Value, BackendError> {
    response.clone().map_err(|status| BackendError::Status {
        status,
        message: "fake failure".to_string(),
    })
}

impl FakeBackend {
    pub fn with_rank(rank: Result<Value, u16>) -> Self {
        Self {
            rank,
            ..Default::default()
        }
    }

    pub fn with_auth(auth: Result<Value, u16>) -> Self {
        Self {
            auth,
            ..Default::default()
        }
    }

    pub fn with_history(history: Result<Value, u16>, evaluation: Result<Value, u16>) -> Self {
        Self {
            history,
            evaluation,
            ..Default::default()
        }
    }

    pub fn rank_calls(&self) -> Vec<RankCall> {
        self.rank_calls.lock().unwrap().clone()
    }

    pub fn auth_calls(&self) -> Vec<String> {
        self.auth_calls.lock().unwrap().clone()
    }

    fn auth_response(&self, email: &str) -> Result<AuthResponse, BackendError> {
        self.auth_calls.lock().unwrap().push(email.to_string());
        Ok(serde_json::from_value(canned(&self.auth)?)?)
    }
}

#[async_trait]
impl RankerBackend for FakeBackend {
    async fn rank(
        &self,
        form: &AnalysisForm,
        token: Option<&str>,
    ) -> Result<UnknownPayload, BackendError> {
        self.rank_calls.lock().unwrap().push(RankCall {
            token: token.map(str::to_string),
            file_name: form.resume_file.as_ref().map(|f| f.file_name.clone()),
            resume_text: form.resume_text.clone(),
            job_description: form.job_description.clone(),
        });
        canned(&self.rank).map(UnknownPayload::new)
    }

    async fn sign_in(&self, request: &SignInRequest) -> Result<AuthResponse, BackendError> {
        self.auth_response(&request.email)
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthResponse, BackendError> {
        self.auth_response(&request.email)
    }

    async fn list_evaluations(&self, _token: Option<&str>) -> Result<UnknownPayload, BackendError> {
        canned(&self.history).map(UnknownPayload::new)
    }

    async fn get_evaluation(
        &self,
        _id: i64,
        _token: Option<&str>,
    ) -> Result<UnknownPayload, BackendError> {
        canned(&self.evaluation).map(UnknownPayload::new)
    }
}
