pub mod auth;
pub mod evaluation;

pub use auth::{AuthResponse, OAuthProvider, SignInRequest, SignUpRequest};
pub use evaluation::{EvaluationRecord, EvaluationResult, UnknownPayload};
