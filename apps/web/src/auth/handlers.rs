use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::auth::session::Session;
use crate::auth::views::{sign_in_page, sign_up_page, SIGN_IN_FAILED, SIGN_UP_FAILED};
use crate::backend_client::BackendError;
use crate::errors::AppError;
use crate::models::{AuthResponse, OAuthProvider, SignInRequest, SignUpRequest};
use crate::state::AppState;

const AFTER_SIGN_IN: &str = "/analyze";

#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub token: Option<String>,
}

/// Stores the issued token, if any. False when the backend answered without
/// a usable token or the call failed.
fn persist_token(
    session: &mut Session,
    outcome: Result<AuthResponse, BackendError>,
    flow: &str,
) -> bool {
    match outcome {
        Ok(AuthResponse { token: Some(token) }) => {
            if session.set_token(token) {
                true
            } else {
                warn!("{flow}: backend issued a token that cannot be stored");
                false
            }
        }
        Ok(AuthResponse { token: None }) => {
            warn!("{flow}: backend response carried no token");
            false
        }
        Err(e) => {
            warn!("{flow} failed: {e}");
            false
        }
    }
}

/// GET /signin
pub async fn handle_sign_in_page() -> Result<Html<String>, AppError> {
    sign_in_page(None, "")
}

/// POST /signin
///
/// Relays the credentials to the backend. On success the token is stored and
/// the user lands on the analysis page; otherwise the form comes back with a
/// generic alert.
pub async fn handle_sign_in(
    State(state): State<AppState>,
    mut session: Session,
    Form(request): Form<SignInRequest>,
) -> Result<Response, AppError> {
    debug!("Sign-in attempt: {request:?}");
    let outcome = state.backend.sign_in(&request).await;

    if persist_token(&mut session, outcome, "Sign-in") {
        info!("Sign-in succeeded");
        return Ok((session, Redirect::to(AFTER_SIGN_IN)).into_response());
    }

    Ok((
        StatusCode::UNAUTHORIZED,
        sign_in_page(Some(SIGN_IN_FAILED), &request.email)?,
    )
        .into_response())
}

/// GET /signup
pub async fn handle_sign_up_page() -> Result<Html<String>, AppError> {
    sign_up_page(None, "", "")
}

/// POST /signup
pub async fn handle_sign_up(
    State(state): State<AppState>,
    mut session: Session,
    Form(request): Form<SignUpRequest>,
) -> Result<Response, AppError> {
    debug!("Sign-up attempt: {request:?}");
    let outcome = state.backend.sign_up(&request).await;

    if persist_token(&mut session, outcome, "Sign-up") {
        info!("Sign-up succeeded");
        return Ok((session, Redirect::to(AFTER_SIGN_IN)).into_response());
    }

    Ok((
        StatusCode::BAD_REQUEST,
        sign_up_page(Some(SIGN_UP_FAILED), &request.full_name, &request.email)?,
    )
        .into_response())
}

/// GET /oauth2/authorize/:provider
///
/// Sends the browser to the backend, which runs the provider flow and comes
/// back to `/oauth2/callback`.
pub async fn handle_oauth_authorize(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> Result<Redirect, AppError> {
    let provider: OAuthProvider = provider.parse().map_err(AppError::NotFound)?;
    Ok(Redirect::to(
        &provider.authorization_url(&state.config.backend_url),
    ))
}

/// GET /oauth2/callback?token=…
pub async fn handle_oauth_callback(
    mut session: Session,
    Query(query): Query<OAuthCallbackQuery>,
) -> (Session, Redirect) {
    if session.set_token(query.token.unwrap_or_default()) {
        info!("OAuth sign-in succeeded");
        return (session, Redirect::to(AFTER_SIGN_IN));
    }

    warn!("OAuth callback without a usable token");
    (session, Redirect::to("/signin"))
}

/// POST /signout
pub async fn handle_sign_out(mut session: Session) -> (Session, Redirect) {
    session.clear();
    (session, Redirect::to("/"))
}
