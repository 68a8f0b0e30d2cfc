pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::auth::handlers as auth;
use crate::pages::home;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(home::handle_home))
        // Auth pages
        .route(
            "/signin",
            get(auth::handle_sign_in_page).post(auth::handle_sign_in),
        )
        .route(
            "/signup",
            get(auth::handle_sign_up_page).post(auth::handle_sign_up),
        )
        .route("/signout", post(auth::handle_sign_out))
        .route(
            "/oauth2/authorize/:provider",
            get(auth::handle_oauth_authorize),
        )
        .route("/oauth2/callback", get(auth::handle_oauth_callback))
        // Analysis pages
        .route(
            "/analyze",
            get(analysis::handle_analyze_page).post(analysis::handle_analyze),
        )
        .route("/history", get(analysis::handle_history))
        .route("/history/:id", get(analysis::handle_history_entry))
        .layer(body_limit)
        .with_state(state)
}
