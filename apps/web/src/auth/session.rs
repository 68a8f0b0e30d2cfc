//! Session context — the one client-persisted credential.
//!
//! The token lives in an `HttpOnly` cookie. Handlers receive a `Session` as an
//! extractor, read it with `token()`, and change it with `set_token()` /
//! `clear()`. Returning the session alongside the response writes any change
//! back as a `Set-Cookie` header.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
    response::{IntoResponseParts, ResponseParts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::state::AppState;

pub const SESSION_COOKIE: &str = "token";
const SESSION_MAX_AGE_DAYS: i64 = 30;

#[derive(Debug, Clone)]
pub struct Session {
    jar: CookieJar,
    secure: bool,
}

impl Session {
    /// Reads the session from request headers. `secure` marks cookies written
    /// later with the `Secure` attribute.
    pub fn from_headers(headers: &HeaderMap, secure: bool) -> Self {
        Self {
            jar: CookieJar::from_headers(headers),
            secure,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            jar: CookieJar::new(),
            secure: false,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.jar
            .get(SESSION_COOKIE)
            .map(Cookie::value)
            .filter(|token| is_cookie_safe(token))
    }

    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }

    /// Stores a new token. Returns false, leaving the session untouched, when
    /// the token cannot be carried in a cookie.
    pub fn set_token(&mut self, token: impl Into<String>) -> bool {
        let token = token.into();
        if !is_cookie_safe(&token) {
            return false;
        }

        let cookie = Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(time::Duration::days(SESSION_MAX_AGE_DAYS));
        self.jar = self.jar.clone().add(cookie);
        true
    }

    pub fn clear(&mut self) {
        self.jar = self
            .jar
            .clone()
            .remove(Cookie::build(SESSION_COOKIE).path("/"));
    }
}

/// Non-empty and free of characters that would break a `Cookie` header.
pub fn is_cookie_safe(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_graphic() && !matches!(c, '"' | ',' | ';' | '\\'))
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Session::from_headers(
            &parts.headers,
            state.config.cookie_secure,
        ))
    }
}

impl IntoResponseParts for Session {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        self.jar.into_response_parts(res)
    }
}

#[cfg(test)]
impl Session {
    pub fn with_token(token: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            axum::http::HeaderValue::from_str(&format!("{SESSION_COOKIE}={token}")).unwrap(),
        );
        Self::from_headers(&headers, false)
    }
}
