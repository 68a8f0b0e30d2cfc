use askama::Template;
use axum::response::Html;

use crate::errors::AppError;
use crate::models::OAuthProvider;
use crate::pages::layout::render;

pub const SIGN_IN_FAILED: &str = "Invalid credentials";
pub const SIGN_UP_FAILED: &str = "Sign up failed";

const PROVIDERS: [OAuthProvider; 2] = [OAuthProvider::Google, OAuthProvider::Github];

#[derive(Template)]
#[template(path = "signin.html")]
struct SignInPage<'a> {
    alert: Option<&'a str>,
    email: &'a str,
    providers: [OAuthProvider; 2],
}

#[derive(Template)]
#[template(path = "signup.html")]
struct SignUpPage<'a> {
    alert: Option<&'a str>,
    full_name: &'a str,
    email: &'a str,
    providers: [OAuthProvider; 2],
}

/// Sign-in form. `email` is echoed back after a failed attempt.
pub fn sign_in_page(failure: Option<&str>, email: &str) -> Result<Html<String>, AppError> {
    render(&SignInPage {
        alert: failure,
        email,
        providers: PROVIDERS,
    })
}

/// Sign-up form. Name and email are echoed back after a failed attempt.
pub fn sign_up_page(
    failure: Option<&str>,
    full_name: &str,
    email: &str,
) -> Result<Html<String>, AppError> {
    render(&SignUpPage {
        alert: failure,
        full_name,
        email,
        providers: PROVIDERS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_page_without_alert() {
        let Html(html) = sign_in_page(None, "").unwrap();
        assert!(!html.contains(r#"role="alert""#));
        assert!(html.contains(r#"href="/oauth2/authorize/google""#));
        assert!(html.contains(r#"href="/oauth2/authorize/github""#));
    }

    #[test]
    fn test_sign_up_page_echoes_escaped_input() {
        let Html(html) = sign_up_page(Some(SIGN_UP_FAILED), "<Ada>", "ada@example.com").unwrap();
        assert!(html.contains("Sign up failed"));
        assert!(html.contains(r#"value="&lt;Ada&gt;""#));
        assert!(html.contains(r#"value="ada@example.com""#));
    }
}
