use askama::Template;
use axum::response::Html;

use crate::errors::AppError;
use crate::pages::layout::render;

struct Feature {
    title: &'static str,
    description: &'static str,
}

const FEATURES: &[Feature] = &[
    Feature {
        title: "Match Score Analysis",
        description: "Get precise matching scores between your resume and job descriptions",
    },
    Feature {
        title: "ATS Optimization",
        description: "Ensure your resume passes Applicant Tracking Systems with high scores",
    },
    Feature {
        title: "AI Suggestions",
        description: "Receive intelligent recommendations to improve your resume content",
    },
    Feature {
        title: "Instant Results",
        description: "Get comprehensive analysis in seconds, not hours",
    },
    Feature {
        title: "Secure & Private",
        description: "Your data is encrypted and never shared with third parties",
    },
    Feature {
        title: "Skills Gap Analysis",
        description: "Identify missing skills and keywords to strengthen your application",
    },
];

#[derive(Template)]
#[template(path = "home.html")]
struct HomePage {
    features: &'static [Feature],
}

/// GET /
pub async fn handle_home() -> Result<Html<String>, AppError> {
    render(&HomePage { features: FEATURES })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_home_links_to_auth_and_analysis() {
        let Html(html) = handle_home().await.unwrap();
        assert!(html.contains(r#"href="/signup""#));
        assert!(html.contains(r#"href="/signin""#));
        assert!(html.contains(r#"href="/analyze""#));
        assert!(html.contains("Secure &amp; Private"));
    }
}
