use askama::Template;
use axum::response::Html;

use crate::errors::AppError;

/// Renders a page template. Every page extends `base.html`; askama escapes
/// interpolated values.
pub fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}
