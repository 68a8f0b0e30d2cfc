// Shared page chrome and the marketing pages.
// Pages are askama templates under `templates/`; `layout::render` turns one
// into an HTML response body.

pub mod home;
pub mod layout;
