// Resume analysis: form state, submission, sanitizing, fallback content, and
// the analysis/history pages. Backend bodies are untrusted; everything shown
// goes through `sanitizer::normalize` and `fallback::resolve` first.

pub mod fallback;
pub mod form;
pub mod handlers;
pub mod sanitizer;
pub mod submission;
pub mod views;
