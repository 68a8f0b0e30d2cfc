// Auth Pages: sign-in, sign-up, OAuth redirect + callback, sign-out.
// Credential checks happen in the backend; this module only relays forms and
// keeps the issued token in the session cookie.

pub mod handlers;
pub mod session;
pub mod views;
