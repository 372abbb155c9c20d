//! Request middleware for tracing and authentication.

pub mod basic_auth;
pub mod trace;

pub use basic_auth::BasicAuth;
pub use trace::Trace;
