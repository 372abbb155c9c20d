//! Inbound adapters translating HTTP requests into repository calls.

pub mod http;
