//! Migo API library: domain model, repository adapters and HTTP surface.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use doc::{ApiDocV1, ApiDocV2};
