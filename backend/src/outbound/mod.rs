//! Outbound adapters implementing the repository port.
//!
//! - `persistence`: PostgreSQL through Diesel.
//! - `memory`: process-local store used when no database is configured.

pub mod memory;
pub mod persistence;
