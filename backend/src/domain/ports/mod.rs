//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod repository;

#[cfg(test)]
pub use repository::MockRepository;
pub use repository::{Repository, RepositoryError};
