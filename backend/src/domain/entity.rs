//! Shared identity and validation contract for persisted records.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Store-assigned integer identifier.
///
/// Identifiers are assigned by the store on insert and never change
/// afterwards. Values below one never name a stored record.
///
/// # Examples
/// ```
/// use migo_api::domain::EntityId;
///
/// let id = EntityId::new(7);
/// assert!(id.is_assigned());
/// assert!(!EntityId::default().is_assigned());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(example = 1)]
pub struct EntityId(i32);

impl EntityId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// True when the value could name a stored record.
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        self.0 > 0
    }
}

impl From<i32> for EntityId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation failures for inbound entity payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntityValidationError {
    /// A required field is absent or blank.
    #[error("{field} is required")]
    MissingField {
        /// JSON name of the field.
        field: &'static str,
    },
}

impl EntityValidationError {
    /// JSON name of the offending field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } => field,
        }
    }

    /// Stable machine-readable reason.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing",
        }
    }
}

/// A record owned by the store and handled through a repository.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Label used in log fields and error messages.
    const KIND: &'static str;

    /// Identifier, unassigned until the store has inserted the record.
    fn id(&self) -> EntityId;

    /// Return a copy carrying the given identifier.
    #[must_use]
    fn with_id(self, id: EntityId) -> Self;

    /// Name used for ordering and uniqueness checks, if the record has one.
    fn display_key(&self) -> Option<&str>;

    /// Check required fields before the record reaches a repository.
    ///
    /// # Errors
    /// Returns the first missing or blank required field.
    fn validate(&self) -> Result<(), EntityValidationError> {
        Ok(())
    }
}

/// Canonical form used when comparing names: trimmed and lowercased.
///
/// # Examples
/// ```
/// use migo_api::domain::normalise_name;
///
/// assert_eq!(normalise_name("  Bob "), "bob");
/// ```
#[must_use]
pub fn normalise_name(name: &str) -> String {
    name.trim().to_lowercase()
}

pub(crate) fn require(value: &str, field: &'static str) -> Result<(), EntityValidationError> {
    if value.trim().is_empty() {
        return Err(EntityValidationError::MissingField { field });
    }
    Ok(())
}
