//! User data model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::entity::{Entity, EntityId, EntityValidationError, require};

/// Application user.
///
/// `userName` is unique across the store once trimmed and lowercased. The
/// password is opaque and kept exactly as supplied.
///
/// # Examples
/// ```
/// use migo_api::domain::{Entity, User};
///
/// let user = User::new("texmo", "p", "a", "b").with_age(24);
/// assert_eq!(user.display_key(), Some("texmo"));
/// assert!(user.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier; ignored on create.
    #[serde(default)]
    pub id: EntityId,
    /// Login name, unique ignoring case and surrounding whitespace.
    #[serde(default, alias = "username")]
    #[schema(example = "texmo")]
    pub user_name: String,
    /// Stored as supplied.
    #[serde(default)]
    #[schema(example = "p")]
    pub password: String,
    /// Given name.
    #[serde(default)]
    #[schema(example = "Isaac")]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    #[schema(example = "Ramirez")]
    pub last_name: String,
    /// Age in years.
    #[serde(default)]
    #[schema(example = 24)]
    pub age: i32,
}

impl User {
    /// Build an unsaved user with age zero.
    #[must_use]
    pub fn new(
        user_name: impl Into<String>,
        password: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: EntityId::default(),
            user_name: user_name.into(),
            password: password.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            age: 0,
        }
    }

    /// Replace the age.
    #[must_use]
    pub fn with_age(mut self, age: i32) -> Self {
        self.age = age;
        self
    }
}

impl Entity for User {
    const KIND: &'static str = "user";

    fn id(&self) -> EntityId {
        self.id
    }

    fn with_id(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }

    fn display_key(&self) -> Option<&str> {
        Some(self.user_name.as_str())
    }

    fn validate(&self) -> Result<(), EntityValidationError> {
        require(&self.user_name, "userName")?;
        require(&self.password, "password")?;
        require(&self.first_name, "firstName")?;
        require(&self.last_name, "lastName")
    }
}
