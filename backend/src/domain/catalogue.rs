//! Lists, items and viewing progress records.
//!
//! Only the user resource is exposed over HTTP today; these records share the
//! repository contract so additional resources plug into the same adapters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::entity::{Entity, EntityId, EntityValidationError, require};

/// Named collection of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct List {
    /// Store-assigned identifier.
    #[serde(default)]
    pub id: EntityId,
    /// Display name of the list.
    #[serde(default)]
    pub name: String,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Number of items currently in the list.
    #[serde(default)]
    pub items_counter: i32,
}

/// Category an item belongs to, such as "anime" or "series".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemType {
    /// Store-assigned identifier.
    #[serde(default)]
    pub id: EntityId,
    /// Category name.
    #[serde(default)]
    pub name: String,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A watchable title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Store-assigned identifier.
    #[serde(default)]
    pub id: EntityId,
    /// Title of the series or anime.
    #[serde(default)]
    pub name: String,
    /// Total episode count.
    #[serde(default)]
    pub episodes: i32,
    /// Free-text genre label.
    #[serde(default)]
    pub genre: String,
    /// Viewer rating.
    #[serde(default)]
    pub rating: f64,
    /// Synopsis.
    #[serde(default)]
    pub description: String,
    /// Cover image location.
    #[serde(default)]
    pub image_url: String,
    /// Category the item belongs to.
    pub type_id: EntityId,
}

/// Progress checkpoint recorded on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Store-assigned identifier.
    #[serde(default)]
    pub id: EntityId,
    /// When the checkpoint was recorded.
    pub date: DateTime<Utc>,
    /// Episodes watched as of `date`.
    pub episodes_watched: i32,
}

/// Ownership link between a user and a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// Store-assigned identifier.
    #[serde(default)]
    pub id: EntityId,
    /// Owning user.
    pub user_id: EntityId,
    /// Owned list.
    pub list_id: EntityId,
}

/// Membership of an item in a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListDetail {
    /// Store-assigned identifier.
    #[serde(default)]
    pub id: EntityId,
    /// Containing list.
    pub list_id: EntityId,
    /// Listed item.
    pub item_id: EntityId,
}

/// Item a progress checkpoint refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackDetail {
    /// Store-assigned identifier.
    #[serde(default)]
    pub id: EntityId,
    /// Progress checkpoint.
    pub track_id: EntityId,
    /// Item the checkpoint refers to.
    pub item_id: EntityId,
}

macro_rules! impl_entity {
    ($ty:ty, $kind:literal, named) => {
        impl Entity for $ty {
            const KIND: &'static str = $kind;

            fn id(&self) -> EntityId {
                self.id
            }

            fn with_id(mut self, id: EntityId) -> Self {
                self.id = id;
                self
            }

            fn display_key(&self) -> Option<&str> {
                Some(self.name.as_str())
            }

            fn validate(&self) -> Result<(), EntityValidationError> {
                require(&self.name, "name")
            }
        }
    };
    ($ty:ty, $kind:literal) => {
        impl Entity for $ty {
            const KIND: &'static str = $kind;

            fn id(&self) -> EntityId {
                self.id
            }

            fn with_id(mut self, id: EntityId) -> Self {
                self.id = id;
                self
            }

            fn display_key(&self) -> Option<&str> {
                None
            }
        }
    };
}

impl_entity!(List, "list", named);
impl_entity!(ItemType, "type", named);
impl_entity!(Item, "item", named);
impl_entity!(Track, "track");
impl_entity!(Content, "content");
impl_entity!(ListDetail, "list_detail");
impl_entity!(TrackDetail, "track_detail");

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn list_defaults_counter_and_omits_missing_description() {
        let list: List = serde_json::from_value(json!({ "name": "Watching" }))
            .expect("list deserialises");
        assert_eq!(list.items_counter, 0);
        let value = serde_json::to_value(&list).expect("serialise list");
        assert_eq!(value, json!({ "id": 0, "name": "Watching", "itemsCounter": 0 }));
    }

    #[rstest]
    fn item_requires_type_id() {
        let result = serde_json::from_value::<Item>(json!({ "name": "Trigun" }));
        assert!(result.is_err());
    }

    #[rstest]
    fn item_defaults_numeric_fields() {
        let item: Item = serde_json::from_value(json!({ "name": "Trigun", "typeId": 2 }))
            .expect("item deserialises");
        assert_eq!(item.episodes, 0);
        assert!(item.rating.abs() < f64::EPSILON);
        assert_eq!(item.type_id, EntityId::new(2));
    }

    #[rstest]
    fn named_entities_reject_blank_names() {
        let list = List {
            id: EntityId::default(),
            name: "  ".to_owned(),
            description: None,
            items_counter: 0,
        };
        let err = list.validate().expect_err("blank name rejected");
        assert_eq!(err.field(), "name");
    }

    #[rstest]
    fn join_records_have_no_display_key() {
        let detail = ListDetail {
            id: EntityId::new(1),
            list_id: EntityId::new(2),
            item_id: EntityId::new(3),
        };
        assert!(detail.display_key().is_none());
        assert!(detail.validate().is_ok());
    }

    #[rstest]
    fn track_round_trips_timestamp() {
        let track: Track = serde_json::from_value(json!({
            "date": "2024-05-01T12:00:00Z",
            "episodesWatched": 3
        }))
        .expect("track deserialises");
        assert_eq!(track.episodes_watched, 3);
        assert_eq!(track.date.to_rfc3339(), "2024-05-01T12:00:00+00:00");
    }
}
