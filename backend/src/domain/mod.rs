//! Domain primitives and the ports adapters implement.
//!
//! Public surface:
//! - `Entity`, `EntityId`: identity contract shared by every record.
//! - `User` plus the list/item/track records in `catalogue`.
//! - `Error`, `ErrorCode`: transport-agnostic failure payload.
//! - `TraceId`: request correlation identifier.

pub mod catalogue;
pub mod entity;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::catalogue::{Content, Item, ItemType, List, ListDetail, Track, TrackDetail};
pub use self::entity::{Entity, EntityId, EntityValidationError, normalise_name};
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::User;
