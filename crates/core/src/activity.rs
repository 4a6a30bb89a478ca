//! Activity log vocabulary.
//!
//! The activity log is an advisory audit trail: entries are written on a
//! best-effort basis after the primary operation has succeeded.

use std::fmt;

use crate::types::JsonObject;

/// What happened to the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityAction {
    Create,
    Update,
    Delete,
}

impl ActivityAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of entity an activity entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Client,
    Fabric,
    Order,
    Product,
    Event,
    User,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => "CLIENT",
            Self::Fabric => "FABRIC",
            Self::Order => "ORDER",
            Self::Product => "PRODUCT",
            Self::Event => "EVENT",
            Self::User => "USER",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build an activity details object from a `serde_json::json!({...})` value.
///
/// Non-object values are wrapped under a `"value"` key so the stored payload
/// is always an object.
pub fn details(value: serde_json::Value) -> JsonObject {
    match value {
        serde_json::Value::Object(map) => map,
        serde_json::Value::Null => JsonObject::new(),
        other => {
            let mut map = JsonObject::new();
            map.insert("value".into(), other);
            map
        }
    }
}

/// Display timestamp used by the activity feed, e.g. `Mar 04, 02:15 PM`.
pub fn feed_timestamp(at: crate::types::Timestamp) -> String {
    at.format("%b %d, %I:%M %p").to_string()
}
