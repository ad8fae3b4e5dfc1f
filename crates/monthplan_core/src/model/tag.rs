//! Tag domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a tag.
pub type TagId = Uuid;

/// Reusable label attachable to items.
///
/// `order` controls display sort only; it is not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub order: i64,
}

impl Tag {
    pub fn new(name: impl Into<String>, order: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            order,
        }
    }
}
