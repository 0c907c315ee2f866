//! Database ID type definitions.

use uuid::Uuid;

/// The ID of an item (an expense or income).
pub type ItemId = Uuid;
/// The ID of a category.
pub type CategoryId = Uuid;
/// The ID of the user that owns an item.
pub type UserId = i64;
