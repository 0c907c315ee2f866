//! Items are the expenses and income recorded by users.
//!
//! This module contains everything related to items:
//! - The `Item` model and the `NewItem`/`ItemPatch` inputs for creating and changing items
//! - Database functions for storing, querying and removing items
//! - The JSON endpoints that expose those functions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod get_endpoint;
mod update_endpoint;

pub use core::{
    Item, ItemPatch, ItemType, NewItem, create_item, create_item_table, delete_item, get_item,
    list_items, update_item,
};
pub use create_endpoint::create_item_endpoint;
pub use delete_endpoint::delete_item_endpoint;
pub use get_endpoint::{get_item_endpoint, list_items_endpoint};
pub use update_endpoint::{update_item_by_body_endpoint, update_item_endpoint};
