//! Item update endpoints.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{
        FromRef, Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, CategoryId, Error, ItemId, UserId,
    item::{Item, ItemPatch, ItemType, get_item, update_item},
    response::ApiResponse,
};

/// The state needed to update an item.
#[derive(Debug, Clone)]
pub struct UpdateItemState {
    /// The database connection for managing items.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateItemState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A request body for the update route that carries the item ID alongside the changes.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemPatchWithId {
    id: ItemId,
    name: Option<String>,
    cost: Option<f64>,
    #[serde(rename = "type")]
    type_: Option<ItemType>,
    category_id: Option<CategoryId>,
    user_id: Option<UserId>,
}

impl ItemPatchWithId {
    fn into_parts(self) -> (ItemId, ItemPatch) {
        let patch = ItemPatch {
            name: self.name,
            cost: self.cost,
            type_: self.type_,
            category_id: self.category_id,
            user_id: self.user_id,
        };

        (self.id, patch)
    }
}

/// A route handler for partially updating the item given in the path.
///
/// Responds with the item as it is after the update.
pub async fn update_item_endpoint(
    State(state): State<UpdateItemState>,
    item_id: Result<Path<ItemId>, PathRejection>,
    payload: Result<Json<ItemPatch>, JsonRejection>,
) -> Result<ApiResponse<Item>, Error> {
    let Path(item_id) = item_id?;
    let Json(patch) = payload?;

    apply_patch(item_id, patch, &state)
}

/// A route handler for partially updating the item whose ID is given in the request body.
pub async fn update_item_by_body_endpoint(
    State(state): State<UpdateItemState>,
    payload: Result<Json<ItemPatchWithId>, JsonRejection>,
) -> Result<ApiResponse<Item>, Error> {
    let Json(payload) = payload?;
    let (item_id, patch) = payload.into_parts();

    apply_patch(item_id, patch, &state)
}

fn apply_patch(
    item_id: ItemId,
    patch: ItemPatch,
    state: &UpdateItemState,
) -> Result<ApiResponse<Item>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    update_item(item_id, patch, &connection)
        .inspect_err(|error| tracing::debug!("Could not update item {item_id}: {error}"))?;

    let item = get_item(item_id, &connection)?;

    Ok(ApiResponse::ok(item))
}
