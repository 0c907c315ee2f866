//! Item creation endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    item::{Item, NewItem, create_item},
    response::ApiResponse,
};

/// The state needed for creating an item.
#[derive(Debug, Clone)]
pub struct CreateItemState {
    /// The database connection for managing items.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateItemState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new item, responds with the stored item.
pub async fn create_item_endpoint(
    State(state): State<CreateItemState>,
    payload: Result<Json<NewItem>, JsonRejection>,
) -> Result<ApiResponse<Item>, Error> {
    let Json(new_item) = payload?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let item = create_item(new_item, &connection)
        .inspect_err(|error| tracing::debug!("Could not create item: {error}"))?;

    tracing::info!(
        "Created item {}",
        endpoints::format_endpoint(endpoints::ITEM, item.id)
    );

    Ok(ApiResponse::ok(item))
}
