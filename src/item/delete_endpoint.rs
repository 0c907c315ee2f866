//! Item deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::extract::{FromRef, Path, State, rejection::PathRejection};
use rusqlite::Connection;
use serde_json::Value;

use crate::{AppState, Error, ItemId, item::delete_item, response::ApiResponse};

/// The state needed for deleting an item.
#[derive(Debug, Clone)]
pub struct DeleteItemState {
    /// The database connection for managing items.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteItemState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting an item.
///
/// Deleting an item that does not exist still succeeds, so clients can safely retry.
pub async fn delete_item_endpoint(
    State(state): State<DeleteItemState>,
    item_id: Result<Path<ItemId>, PathRejection>,
) -> Result<ApiResponse<Value>, Error> {
    let Path(item_id) = item_id?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    delete_item(item_id, &connection)
        .inspect_err(|error| tracing::error!("Could not delete item {item_id}: {error}"))?;

    Ok(ApiResponse::ok(Value::Null))
}

#[cfg(test)]
mod delete_item_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use rusqlite::Connection;
    use serde_json::Value;
    use uuid::Uuid;

    use crate::{
        Error,
        category::{CategoryName, create_category},
        db::initialize,
        item::{Item, ItemType, create_item, get_item},
    };

    use super::{DeleteItemState, delete_item_endpoint};

    fn get_test_state() -> DeleteItemState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        DeleteItemState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn deletes_item() {
        let state = get_test_state();
        let item = {
            let connection = state.db_connection.lock().unwrap();
            let food = create_category(CategoryName::new_unchecked("Food"), &connection).unwrap();
            create_item(
                Item::build("Coffee", 4.5, ItemType::Debit, food.id, 1),
                &connection,
            )
            .unwrap()
        };

        let response = delete_item_endpoint(State(state.clone()), Ok(Path(item.id)))
            .await
            .expect("Could not delete item");

        assert_eq!(response.data, Value::Null);
        let result = get_item(item.id, &state.db_connection.lock().unwrap());
        assert_eq!(result, Err(Error::NotFound));
    }

    #[tokio::test]
    async fn deleting_missing_item_succeeds() {
        let state = get_test_state();

        let result = delete_item_endpoint(State(state), Ok(Path(Uuid::new_v4()))).await;

        assert!(result.is_ok());
    }
}
