//! Endpoints for reading items.

use std::sync::{Arc, Mutex};

use axum::extract::{
    FromRef, Path, Query, State,
    rejection::{PathRejection, QueryRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error, ItemId, UserFilter,
    item::{Item, get_item, list_items},
    response::ApiResponse,
};

/// The state needed for reading items.
#[derive(Debug, Clone)]
pub struct GetItemsState {
    /// The database connection for managing items.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for GetItemsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that lists items, optionally only those of the user given by `?user_id=`.
pub async fn list_items_endpoint(
    State(state): State<GetItemsState>,
    query: Result<Query<UserFilter>, QueryRejection>,
) -> Result<ApiResponse<Vec<Item>>, Error> {
    let Query(filter) = query?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let items = list_items(filter, &connection)?;

    Ok(ApiResponse::ok(items))
}

/// A route handler that responds with a single item.
pub async fn get_item_endpoint(
    State(state): State<GetItemsState>,
    item_id: Result<Path<ItemId>, PathRejection>,
) -> Result<ApiResponse<Item>, Error> {
    let Path(item_id) = item_id?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let item = get_item(item_id, &connection)?;

    Ok(ApiResponse::ok(item))
}

#[cfg(test)]
mod get_item_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, Query, State};
    use rusqlite::Connection;
    use uuid::Uuid;

    use crate::{
        CategoryId, Error, UserFilter,
        category::{CategoryName, create_category},
        db::initialize,
        item::{Item, ItemType, create_item},
    };

    use super::{GetItemsState, get_item_endpoint, list_items_endpoint};

    fn get_test_state() -> (GetItemsState, CategoryId) {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");
        let food = create_category(CategoryName::new_unchecked("Food"), &connection)
            .expect("Could not create test category");

        let state = GetItemsState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        (state, food.id)
    }

    fn insert_item(
        name: &str,
        user_id: i64,
        category_id: CategoryId,
        state: &GetItemsState,
    ) -> Item {
        create_item(
            Item::build(name, 10.0, ItemType::Debit, category_id, user_id),
            &state.db_connection.lock().unwrap(),
        )
        .expect("Could not create test item")
    }

    #[tokio::test]
    async fn get_returns_item() {
        let (state, category_id) = get_test_state();
        let item = insert_item("Coffee", 1, category_id, &state);

        let response = get_item_endpoint(State(state), Ok(Path(item.id)))
            .await
            .expect("Could not get item");

        assert_eq!(response.data, item);
    }

    #[tokio::test]
    async fn get_unknown_item_returns_not_found() {
        let (state, _) = get_test_state();

        let result = get_item_endpoint(State(state), Ok(Path(Uuid::new_v4()))).await;

        assert_eq!(result, Err(Error::NotFound));
    }

    #[tokio::test]
    async fn list_filters_by_user() {
        let (state, category_id) = get_test_state();
        let mine = insert_item("Coffee", 1, category_id, &state);
        insert_item("Tea", 2, category_id, &state);

        let response = list_items_endpoint(State(state), Ok(Query(UserFilter::user(1))))
            .await
            .expect("Could not list items");

        assert_eq!(response.data, vec![mine]);
    }
}
