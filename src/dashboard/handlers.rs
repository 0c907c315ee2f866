//! Dashboard HTTP handler.

use std::sync::{Arc, Mutex};

use axum::extract::{FromRef, Query, State, rejection::QueryRejection};
use rusqlite::Connection;

use crate::{
    AppState, Error, UserFilter,
    dashboard::{DashboardData, get_dashboard_data},
    response::ApiResponse,
};

/// The state needed for the dashboard data endpoint.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading items.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that responds with the dashboard aggregates, optionally for
/// only the user given by `?user_id=`.
pub async fn get_dashboard_data_endpoint(
    State(state): State<DashboardState>,
    query: Result<Query<UserFilter>, QueryRejection>,
) -> Result<ApiResponse<DashboardData>, Error> {
    let Query(filter) = query?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let data = get_dashboard_data(filter, &connection)?;

    Ok(ApiResponse::ok(data))
}
