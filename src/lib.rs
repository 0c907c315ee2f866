//! Expense tracker is a small web API for recording expenses and income and
//! summarising them on a dashboard.
//!
//! This library provides the data access layer for items (expenses and
//! income) and categories, the aggregate queries behind the dashboard and a
//! REST API that serves them as JSON.

#![warn(missing_docs)]

use std::{fmt::Display, net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod category;
mod config;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod filter;
mod item;
mod logging;
mod not_found;
mod response;
mod routing;

pub use app_state::AppState;
pub use category::{Category, CategoryName, create_category, get_all_categories, get_category};
pub use config::{AppEnv, ServerConfig};
pub use dashboard::{
    CategoryTotal, DashboardData, DashboardSection, IncomeVsExpenses, MonthlyTotal,
    get_dashboard_data,
};
pub use database_id::{CategoryId, ItemId, UserId};
pub use db::initialize as initialize_db;
pub use filter::UserFilter;
pub use item::{
    Item, ItemPatch, ItemType, NewItem, create_item, delete_item, get_item, list_items,
    update_item,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use response::ApiResponse;
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
///
/// Every variant belongs to exactly one [ErrorKind], which decides how the
/// error is reported to API clients.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request body, path parameters or query string could not be parsed.
    ///
    /// The string describes what was wrong with the request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An item was given a cost that is negative, infinite or not a number.
    #[error("{0} is not a valid cost, the cost must be a finite number that is zero or greater")]
    InvalidCost(f64),

    /// An empty string was used to create a category name.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// An update was requested that did not contain any fields to change.
    #[error("the update must change at least one field")]
    EmptyPatch,

    /// The category ID used to create or update an item did not match a valid category.
    #[error("the category ID {0} does not refer to a valid category")]
    InvalidCategory(CategoryId),

    /// The client supplied an item ID that is already in use.
    #[error("an item with the ID {0} already exists")]
    DuplicateItemId(ItemId),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update an item that does not exist.
    #[error("tried to update an item that is not in the database")]
    UpdateMissingItem,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// One of the dashboard queries failed, so no dashboard data is returned.
    #[error("could not get the dashboard {section} data: {source}")]
    DashboardQuery {
        /// The part of the dashboard whose query failed.
        section: DashboardSection,
        /// The error returned by the failed query.
        source: rusqlite::Error,
    },

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

/// The broad classes of [Error] that the API distinguishes between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The client sent malformed or invalid input.
    Validation,
    /// A point lookup did not match any row.
    NotFound,
    /// The storage layer failed, e.g. a lock, connection or SQL error.
    Persistence,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            ErrorKind::Validation => "validation error",
            ErrorKind::NotFound => "not found",
            ErrorKind::Persistence => "persistence error",
        };

        write!(f, "{text}")
    }
}

impl Error {
    /// The class of error, used to pick the HTTP status code.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidRequest(_)
            | Error::InvalidCost(_)
            | Error::EmptyCategoryName
            | Error::EmptyPatch
            | Error::InvalidCategory(_)
            | Error::DuplicateItemId(_) => ErrorKind::Validation,
            Error::NotFound | Error::UpdateMissingItem => ErrorKind::NotFound,
            Error::SqlError(_) | Error::DashboardQuery { .. } | Error::DatabaseLockError => {
                ErrorKind::Persistence
            }
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let kind = self.kind();

        let (status, error_message) = match kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, self.to_string()),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            // Storage errors are not intended to be shown to the client.
            ErrorKind::Persistence => {
                tracing::error!("An unexpected error occurred: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                )
            }
        };

        let body = Json(json!({
            "message": kind.to_string(),
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
