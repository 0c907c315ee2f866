//! The fallback handler for routes that do not exist.

use axum::{
    http::Uri,
    response::{IntoResponse, Response},
};

use crate::Error;

/// Respond with the JSON 404 error body for a route that does not exist.
pub async fn get_404_not_found(uri: Uri) -> Response {
    tracing::debug!("No route for {uri}");

    Error::NotFound.into_response()
}
