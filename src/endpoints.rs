//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/v1/items/{item_id}', use [format_endpoint].

use std::fmt::Display;

/// A plain text greeting, useful for checking that the server is up.
pub const HELLO: &str = "/hello";
/// The same greeting as [HELLO], under the versioned API prefix.
pub const HELLO_API: &str = "/api/v1/hello";
/// The route for creating an item.
pub const POST_ITEM: &str = "/api/v1/item";
/// The route for listing items.
pub const ITEMS: &str = "/api/v1/items";
/// The route for getting, updating or deleting a single item.
pub const ITEM: &str = "/api/v1/items/{item_id}";
/// The route for updating an item whose ID is given in the request body.
pub const PATCH_ITEM_BY_BODY: &str = "/api/v1/update/item";
/// The route for getting the dashboard aggregates.
pub const DASHBOARD_DATA: &str = "/api/v1/dashboard-data";
/// The route for listing categories.
pub const CATEGORIES: &str = "/api/v1/categories";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// If `endpoint_path` does not contain a parameter, it is returned unchanged.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_endpoint("/api/v1/items/{item_id}", 1), "/api/v1/items/1");
/// ```
pub fn format_endpoint(endpoint_path: &str, id: impl Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
