//! Application router configuration.

use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::cors::CorsLayer;

use crate::{
    AppState,
    category::get_categories_endpoint,
    dashboard::get_dashboard_data_endpoint,
    endpoints,
    item::{
        create_item_endpoint, delete_item_endpoint, get_item_endpoint, list_items_endpoint,
        update_item_by_body_endpoint, update_item_endpoint,
    },
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
///
/// Cross-origin requests are allowed from any origin so that a browser
/// front end served from elsewhere can call the API.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::HELLO, get(get_hello))
        .route(endpoints::HELLO_API, get(get_hello))
        .route(endpoints::POST_ITEM, post(create_item_endpoint))
        .route(endpoints::ITEMS, get(list_items_endpoint))
        .route(
            endpoints::ITEM,
            get(get_item_endpoint)
                .patch(update_item_endpoint)
                .delete(delete_item_endpoint),
        )
        .route(
            endpoints::PATCH_ITEM_BY_BODY,
            patch(update_item_by_body_endpoint),
        )
        .route(endpoints::DASHBOARD_DATA, get(get_dashboard_data_endpoint))
        .route(endpoints::CATEGORIES, get(get_categories_endpoint))
        .fallback(get_404_not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn get_hello() -> &'static str {
    "Welcome"
}
