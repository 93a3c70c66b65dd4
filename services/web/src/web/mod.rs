pub mod actions;
pub mod pages;
pub mod params;
pub mod rest;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use state::AppState;
use std::sync::Arc;

/// Builds the router for the HTML views, the form actions and the JSON API.
pub fn app_router(state: Arc<AppState>) -> Router {
    let pages = Router::new()
        .route("/", get(pages::dashboard_page))
        .route("/dashboard", get(pages::dashboard_page))
        .route("/products", get(pages::products_page))
        .route("/products/new", get(pages::new_product_page))
        .route("/products/{id}/edit", get(pages::edit_product_page))
        .route("/analytics", get(pages::analytics_page))
        .route("/settings", get(pages::settings_page))
        .route("/export.csv", get(pages::export_csv))
        .route("/actions/{action}", post(actions::action_handler));

    let api = Router::new()
        .route("/api/products", get(rest::list_products_handler))
        .route("/api/summary", get(rest::summary_handler))
        .route("/api/commands", post(rest::command_handler));

    Router::new().merge(pages).merge(api).with_state(state)
}
