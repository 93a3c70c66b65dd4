//! services/web/src/web/pages.rs
//!
//! Handlers for the HTML views and the CSV download.

use crate::error::ApiError;
use crate::web::params::ListParams;
use crate::web::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Local;
use inventory_core::commands::{Command, InventoryApp};
use inventory_core::domain::ProductId;
use std::sync::Arc;
use tracing::debug;

pub async fn dashboard_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let mut app = state.app.lock().await;
    let html = state.renderer.render_dashboard(&app.metrics_view())?;
    Ok(Html(html))
}

pub async fn analytics_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let mut app = state.app.lock().await;
    let html = state.renderer.render_analytics(&app.metrics_view())?;
    Ok(Html(html))
}

pub async fn settings_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let mut app = state.app.lock().await;
    let html = state.renderer.render_settings(&app.settings_view())?;
    Ok(Html(html))
}

/// The product listing. Query parameters, when present, replace the
/// corresponding parts of the session's query state.
pub async fn products_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, ApiError> {
    let mut app = state.app.lock().await;
    if !params.is_empty() {
        let target = params.apply_to(app.query())?;
        for command in ListParams::commands_for(target) {
            app.dispatch(command)?;
        }
    }
    render_listing(&state, &mut app)
}

pub async fn new_product_page(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ApiError> {
    let mut app = state.app.lock().await;
    app.dispatch(Command::OpenForm { id: None })?;
    render_listing(&state, &mut app)
}

/// Opens the edit form. An unknown id renders the listing with a warning.
pub async fn edit_product_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ProductId>,
) -> Result<Html<String>, ApiError> {
    let mut app = state.app.lock().await;
    app.dispatch(Command::OpenForm { id: Some(id) })?;
    render_listing(&state, &mut app)
}

/// Downloads the whole store as CSV. With nothing to export, redirects back
/// to the listing, which shows a warning.
pub async fn export_csv(State(state): State<Arc<AppState>>) -> Response {
    let mut app = state.app.lock().await;
    match app.export(Local::now().date_naive()) {
        Some(export) => {
            debug!("Serving {}", export.filename);
            (
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", export.filename),
                    ),
                ],
                export.content,
            )
                .into_response()
        }
        None => Redirect::to("/products").into_response(),
    }
}

fn render_listing(state: &AppState, app: &mut InventoryApp) -> Result<Html<String>, ApiError> {
    let html = state.renderer.render_products(&app.product_listing())?;
    Ok(Html(html))
}
