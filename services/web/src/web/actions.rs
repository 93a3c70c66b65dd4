//! services/web/src/web/actions.rs
//!
//! The form-post endpoint. Each HTML form posts to `/actions/{action}`; the
//! action is run through the command table and the browser is redirected
//! back to the page it came from.

use crate::error::ApiError;
use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    response::Redirect,
    Form,
};
use inventory_core::commands::Command;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

const DEFAULT_RETURN: &str = "/products";

pub async fn action_handler(
    State(state): State<Arc<AppState>>,
    Path(action): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, ApiError> {
    let command = Command::from_form(&action, &fields)?;
    let mut app = state.app.lock().await;
    // A failed write has already queued an error notice for the next page.
    if let Err(e) = app.dispatch(command) {
        warn!("Action {} was not applied: {}", action, e);
    }
    Ok(Redirect::to(return_target(fields.get("return_to"))))
}

/// Only same-origin absolute paths are followed.
fn return_target(requested: Option<&String>) -> &str {
    match requested.map(String::as_str) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => DEFAULT_RETURN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_target_stays_on_this_site() {
        let local = "/settings".to_string();
        let foreign = "//evil.example/".to_string();
        let absolute = "https://evil.example/".to_string();
        assert_eq!(return_target(Some(&local)), "/settings");
        assert_eq!(return_target(Some(&foreign)), DEFAULT_RETURN);
        assert_eq!(return_target(Some(&absolute)), DEFAULT_RETURN);
        assert_eq!(return_target(None), DEFAULT_RETURN);
    }
}
