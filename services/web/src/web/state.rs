//! services/web/src/web/state.rs
//!
//! Defines the application's shared state.

use inventory_core::commands::InventoryApp;
use inventory_core::ports::ViewRenderer;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The shared application state, created once at startup and passed to all handlers.
///
/// Every handler holds the `app` lock for its whole run, so requests never
/// interleave their reads and writes.
pub struct AppState {
    pub app: Mutex<InventoryApp>,
    pub renderer: Arc<dyn ViewRenderer<Output = String>>,
}

impl AppState {
    pub fn new(app: InventoryApp, renderer: Arc<dyn ViewRenderer<Output = String>>) -> Self {
        Self {
            app: Mutex::new(app),
            renderer,
        }
    }
}
