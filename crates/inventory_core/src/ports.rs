//! crates/inventory_core/src/ports.rs
//!
//! Defines the service contracts (traits) the core depends on.
//! These traits form the boundary of the hexagonal architecture: the core never
//! touches files or markup directly, it goes through a key/value store and a
//! view renderer supplied by the host.

use crate::domain::ProductId;
use crate::view::{MetricsView, ProductListing, SettingsView};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors of the concrete adapters (file system,
/// template engine).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Stored data is corrupt: {0}")]
    Corrupt(String),
    #[error("Duplicate product id: {0}")]
    DuplicateId(ProductId),
    #[error("No product ids left")]
    IdsExhausted,
    #[error("Unknown action: {0}")]
    UnknownAction(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Render error: {0}")]
    Render(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// A string-keyed store of string values, the persistence medium for both the
/// product list and the session settings.
///
/// Reads and writes are synchronous: a successful `set` means the value is
/// durable before the call returns.
pub trait KeyValueStore: Send + Sync {
    /// Returns `None` when the key has never been written.
    fn get(&self, key: &str) -> PortResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> PortResult<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> PortResult<()>;
}

/// Turns display models into a presentation.
///
/// Implementations must escape every piece of user-supplied text they insert
/// into their output.
pub trait ViewRenderer: Send + Sync {
    type Output;

    /// Renders the product table (and the product form, when one is open).
    fn render_products(&self, listing: &ProductListing) -> PortResult<Self::Output>;

    /// Renders the headline metrics tiles and the per-category charts.
    fn render_dashboard(&self, metrics: &MetricsView) -> PortResult<Self::Output>;

    /// Renders the analytics lists (categories, top value, low stock, totals).
    fn render_analytics(&self, metrics: &MetricsView) -> PortResult<Self::Output>;

    fn render_settings(&self, settings: &SettingsView) -> PortResult<Self::Output>;
}
