//! services/web/src/adapters/html.rs
//!
//! The HTML `ViewRenderer`, backed by Tera. Templates are compiled into the
//! binary and registered under `*.html` names, so Tera autoescapes every
//! interpolated value.

use inventory_core::ports::{PortError, PortResult, ViewRenderer};
use inventory_core::view::{MetricsView, ProductListing, SettingsView};
use serde::Serialize;
use tera::{Context, Tera};
use tracing::error;

const TEMPLATES: [(&str, &str); 5] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("products.html", include_str!("../../templates/products.html")),
    ("dashboard.html", include_str!("../../templates/dashboard.html")),
    ("analytics.html", include_str!("../../templates/analytics.html")),
    ("settings.html", include_str!("../../templates/settings.html")),
];

pub struct HtmlRenderer {
    tera: Tera,
}

impl HtmlRenderer {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.to_vec())?;
        Ok(Self { tera })
    }

    /// Renders `template` with the fields of `model` at the top level, plus
    /// `current_path` for forms that redirect back to the same page.
    fn render<T: Serialize>(&self, template: &str, model: &T, path: &str) -> PortResult<String> {
        let mut context =
            Context::from_serialize(model).map_err(|e| PortError::Render(e.to_string()))?;
        context.insert("current_path", path);
        self.tera.render(template, &context).map_err(|e| {
            error!("Failed to render {}: {:?}", template, e);
            PortError::Render(e.to_string())
        })
    }
}

impl ViewRenderer for HtmlRenderer {
    type Output = String;

    fn render_products(&self, listing: &ProductListing) -> PortResult<String> {
        self.render("products.html", listing, "/products")
    }

    fn render_dashboard(&self, metrics: &MetricsView) -> PortResult<String> {
        self.render("dashboard.html", metrics, "/dashboard")
    }

    fn render_analytics(&self, metrics: &MetricsView) -> PortResult<String> {
        self.render("analytics.html", metrics, "/analytics")
    }

    fn render_settings(&self, settings: &SettingsView) -> PortResult<String> {
        self.render("settings.html", settings, "/settings")
    }
}
