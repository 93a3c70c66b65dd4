//! crates/inventory_core/src/commands.rs
//!
//! The command table. Every user action is a `Command`, keyed by its action
//! name, and every mutation of the inventory goes through
//! `InventoryApp::dispatch`. Hosts translate their own triggers (form posts,
//! JSON requests) into commands and read display models back out.

use crate::domain::{
    Category, ParseValueError, Product, ProductId, QueryState, SessionSettings, SortField,
    SortOrder,
};
use crate::export::{export_csv, export_filename, CsvExport};
use crate::locale::Locale;
use crate::metrics::InventorySummary;
use crate::ports::{KeyValueStore, PortError, PortResult};
use crate::query::derive_view;
use crate::sample::sample_products;
use crate::settings::SettingsStore;
use crate::store::ProductStore;
use crate::validator::{validate, FieldErrors, RawProductForm};
use crate::view::{
    FormState, MetricsView, Notice, NoticeLevel, PageChrome, ProductListing, SettingsView,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info};

//=========================================================================================
// Commands
//=========================================================================================

/// A user action. JSON commands carry the action name in an `action` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Command {
    CreateProduct { form: RawProductForm },
    UpdateProduct { id: ProductId, form: RawProductForm },
    DeleteProduct { id: ProductId },
    LoadSampleData,
    ClearAll,
    SetSearch { term: String },
    SetCategoryFilter { category: Option<Category> },
    /// Clicks a column header: flips the direction on the active column.
    SortBy { field: SortField },
    SetSort { field: SortField, order: SortOrder },
    ResetQuery,
    ToggleTheme,
    SetDarkMode { enabled: bool },
    SetNotifications { enabled: bool },
    OpenForm { id: Option<ProductId> },
    CloseForm,
}

impl Command {
    pub fn action_name(&self) -> &'static str {
        match self {
            Command::CreateProduct { .. } => "create_product",
            Command::UpdateProduct { .. } => "update_product",
            Command::DeleteProduct { .. } => "delete_product",
            Command::LoadSampleData => "load_sample_data",
            Command::ClearAll => "clear_all",
            Command::SetSearch { .. } => "set_search",
            Command::SetCategoryFilter { .. } => "set_category_filter",
            Command::SortBy { .. } => "sort_by",
            Command::SetSort { .. } => "set_sort",
            Command::ResetQuery => "reset_query",
            Command::ToggleTheme => "toggle_theme",
            Command::SetDarkMode { .. } => "set_dark_mode",
            Command::SetNotifications { .. } => "set_notifications",
            Command::OpenForm { .. } => "open_form",
            Command::CloseForm => "close_form",
        }
    }

    /// Builds a command from an HTML form submission.
    pub fn from_form(action: &str, fields: &HashMap<String, String>) -> PortResult<Self> {
        let command = match action {
            "create_product" => Command::CreateProduct {
                form: RawProductForm::from_fields(fields),
            },
            "update_product" => Command::UpdateProduct {
                id: required_id(fields)?,
                form: RawProductForm::from_fields(fields),
            },
            "delete_product" => Command::DeleteProduct {
                id: required_id(fields)?,
            },
            "load_sample_data" => Command::LoadSampleData,
            "clear_all" => Command::ClearAll,
            "set_search" => Command::SetSearch {
                term: fields.get("term").cloned().unwrap_or_default(),
            },
            "set_category_filter" => Command::SetCategoryFilter {
                category: optional_category(fields.get("category").map(String::as_str))?,
            },
            "sort_by" => Command::SortBy {
                field: required_parse(fields, "field")?,
            },
            "set_sort" => Command::SetSort {
                field: required_parse(fields, "field")?,
                order: required_parse(fields, "order")?,
            },
            "reset_query" => Command::ResetQuery,
            "toggle_theme" => Command::ToggleTheme,
            "set_dark_mode" => Command::SetDarkMode {
                enabled: checkbox(fields, "enabled"),
            },
            "set_notifications" => Command::SetNotifications {
                enabled: checkbox(fields, "enabled"),
            },
            "open_form" => Command::OpenForm {
                id: optional_id(fields)?,
            },
            "close_form" => Command::CloseForm,
            other => return Err(PortError::UnknownAction(other.to_string())),
        };
        Ok(command)
    }
}

/// An empty or absent value means "all categories".
pub fn optional_category(raw: Option<&str>) -> PortResult<Option<Category>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(label) => label
            .parse()
            .map(Some)
            .map_err(|e: ParseValueError| PortError::InvalidInput(e.to_string())),
    }
}

fn required_parse<T>(fields: &HashMap<String, String>, key: &str) -> PortResult<T>
where
    T: std::str::FromStr<Err = ParseValueError>,
{
    fields
        .get(key)
        .ok_or_else(|| PortError::InvalidInput(format!("missing field '{key}'")))?
        .parse()
        .map_err(|e: ParseValueError| PortError::InvalidInput(e.to_string()))
}

fn required_id(fields: &HashMap<String, String>) -> PortResult<ProductId> {
    optional_id(fields)?.ok_or_else(|| PortError::InvalidInput("missing field 'id'".to_string()))
}

fn optional_id(fields: &HashMap<String, String>) -> PortResult<Option<ProductId>> {
    match fields.get("id").map(|raw| raw.trim()) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| PortError::InvalidInput(format!("invalid product id '{raw}'"))),
    }
}

/// HTML checkboxes are only submitted when ticked.
fn checkbox(fields: &HashMap<String, String>, key: &str) -> bool {
    matches!(
        fields.get(key).map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("on" | "true" | "1")
    )
}

//=========================================================================================
// Outcomes
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Created { product: Product },
    Updated { product: Product },
    Removed { id: ProductId },
    /// The command referenced a product that no longer exists. Nothing changed.
    NotFound { id: ProductId },
    /// The form was rejected; nothing changed.
    Invalid { errors: FieldErrors },
    Replaced { count: usize },
    QueryChanged { query: QueryState },
    SettingsChanged { settings: SessionSettings },
    FormChanged { open: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandOutcome {
    pub outcome: Outcome,
    pub notice: Option<Notice>,
}

impl CommandOutcome {
    fn quiet(outcome: Outcome) -> Self {
        Self {
            outcome,
            notice: None,
        }
    }

    fn with_notice(outcome: Outcome, notice: Notice) -> Self {
        Self {
            outcome,
            notice: Some(notice),
        }
    }
}

//=========================================================================================
// InventoryApp
//=========================================================================================

/// The application state for one user session: the product store, the
/// settings, the query state, the open form and the pending notice.
pub struct InventoryApp {
    store: ProductStore,
    settings: SettingsStore,
    query: QueryState,
    form: Option<FormState>,
    notice: Option<Notice>,
    locale: Locale,
}

impl InventoryApp {
    /// Loads products and settings from `kv`. The query state starts at its
    /// defaults.
    pub fn load(kv: Arc<dyn KeyValueStore>, locale: Locale) -> Self {
        Self {
            store: ProductStore::load(kv.clone()),
            settings: SettingsStore::load(kv),
            query: QueryState::default(),
            form: None,
            notice: None,
            locale,
        }
    }

    /// Loads the sample catalog into an empty store. Returns whether it did.
    pub fn seed_if_empty(&mut self) -> PortResult<bool> {
        if !self.store.is_empty() {
            return Ok(false);
        }
        self.store.replace_all(sample_products())?;
        info!("Seeded empty store with sample data");
        Ok(true)
    }

    pub fn store(&self) -> &ProductStore {
        &self.store
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings.current()
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn form(&self) -> Option<&FormState> {
        self.form.as_ref()
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// The filtered, sorted products for the current query state.
    pub fn visible_products(&self) -> Vec<Product> {
        derive_view(self.store.as_slice(), &self.query)
    }

    pub fn summary(&self) -> InventorySummary {
        InventorySummary::from_products(self.store.as_slice())
    }

    /// Runs a command. Storage failures are returned and also queued as an
    /// error notice, which is shown even when notifications are disabled.
    pub fn dispatch(&mut self, command: Command) -> PortResult<CommandOutcome> {
        let action = command.action_name();
        debug!("Dispatching {}", action);
        match self.execute(command) {
            Ok(outcome) => {
                if let Some(notice) = &outcome.notice {
                    self.post_notice(notice.clone());
                }
                Ok(outcome)
            }
            Err(e) => {
                error!("Command {} failed: {}", action, e);
                self.post_notice(Notice::error(format!("Changes were not saved: {e}")));
                Err(e)
            }
        }
    }

    /// Queues a notice for the next page, honouring the notification toggle.
    pub fn post_notice(&mut self, notice: Notice) {
        if notice.level == NoticeLevel::Error || self.settings.current().notifications_enabled {
            self.notice = Some(notice);
        }
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Clears the pending notice only if it is `delivered`, leaving any other
    /// pending notice for the next page.
    pub fn acknowledge_notice(&mut self, delivered: &Notice) {
        if self.notice.as_ref() == Some(delivered) {
            self.notice = None;
        }
    }

    /// Builds the CSV export of the whole store, or queues a warning and
    /// returns `None` when there is nothing to export.
    pub fn export(&mut self, today: NaiveDate) -> Option<CsvExport> {
        if self.store.is_empty() {
            self.post_notice(Notice::warning("There are no products to export"));
            return None;
        }
        let export = CsvExport {
            filename: export_filename(today),
            content: export_csv(self.store.as_slice(), self.locale),
        };
        info!("Exported {} products to {}", self.store.len(), export.filename);
        self.post_notice(Notice::success("Data exported successfully"));
        Some(export)
    }

    //-------------------------------------------------------------------------------------
    // Display models (each one consumes the pending notice)
    //-------------------------------------------------------------------------------------

    pub fn product_listing(&mut self) -> ProductListing {
        let chrome = self.chrome();
        ProductListing::build(
            &self.visible_products(),
            &self.query,
            self.form.clone(),
            self.store.is_empty(),
            chrome,
            self.locale,
        )
    }

    pub fn metrics_view(&mut self) -> MetricsView {
        let chrome = self.chrome();
        MetricsView::build(self.summary(), chrome, self.locale)
    }

    pub fn settings_view(&mut self) -> SettingsView {
        SettingsView {
            chrome: self.chrome(),
            settings: self.settings.current(),
            product_count: self.store.len(),
        }
    }

    fn chrome(&mut self) -> PageChrome {
        PageChrome {
            dark_mode: self.settings.current().dark_mode,
            notice: self.take_notice(),
            locale: self.locale.tag(),
        }
    }

    //-------------------------------------------------------------------------------------
    // Handlers
    //-------------------------------------------------------------------------------------

    fn execute(&mut self, command: Command) -> PortResult<CommandOutcome> {
        match command {
            Command::CreateProduct { form } => self.create_product(form),
            Command::UpdateProduct { id, form } => self.update_product(id, form),
            Command::DeleteProduct { id } => self.delete_product(id),
            Command::LoadSampleData => {
                let products = sample_products();
                let count = products.len();
                self.store.replace_all(products)?;
                Ok(CommandOutcome::with_notice(
                    Outcome::Replaced { count },
                    Notice::success("Sample data loaded"),
                ))
            }
            Command::ClearAll => {
                self.store.clear()?;
                self.form = None;
                Ok(CommandOutcome::with_notice(
                    Outcome::Replaced { count: 0 },
                    Notice::success("All data cleared"),
                ))
            }
            Command::SetSearch { term } => {
                self.query.search = term;
                Ok(self.query_changed())
            }
            Command::SetCategoryFilter { category } => {
                self.query.category = category;
                Ok(self.query_changed())
            }
            Command::SortBy { field } => {
                self.query.toggle_sort(field);
                Ok(self.query_changed())
            }
            Command::SetSort { field, order } => {
                self.query.sort_field = field;
                self.query.sort_order = order;
                Ok(self.query_changed())
            }
            Command::ResetQuery => {
                self.query = QueryState::default();
                Ok(self.query_changed())
            }
            Command::ToggleTheme => {
                self.settings.toggle_theme()?;
                Ok(self.settings_changed())
            }
            Command::SetDarkMode { enabled } => {
                self.settings.set_dark_mode(enabled)?;
                Ok(self.settings_changed())
            }
            Command::SetNotifications { enabled } => {
                self.settings.set_notifications(enabled)?;
                Ok(self.settings_changed())
            }
            Command::OpenForm { id: None } => {
                self.form = Some(FormState::blank());
                Ok(CommandOutcome::quiet(Outcome::FormChanged { open: true }))
            }
            Command::OpenForm { id: Some(id) } => match self.store.get(id) {
                Some(product) => {
                    self.form = Some(FormState::editing(product));
                    Ok(CommandOutcome::quiet(Outcome::FormChanged { open: true }))
                }
                None => Ok(self.not_found(id)),
            },
            Command::CloseForm => {
                self.form = None;
                Ok(CommandOutcome::quiet(Outcome::FormChanged { open: false }))
            }
        }
    }

    fn create_product(&mut self, form: RawProductForm) -> PortResult<CommandOutcome> {
        match validate(&form) {
            Ok(payload) => {
                let product = self.store.create(payload)?;
                self.form = None;
                Ok(CommandOutcome::with_notice(
                    Outcome::Created { product },
                    Notice::success("Product created successfully"),
                ))
            }
            Err(errors) => Ok(self.rejected(None, form, errors)),
        }
    }

    fn update_product(&mut self, id: ProductId, form: RawProductForm) -> PortResult<CommandOutcome> {
        match validate(&form) {
            Ok(payload) => match self.store.update(id, payload.into())? {
                Some(product) => {
                    self.form = None;
                    Ok(CommandOutcome::with_notice(
                        Outcome::Updated { product },
                        Notice::success("Product updated successfully"),
                    ))
                }
                None => {
                    self.form = None;
                    Ok(self.not_found(id))
                }
            },
            Err(errors) => Ok(self.rejected(Some(id), form, errors)),
        }
    }

    fn delete_product(&mut self, id: ProductId) -> PortResult<CommandOutcome> {
        if !self.store.remove(id)? {
            return Ok(self.not_found(id));
        }
        if self.form.as_ref().and_then(|form| form.editing_id) == Some(id) {
            self.form = None;
        }
        Ok(CommandOutcome::with_notice(
            Outcome::Removed { id },
            Notice::success("Product deleted successfully"),
        ))
    }

    /// Keeps the form open with the submitted values and the errors.
    fn rejected(
        &mut self,
        editing_id: Option<ProductId>,
        values: RawProductForm,
        errors: FieldErrors,
    ) -> CommandOutcome {
        self.form = Some(FormState {
            editing_id,
            editing: editing_id.is_some(),
            values,
            errors: errors.clone(),
        });
        CommandOutcome::with_notice(
            Outcome::Invalid { errors },
            Notice::warning("Please check the errors in the form"),
        )
    }

    fn not_found(&self, id: ProductId) -> CommandOutcome {
        CommandOutcome::with_notice(
            Outcome::NotFound { id },
            Notice::warning(format!("Product {id} no longer exists")),
        )
    }

    fn query_changed(&self) -> CommandOutcome {
        CommandOutcome::quiet(Outcome::QueryChanged {
            query: self.query.clone(),
        })
    }

    fn settings_changed(&self) -> CommandOutcome {
        CommandOutcome::quiet(Outcome::SettingsChanged {
            settings: self.settings.current(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKeyValueStore;
    use crate::ports::ViewRenderer;
    use crate::store::PRODUCTS_KEY;
    use crate::view::{MetricsView, ProductListing, SettingsView};

    /// Accepts settings writes but refuses to store the product list.
    struct FullProductStore(MemoryKeyValueStore);

    impl KeyValueStore for FullProductStore {
        fn get(&self, key: &str) -> PortResult<Option<String>> {
            self.0.get(key)
        }
        fn set(&self, key: &str, value: &str) -> PortResult<()> {
            if key == PRODUCTS_KEY {
                return Err(PortError::Storage("quota exceeded".to_string()));
            }
            self.0.set(key, value)
        }
        fn remove(&self, key: &str) -> PortResult<()> {
            self.0.remove(key)
        }
    }

    /// Records what it was asked to render, in place of a real presentation.
    struct SummaryRenderer;

    impl ViewRenderer for SummaryRenderer {
        type Output = String;

        fn render_products(&self, listing: &ProductListing) -> PortResult<String> {
            let names: Vec<&str> = listing.rows.iter().map(|r| r.name.as_str()).collect();
            Ok(format!("{} | {}", listing.result_count, names.join(", ")))
        }
        fn render_dashboard(&self, metrics: &MetricsView) -> PortResult<String> {
            Ok(format!("{} products, {}", metrics.total_products, metrics.total_value))
        }
        fn render_analytics(&self, metrics: &MetricsView) -> PortResult<String> {
            Ok(format!("{} low", metrics.low_stock_count))
        }
        fn render_settings(&self, settings: &SettingsView) -> PortResult<String> {
            Ok(format!("dark={}", settings.settings.dark_mode))
        }
    }

    fn app() -> (Arc<MemoryKeyValueStore>, InventoryApp) {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let app = InventoryApp::load(kv.clone(), Locale::En);
        (kv, app)
    }

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn valid_form(name: &str) -> RawProductForm {
        RawProductForm {
            name: name.to_string(),
            category: "Tablets".to_string(),
            price: "100".to_string(),
            stock: "2".to_string(),
            ..RawProductForm::default()
        }
    }

    #[test]
    fn create_with_zero_price_is_rejected_and_store_unchanged() {
        let (kv, mut app) = app();
        let mut form = valid_form("iPad Air");
        form.price = "0".to_string();

        let outcome = app.dispatch(Command::CreateProduct { form }).unwrap();

        match outcome.outcome {
            Outcome::Invalid { errors } => {
                assert_eq!(
                    errors.get(crate::validator::Field::Price),
                    Some("Price must be greater than 0")
                )
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(app.store().is_empty());
        assert_eq!(kv.get(PRODUCTS_KEY).unwrap(), None);
        assert!(app.form().unwrap().errors.get(crate::validator::Field::Price).is_some());
    }

    #[test]
    fn create_update_delete_flow() {
        let (_kv, mut app) = app();
        let created = match app
            .dispatch(Command::CreateProduct {
                form: valid_form("iPad Air"),
            })
            .unwrap()
            .outcome
        {
            Outcome::Created { product } => product,
            other => panic!("unexpected outcome {other:?}"),
        };

        let mut form = valid_form("iPad Air 2");
        form.stock = "20".to_string();
        let outcome = app
            .dispatch(Command::UpdateProduct {
                id: created.id,
                form,
            })
            .unwrap();
        assert!(matches!(outcome.outcome, Outcome::Updated { ref product } if product.stock == 20));

        let outcome = app.dispatch(Command::DeleteProduct { id: created.id }).unwrap();
        assert_eq!(outcome.outcome, Outcome::Removed { id: created.id });
        assert!(app.store().is_empty());
    }

    #[test]
    fn unknown_ids_are_reported_as_not_found() {
        let (_kv, mut app) = app();
        let outcome = app.dispatch(Command::DeleteProduct { id: 9 }).unwrap();
        assert_eq!(outcome.outcome, Outcome::NotFound { id: 9 });
        assert_eq!(
            app.take_notice().map(|n| n.message),
            Some("Product 9 no longer exists".to_string())
        );

        let outcome = app
            .dispatch(Command::UpdateProduct {
                id: 9,
                form: valid_form("Ghost"),
            })
            .unwrap();
        assert_eq!(outcome.outcome, Outcome::NotFound { id: 9 });
        assert!(app.store().is_empty());
    }

    #[test]
    fn failed_write_surfaces_error_even_with_notifications_off() {
        let kv = Arc::new(FullProductStore(MemoryKeyValueStore::new()));
        let mut app = InventoryApp::load(kv, Locale::En);
        app.dispatch(Command::SetNotifications { enabled: false })
            .unwrap();

        let err = app
            .dispatch(Command::CreateProduct {
                form: valid_form("iPad Air"),
            })
            .unwrap_err();

        assert!(matches!(err, PortError::Storage(_)));
        assert!(app.store().is_empty());
        let notice = app.take_notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.starts_with("Changes were not saved"));
    }

    #[test]
    fn notices_are_suppressed_when_notifications_are_disabled() {
        let (_kv, mut app) = app();
        app.dispatch(Command::SetNotifications { enabled: false })
            .unwrap();
        app.dispatch(Command::LoadSampleData).unwrap();
        assert_eq!(app.take_notice(), None);
    }

    #[test]
    fn query_commands_drive_the_visible_products() {
        let (_kv, mut app) = app();
        app.dispatch(Command::LoadSampleData).unwrap();

        app.dispatch(Command::SetSearch {
            term: "PRO".to_string(),
        })
        .unwrap();
        app.dispatch(Command::SortBy {
            field: SortField::Price,
        })
        .unwrap();
        let names: Vec<String> = app.visible_products().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["AirPods Pro", "iPhone 15 Pro", "MacBook Pro 14"]);

        app.dispatch(Command::ResetQuery).unwrap();
        assert_eq!(app.visible_products().len(), 5);
    }

    #[test]
    fn renderer_receives_display_models_without_markup() {
        let (_kv, mut app) = app();
        app.dispatch(Command::LoadSampleData).unwrap();
        app.dispatch(Command::SetCategoryFilter {
            category: Some(Category::Tablets),
        })
        .unwrap();

        let renderer = SummaryRenderer;
        assert_eq!(
            renderer.render_products(&app.product_listing()).unwrap(),
            "1 product found | iPad Air"
        );
        assert_eq!(
            renderer.render_dashboard(&app.metrics_view()).unwrap(),
            "5 products, $255,999.35"
        );
        assert_eq!(renderer.render_analytics(&app.metrics_view()).unwrap(), "2 low");
    }

    #[test]
    fn listing_consumes_the_pending_notice_once() {
        let (_kv, mut app) = app();
        app.dispatch(Command::LoadSampleData).unwrap();

        let first = app.product_listing();
        assert_eq!(
            first.chrome.notice.map(|n| n.message),
            Some("Sample data loaded".to_string())
        );
        assert_eq!(app.product_listing().chrome.notice, None);
    }

    #[test]
    fn open_form_prefills_existing_product() {
        let (_kv, mut app) = app();
        app.dispatch(Command::LoadSampleData).unwrap();
        app.dispatch(Command::OpenForm { id: Some(3) }).unwrap();

        let form = app.form().unwrap();
        assert_eq!(form.editing_id, Some(3));
        assert_eq!(form.values.name, "iPad Air");

        app.dispatch(Command::DeleteProduct { id: 3 }).unwrap();
        assert!(app.form().is_none());
    }

    #[test]
    fn acknowledging_a_delivered_notice_keeps_other_pending_notices() {
        let kv = Arc::new(FullProductStore(MemoryKeyValueStore::new()));
        let mut failing = InventoryApp::load(kv, Locale::En);
        let _ = failing.dispatch(Command::CreateProduct {
            form: valid_form("iPad Air"),
        });

        let quiet = failing
            .dispatch(Command::SetSearch {
                term: "ipad".to_string(),
            })
            .unwrap();
        assert_eq!(quiet.notice, None);
        failing.acknowledge_notice(&Notice::success("Sample data loaded"));

        let pending = failing.take_notice().unwrap();
        assert_eq!(pending.level, NoticeLevel::Error);

        let (_kv, mut app) = app();
        let outcome = app.dispatch(Command::LoadSampleData).unwrap();
        app.acknowledge_notice(outcome.notice.as_ref().unwrap());
        assert_eq!(app.take_notice(), None);
    }

    #[test]
    fn clear_all_deletes_the_persisted_list_and_keeps_ids_rising() {
        let (kv, mut app) = app();
        app.dispatch(Command::LoadSampleData).unwrap();
        app.dispatch(Command::ClearAll).unwrap();
        assert_eq!(kv.get(PRODUCTS_KEY).unwrap(), None);

        let outcome = app
            .dispatch(Command::CreateProduct {
                form: valid_form("iPad Air"),
            })
            .unwrap();
        assert!(matches!(outcome.outcome, Outcome::Created { ref product } if product.id == 6));
    }

    #[test]
    fn seed_only_fills_an_empty_store() {
        let (_kv, mut app) = app();
        assert!(app.seed_if_empty().unwrap());
        assert!(!app.seed_if_empty().unwrap());
        assert_eq!(app.store().len(), 5);
    }

    #[test]
    fn export_warns_when_empty() {
        let (_kv, mut app) = app();
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert!(app.export(today).is_none());
        assert_eq!(app.take_notice().unwrap().level, NoticeLevel::Warning);

        app.dispatch(Command::LoadSampleData).unwrap();
        let export = app.export(today).unwrap();
        assert_eq!(export.filename, "inventory_products_2026-10-17.csv");
        assert_eq!(export.content.lines().count(), 6);
    }

    #[test]
    fn form_posts_map_to_commands() {
        let command = Command::from_form(
            "update_product",
            &fields(&[("id", "4"), ("name", "AirPods"), ("price", "10")]),
        )
        .unwrap();
        match command {
            Command::UpdateProduct { id, form } => {
                assert_eq!(id, 4);
                assert_eq!(form.name, "AirPods");
                assert_eq!(form.stock, "");
            }
            other => panic!("unexpected command {other:?}"),
        }

        assert_eq!(
            Command::from_form("set_notifications", &fields(&[])).unwrap(),
            Command::SetNotifications { enabled: false }
        );
        assert_eq!(
            Command::from_form("set_category_filter", &fields(&[("category", "")])).unwrap(),
            Command::SetCategoryFilter { category: None }
        );
        assert_eq!(
            Command::from_form("sort_by", &fields(&[("field", "stock")])).unwrap(),
            Command::SortBy {
                field: SortField::Stock
            }
        );
        assert_eq!(
            Command::from_form("set_sort", &fields(&[("field", "price"), ("order", "desc")]))
                .unwrap(),
            Command::SetSort {
                field: SortField::Price,
                order: SortOrder::Desc
            }
        );
        assert!(matches!(
            Command::from_form("drop_tables", &fields(&[])),
            Err(PortError::UnknownAction(_))
        ));
        assert!(matches!(
            Command::from_form("delete_product", &fields(&[("id", "x")])),
            Err(PortError::InvalidInput(_))
        ));
    }

    #[test]
    fn json_commands_are_tagged_by_action() {
        let command: Command =
            serde_json::from_str(r#"{"action":"delete_product","id":3}"#).unwrap();
        assert_eq!(command, Command::DeleteProduct { id: 3 });

        let command: Command = serde_json::from_str(r#"{"action":"toggle_theme"}"#).unwrap();
        assert_eq!(command.action_name(), "toggle_theme");

        let command: Command =
            serde_json::from_str(r#"{"action":"create_product","form":{"name":"iPad"}}"#)
                .unwrap();
        assert!(matches!(command, Command::CreateProduct { ref form } if form.price.is_empty()));
    }
}
