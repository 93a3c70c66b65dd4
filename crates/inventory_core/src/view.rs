//! crates/inventory_core/src/view.rs
//!
//! Display models handed to a `ViewRenderer`. They carry the derived display
//! values (formatted money, unit labels, low-stock flags) so a renderer only
//! lays them out. Strings in here are raw user text; escaping is the
//! renderer's job.

use crate::domain::{Category, Product, ProductId, QueryState, SessionSettings, SortField};
use crate::locale::Locale;
use crate::metrics::InventorySummary;
use crate::validator::{FieldErrors, RawProductForm};
use serde::Serialize;

//=========================================================================================
// Notices
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        }
    }
}

/// A transient message shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// State shared by every page: theme and the pending notice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageChrome {
    pub dark_mode: bool,
    pub notice: Option<Notice>,
    pub locale: &'static str,
}

//=========================================================================================
// Product Listing
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub category_label: &'static str,
    pub price: String,
    pub stock_label: String,
    pub total: String,
    pub low_stock: bool,
    pub image: String,
}

impl ProductRow {
    pub fn new(product: &Product, locale: Locale) -> Self {
        let description = if product.description.is_empty() {
            locale.empty_description().to_string()
        } else {
            product.description.clone()
        };
        Self {
            id: product.id,
            name: product.name.clone(),
            description,
            category: product.category,
            category_label: locale.category_label(product.category),
            price: locale.currency(product.price),
            stock_label: locale.units(u64::from(product.stock)),
            total: locale.currency(product.inventory_value()),
            low_stock: product.is_low_stock(),
            image: product.image.clone(),
        }
    }
}

/// The product form while it is open, with the values typed so far.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormState {
    /// `None` while creating a new product.
    pub editing_id: Option<ProductId>,
    /// Whether the form edits an existing product. Kept apart from
    /// `editing_id` because templates treat id 0 as false.
    pub editing: bool,
    pub values: RawProductForm,
    pub errors: FieldErrors,
}

impl FormState {
    pub fn blank() -> Self {
        Self {
            editing_id: None,
            editing: false,
            values: RawProductForm::default(),
            errors: FieldErrors::new(),
        }
    }

    pub fn editing(product: &Product) -> Self {
        Self {
            editing_id: Some(product.id),
            editing: true,
            values: RawProductForm::from_product(product),
            errors: FieldErrors::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// One sortable column header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortHeader {
    pub field: SortField,
    pub active: bool,
    /// `"asc"` or `"desc"` on the active column, empty otherwise.
    pub indicator: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductListing {
    pub chrome: PageChrome,
    pub rows: Vec<ProductRow>,
    pub result_count: String,
    pub query: QueryState,
    pub categories: Vec<CategoryOption>,
    pub sort_headers: Vec<SortHeader>,
    pub form: Option<FormState>,
    /// Whether a search term or category filter is active.
    pub filtered: bool,
    /// Whether the store holds any product at all, to tell "no products yet"
    /// from "nothing matches".
    pub store_empty: bool,
}

impl ProductListing {
    pub fn build(
        visible: &[Product],
        query: &QueryState,
        form: Option<FormState>,
        store_empty: bool,
        chrome: PageChrome,
        locale: Locale,
    ) -> Self {
        let categories = Category::ALL
            .into_iter()
            .map(|category| CategoryOption {
                value: category.as_str(),
                label: locale.category_label(category),
                selected: query.category == Some(category),
            })
            .collect();
        let sort_headers = SortField::ALL
            .into_iter()
            .map(|field| {
                let active = query.sort_field == field;
                SortHeader {
                    field,
                    active,
                    indicator: if active { query.sort_order.as_str() } else { "" },
                }
            })
            .collect();

        Self {
            chrome,
            rows: visible.iter().map(|p| ProductRow::new(p, locale)).collect(),
            result_count: locale.result_count(visible.len()),
            query: query.clone(),
            categories,
            sort_headers,
            form,
            filtered: query.is_filtered(),
            store_empty,
        }
    }
}

//=========================================================================================
// Metrics
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueRow {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRow {
    pub label: &'static str,
    pub count: usize,
    pub value: String,
    /// Share of the total inventory value, 0-100, for bar widths.
    pub value_share: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsView {
    pub chrome: PageChrome,
    pub total_products: usize,
    pub total_value: String,
    pub category_count: usize,
    pub low_stock_count: usize,
    pub total_stock: String,
    pub average_price: String,
    pub top_by_value: Vec<ValueRow>,
    pub by_category: Vec<CategoryRow>,
    pub low_stock: Vec<ValueRow>,
    /// The unformatted figures, for chart data.
    pub summary: InventorySummary,
}

impl MetricsView {
    pub fn build(summary: InventorySummary, chrome: PageChrome, locale: Locale) -> Self {
        let total_value = summary.total_value;
        let by_category = summary
            .by_category
            .iter()
            .map(|row| CategoryRow {
                label: locale.category_label(row.category),
                count: row.count,
                value: locale.currency(row.value),
                value_share: share_percent(row.value, total_value),
            })
            .collect();
        let top_by_value = summary
            .top_by_value
            .iter()
            .map(|p| ValueRow {
                name: p.name.clone(),
                value: locale.currency(p.inventory_value()),
            })
            .collect();
        let low_stock = summary
            .low_stock
            .iter()
            .map(|p| ValueRow {
                name: p.name.clone(),
                value: locale.units(u64::from(p.stock)),
            })
            .collect();

        Self {
            chrome,
            total_products: summary.total_products,
            total_value: locale.currency(summary.total_value),
            category_count: summary.category_count,
            low_stock_count: summary.low_stock_count,
            total_stock: locale.units(summary.total_stock),
            average_price: locale.currency(summary.average_price),
            top_by_value,
            by_category,
            low_stock,
            summary,
        }
    }
}

fn share_percent(part: f64, total: f64) -> u32 {
    if total <= 0.0 {
        return 0;
    }
    (part / total * 100.0).round().clamp(0.0, 100.0) as u32
}

//=========================================================================================
// Settings
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsView {
    pub chrome: PageChrome,
    pub settings: SessionSettings,
    pub product_count: usize,
}
