//! crates/inventory_core/src/domain.rs
//!
//! Defines the core data structures of the inventory: products, the query state
//! that selects the visible subset of them, and the per-user session settings.
//! The serde derives describe the persisted shape of each record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a product, assigned by the store.
pub type ProductId = u64;

/// Products with fewer units than this are flagged as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Image used when a product is saved without one.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/200?text=Product";

//=========================================================================================
// Parse Errors
//=========================================================================================

/// Returned when a user-supplied label does not name a known value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {kind}: '{value}'")]
pub struct ParseValueError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseValueError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

//=========================================================================================
// Category
//=========================================================================================

/// The fixed set of catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Notebooks,
    Smartphones,
    Tablets,
    #[serde(alias = "Acessórios")]
    Accessories,
    #[serde(alias = "Periféricos")]
    Peripherals,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Notebooks,
        Category::Smartphones,
        Category::Tablets,
        Category::Accessories,
        Category::Peripherals,
    ];

    /// The canonical (persisted) name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Notebooks => "Notebooks",
            Category::Smartphones => "Smartphones",
            Category::Tablets => "Tablets",
            Category::Accessories => "Accessories",
            Category::Peripherals => "Peripherals",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseValueError;

    /// Accepts the canonical names case-insensitively, plus the Portuguese
    /// labels found in older saved data.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        match wanted.as_str() {
            "acessórios" | "acessorios" => return Ok(Category::Accessories),
            "periféricos" | "perifericos" => return Ok(Category::Peripherals),
            _ => {}
        }
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().to_lowercase() == wanted)
            .ok_or_else(|| ParseValueError::new("category", s))
    }
}

//=========================================================================================
// Product
//=========================================================================================

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    pub price: f64,
    pub stock: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_image")]
    pub image: String,
}

fn default_image() -> String {
    PLACEHOLDER_IMAGE.to_string()
}

impl Product {
    /// Value of the units on hand: `price × stock`.
    pub fn inventory_value(&self) -> f64 {
        self.price * f64::from(self.stock)
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }
}

/// A validated payload for a product that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub category: Category,
    pub price: f64,
    pub stock: u32,
    pub description: String,
    pub image: String,
}

impl NewProduct {
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
            stock: self.stock,
            description: self.description,
            image: self.image,
        }
    }
}

/// A shallow update. Fields left as `None` keep their previous value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub price: Option<f64>,
    pub stock: Option<u32>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl ProductPatch {
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(image) = self.image {
            product.image = image;
        }
    }
}

impl From<NewProduct> for ProductPatch {
    fn from(payload: NewProduct) -> Self {
        Self {
            name: Some(payload.name),
            category: Some(payload.category),
            price: Some(payload.price),
            stock: Some(payload.stock),
            description: Some(payload.description),
            image: Some(payload.image),
        }
    }
}

//=========================================================================================
// Query State
//=========================================================================================

/// The column the product listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Name,
    Category,
    Price,
    Stock,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Name,
        SortField::Category,
        SortField::Price,
        SortField::Stock,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Category => "category",
            SortField::Price => "price",
            SortField::Stock => "stock",
        }
    }
}

impl FromStr for SortField {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseValueError::new("sort field", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(ParseValueError::new("sort order", s)),
        }
    }
}

/// Search, filter and sort parameters for the product listing.
///
/// Lives only for the current session; it is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    /// Case-insensitive substring matched against name and description.
    pub search: String,
    /// `None` shows every category.
    pub category: Option<Category>,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
}

impl QueryState {
    /// Clicking the active column flips its direction; any other column
    /// becomes the sort key in ascending order.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_order = self.sort_order.flipped();
        } else {
            self.sort_field = field;
            self.sort_order = SortOrder::Asc;
        }
    }

    pub fn is_filtered(&self) -> bool {
        !self.search.is_empty() || self.category.is_some()
    }
}

//=========================================================================================
// Session Settings
//=========================================================================================

/// UI preferences, persisted separately from the product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    pub dark_mode: bool,
    pub notifications_enabled: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            notifications_enabled: true,
        }
    }
}
