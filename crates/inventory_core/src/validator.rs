//! crates/inventory_core/src/validator.rs
//!
//! The Form Validator: turns raw, user-entered field strings into a typed
//! `NewProduct`, or reports every invalid field at once.

use crate::domain::{Category, NewProduct, Product, PLACEHOLDER_IMAGE};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

const MIN_NAME_CHARS: usize = 3;

/// The product form fields, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawProductForm {
    pub name: String,
    pub category: String,
    pub price: String,
    pub stock: String,
    pub description: String,
    pub image: String,
}

impl RawProductForm {
    /// Pre-fills the form for editing an existing product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.as_str().to_string(),
            price: product.price.to_string(),
            stock: product.stock.to_string(),
            description: product.description.clone(),
            image: if product.image == PLACEHOLDER_IMAGE {
                String::new()
            } else {
                product.image.clone()
            },
        }
    }

    /// Collects the form fields from a submitted key/value map. Missing
    /// fields are treated as empty.
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let field = |key: &str| fields.get(key).cloned().unwrap_or_default();
        Self {
            name: field("name"),
            category: field("category"),
            price: field("price"),
            stock: field("stock"),
            description: field("description"),
            image: field("image"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Category,
    Price,
    Stock,
    Description,
    Image,
}

/// Per-field error messages. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Validates every field; no check is skipped because an earlier one failed.
pub fn validate(form: &RawProductForm) -> Result<NewProduct, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = record(&mut errors, Field::Name, check_name(&form.name));
    let category = record(&mut errors, Field::Category, check_category(&form.category));
    let price = record(&mut errors, Field::Price, check_price(&form.price));
    let stock = record(&mut errors, Field::Stock, check_stock(&form.stock));

    match (name, category, price, stock) {
        (Some(name), Some(category), Some(price), Some(stock)) if errors.is_empty() => {
            Ok(NewProduct {
                name,
                category,
                price,
                stock,
                description: form.description.trim().to_string(),
                image: normalize_image(&form.image),
            })
        }
        _ => Err(errors),
    }
}

fn record<T>(errors: &mut FieldErrors, field: Field, result: Result<T, String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            errors.insert(field, message);
            None
        }
    }
}

fn check_name(raw: &str) -> Result<String, String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err("Name is required".to_string());
    }
    if name.chars().count() < MIN_NAME_CHARS {
        return Err(format!("Name must be at least {MIN_NAME_CHARS} characters"));
    }
    Ok(name.to_string())
}

fn check_category(raw: &str) -> Result<Category, String> {
    if raw.trim().is_empty() {
        return Err("Category is required".to_string());
    }
    raw.parse::<Category>()
        .map_err(|_| format!("Unknown category '{}'", raw.trim()))
}

fn check_price(raw: &str) -> Result<f64, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Price is required".to_string());
    }
    let price = raw
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .ok_or_else(|| "Price must be a number".to_string())?;
    if price <= 0.0 {
        return Err("Price must be greater than 0".to_string());
    }
    Ok(price)
}

fn check_stock(raw: &str) -> Result<u32, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Stock is required".to_string());
    }
    let stock = raw
        .parse::<i64>()
        .map_err(|_| "Stock must be a whole number".to_string())?;
    if stock < 0 {
        return Err("Stock cannot be negative".to_string());
    }
    u32::try_from(stock).map_err(|_| "Stock is too large".to_string())
}

fn normalize_image(raw: &str) -> String {
    let image = raw.trim();
    if image.is_empty() {
        PLACEHOLDER_IMAGE.to_string()
    } else {
        image.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, category: &str, price: &str, stock: &str) -> RawProductForm {
        RawProductForm {
            name: name.to_string(),
            category: category.to_string(),
            price: price.to_string(),
            stock: stock.to_string(),
            ..RawProductForm::default()
        }
    }

    #[test]
    fn valid_form_is_coerced() {
        let mut raw = form("  iPad Air ", "Tablets", "5999.99", "8");
        raw.description = "  Liquid Retina ".to_string();

        let product = validate(&raw).unwrap();
        assert_eq!(product.name, "iPad Air");
        assert_eq!(product.category, Category::Tablets);
        assert_eq!(product.price, 5999.99);
        assert_eq!(product.stock, 8);
        assert_eq!(product.description, "Liquid Retina");
        assert_eq!(product.image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn zero_price_is_rejected() {
        let errors = validate(&form("iPad Air", "Tablets", "0", "8")).unwrap_err();
        assert_eq!(errors.get(Field::Price), Some("Price must be greater than 0"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn every_invalid_field_is_reported() {
        let errors = validate(&form("ab", "", "abc", "-1")).unwrap_err();
        assert_eq!(errors.get(Field::Name), Some("Name must be at least 3 characters"));
        assert_eq!(errors.get(Field::Category), Some("Category is required"));
        assert_eq!(errors.get(Field::Price), Some("Price must be a number"));
        assert_eq!(errors.get(Field::Stock), Some("Stock cannot be negative"));
    }

    #[test]
    fn empty_fields_are_required() {
        let errors = validate(&RawProductForm::default()).unwrap_err();
        assert_eq!(errors.get(Field::Name), Some("Name is required"));
        assert_eq!(errors.get(Field::Price), Some("Price is required"));
        assert_eq!(errors.get(Field::Stock), Some("Stock is required"));
        assert_eq!(errors.get(Field::Description), None);
    }

    #[test]
    fn stock_must_be_whole_and_category_known() {
        let errors = validate(&form("iPad Air", "Toys", "10", "1.5")).unwrap_err();
        assert_eq!(errors.get(Field::Stock), Some("Stock must be a whole number"));
        assert_eq!(errors.get(Field::Category), Some("Unknown category 'Toys'"));
    }

    #[test]
    fn non_finite_price_is_not_a_number() {
        let errors = validate(&form("iPad Air", "Tablets", "inf", "1")).unwrap_err();
        assert_eq!(errors.get(Field::Price), Some("Price must be a number"));
    }

    #[test]
    fn zero_stock_and_short_description_are_accepted() {
        let mut raw = form("iPad Air", "Tablets", "1", "0");
        raw.description = "short".to_string();
        assert!(validate(&raw).is_ok());
    }

    #[test]
    fn edit_form_round_trips_through_validation() {
        let product = Product {
            id: 3,
            name: "iPad Air".to_string(),
            category: Category::Tablets,
            price: 5999.99,
            stock: 8,
            description: "Tablet".to_string(),
            image: "https://example.com/ipad.png".to_string(),
        };
        let validated = validate(&RawProductForm::from_product(&product)).unwrap();
        assert_eq!(validated.into_product(3), product);
    }

    #[test]
    fn errors_serialize_as_a_field_map() {
        let errors = validate(&form("iPad Air", "Tablets", "0", "1")).unwrap_err();
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"price":"Price must be greater than 0"}"#);
    }
}
