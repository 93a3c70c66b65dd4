//! crates/inventory_core/src/export.rs
//!
//! CSV export of the full product list.

use crate::domain::Product;
use crate::locale::Locale;
use chrono::NaiveDate;

/// A ready-to-download export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

/// Builds the CSV document: a header row, then one row per product in store
/// order. Text columns are always quoted; numeric columns are bare.
pub fn export_csv(products: &[Product], locale: Locale) -> String {
    let mut csv = String::with_capacity(64 * (products.len() + 1));
    csv.push_str(locale.csv_header());
    csv.push('\n');
    for product in products {
        csv.push_str(&format!(
            "{},{},{},{},{:.2},{}\n",
            quote(&product.name),
            quote(locale.category_label(product.category)),
            product.price,
            product.stock,
            product.inventory_value(),
            quote(&product.description),
        ));
    }
    csv
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("inventory_products_{}.csv", date.format("%Y-%m-%d"))
}

fn quote(value: &str) -> String {
    format!("\"{}\"", neutralize_formula(value).replace('"', "\"\""))
}

/// Spreadsheet applications evaluate cells starting with these characters.
fn neutralize_formula(value: &str) -> String {
    let starts_formula = matches!(
        value.trim_start().chars().next(),
        Some('=') | Some('+') | Some('-') | Some('@')
    );
    if starts_formula {
        format!("'{value}")
    } else {
        value.to_string()
    }
}
