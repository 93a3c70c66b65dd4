//! crates/inventory_core/src/metrics.rs
//!
//! Aggregate figures over the whole store, feeding the dashboard and the
//! analytics view.

use crate::domain::{Category, Product};
use serde::Serialize;
use std::collections::HashSet;

/// How many products the "top by inventory value" ranking keeps.
pub const TOP_BY_VALUE_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub category: Category,
    pub count: usize,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventorySummary {
    pub total_products: usize,
    /// Σ price × stock.
    pub total_value: f64,
    pub category_count: usize,
    pub low_stock_count: usize,
    pub total_stock: u64,
    pub average_price: f64,
    /// Highest inventory value first; ties keep store order.
    pub top_by_value: Vec<Product>,
    pub low_stock: Vec<Product>,
    /// In order of first appearance in the store.
    pub by_category: Vec<CategoryBreakdown>,
}

impl InventorySummary {
    pub fn from_products(products: &[Product]) -> Self {
        let total_products = products.len();
        let total_value = products.iter().map(Product::inventory_value).sum();
        let total_stock = products.iter().map(|p| u64::from(p.stock)).sum();
        let average_price = if total_products == 0 {
            0.0
        } else {
            products.iter().map(|p| p.price).sum::<f64>() / total_products as f64
        };

        let low_stock: Vec<Product> = products
            .iter()
            .filter(|p| p.is_low_stock())
            .cloned()
            .collect();

        let mut top_by_value = products.to_vec();
        top_by_value.sort_by(|a, b| b.inventory_value().total_cmp(&a.inventory_value()));
        top_by_value.truncate(TOP_BY_VALUE_LIMIT);

        let by_category = breakdown(products);
        let category_count = products
            .iter()
            .map(|p| p.category)
            .collect::<HashSet<_>>()
            .len();

        Self {
            total_products,
            total_value,
            category_count,
            low_stock_count: low_stock.len(),
            total_stock,
            average_price,
            top_by_value,
            low_stock,
            by_category,
        }
    }
}

fn breakdown(products: &[Product]) -> Vec<CategoryBreakdown> {
    let mut rows: Vec<CategoryBreakdown> = Vec::new();
    for product in products {
        match rows.iter_mut().find(|row| row.category == product.category) {
            Some(row) => {
                row.count += 1;
                row.value += product.inventory_value();
            }
            None => rows.push(CategoryBreakdown {
                category: product.category,
                count: 1,
                value: product.inventory_value(),
            }),
        }
    }
    rows
}
