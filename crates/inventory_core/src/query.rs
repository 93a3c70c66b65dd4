//! crates/inventory_core/src/query.rs
//!
//! The Query Engine: derives the ordered, filtered subset of products shown in
//! the listing. A pure function of the store snapshot and the query state.

use crate::domain::{Product, QueryState, SortField, SortOrder};
use std::cmp::Ordering;

/// Filters and sorts `products` according to `query`.
///
/// The sort is stable, so products with equal keys keep their relative input
/// order in either direction. `products` is never modified.
pub fn derive_view(products: &[Product], query: &QueryState) -> Vec<Product> {
    let needle = query.search.to_lowercase();
    let mut visible: Vec<Product> = products
        .iter()
        .filter(|product| matches_search(product, &needle) && matches_category(product, query))
        .cloned()
        .collect();

    visible.sort_by(|a, b| {
        let ordering = compare_by(a, b, query.sort_field);
        match query.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    visible
}

/// Whether `product` passes both the search and the category predicate.
pub fn matches(product: &Product, query: &QueryState) -> bool {
    matches_search(product, &query.search.to_lowercase()) && matches_category(product, query)
}

fn matches_search(product: &Product, needle: &str) -> bool {
    needle.is_empty()
        || product.name.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
}

fn matches_category(product: &Product, query: &QueryState) -> bool {
    query.category.map_or(true, |category| product.category == category)
}

fn compare_by(a: &Product, b: &Product, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortField::Category => a
            .category
            .as_str()
            .to_lowercase()
            .cmp(&b.category.as_str().to_lowercase()),
        SortField::Price => a.price.total_cmp(&b.price),
        SortField::Stock => a.stock.cmp(&b.stock),
    }
}
