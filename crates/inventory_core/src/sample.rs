//! crates/inventory_core/src/sample.rs
//!
//! The sample catalog loaded on first start and by the "load sample data" action.

use crate::domain::{Category, Product};

pub fn sample_products() -> Vec<Product> {
    [
        (
            1,
            "MacBook Pro 14",
            Category::Notebooks,
            9999.99,
            5,
            "Professional high-performance laptop with the M3 Pro chip",
            "https://via.placeholder.com/200?text=MacBook+Pro",
        ),
        (
            2,
            "iPhone 15 Pro",
            Category::Smartphones,
            7999.99,
            12,
            "Flagship smartphone with an advanced camera and premium design",
            "https://via.placeholder.com/200?text=iPhone+15",
        ),
        (
            3,
            "iPad Air",
            Category::Tablets,
            5999.99,
            8,
            "Versatile tablet for work and creativity with a Liquid Retina display",
            "https://via.placeholder.com/200?text=iPad+Air",
        ),
        (
            4,
            "AirPods Pro",
            Category::Accessories,
            1999.99,
            25,
            "Earbuds with active noise cancellation and spatial audio",
            "https://via.placeholder.com/200?text=AirPods",
        ),
        (
            5,
            "Magic Mouse",
            Category::Peripherals,
            799.99,
            15,
            "Wireless mouse with a multi-touch surface and sleek design",
            "https://via.placeholder.com/200?text=Magic+Mouse",
        ),
    ]
    .into_iter()
    .map(|(id, name, category, price, stock, description, image)| Product {
        id,
        name: name.to_string(),
        category,
        price,
        stock,
        description: description.to_string(),
        image: image.to_string(),
    })
    .collect()
}
