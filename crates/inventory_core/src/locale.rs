//! crates/inventory_core/src/locale.rs
//!
//! Number formatting and the handful of localized labels the views and the CSV
//! export need.

use crate::domain::{Category, ParseValueError};
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Locale {
    #[default]
    En,
    PtBr,
}

impl Locale {
    pub fn tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::PtBr => "pt-BR",
        }
    }

    /// Formats an amount of money with two decimals and digit grouping,
    /// e.g. `$1,234.56` or `R$ 1.234,56`.
    pub fn currency(self, value: f64) -> String {
        let (symbol, group, decimal) = match self {
            Locale::En => ("$", ',', '.'),
            Locale::PtBr => ("R$ ", '.', ','),
        };
        let fixed = format!("{:.2}", value.abs());
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
        format!(
            "{sign}{symbol}{}{decimal}{frac_part}",
            group_digits(int_part, group)
        )
    }

    /// `1 unit`, `5 units`.
    pub fn units(self, count: u64) -> String {
        match (self, count) {
            (Locale::En, 1) => "1 unit".to_string(),
            (Locale::En, n) => format!("{n} units"),
            (Locale::PtBr, 1) => "1 unidade".to_string(),
            (Locale::PtBr, n) => format!("{n} unidades"),
        }
    }

    /// `1 product found`, `3 products found`.
    pub fn result_count(self, count: usize) -> String {
        match (self, count) {
            (Locale::En, 1) => "1 product found".to_string(),
            (Locale::En, n) => format!("{n} products found"),
            (Locale::PtBr, 1) => "1 produto encontrado".to_string(),
            (Locale::PtBr, n) => format!("{n} produtos encontrados"),
        }
    }

    pub fn category_label(self, category: Category) -> &'static str {
        match (self, category) {
            (Locale::PtBr, Category::Accessories) => "Acessórios",
            (Locale::PtBr, Category::Peripherals) => "Periféricos",
            (_, category) => category.as_str(),
        }
    }

    pub fn empty_description(self) -> &'static str {
        match self {
            Locale::En => "No description",
            Locale::PtBr => "Sem descrição",
        }
    }

    pub fn csv_header(self) -> &'static str {
        match self {
            Locale::En => "Name,Category,Price,Stock,Total,Description",
            Locale::PtBr => "Nome,Categoria,Preço,Estoque,Total,Descrição",
        }
    }
}

impl FromStr for Locale {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            "pt" | "pt-br" => Ok(Locale::PtBr),
            _ => Err(ParseValueError::new("locale", s)),
        }
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
