//! services/web/src/web/params.rs
//!
//! Query-string parameters shared by the HTML listing and the JSON API.

use inventory_core::commands::{optional_category, Command};
use inventory_core::domain::{ParseValueError, QueryState, SortField, SortOrder};
use inventory_core::ports::{PortError, PortResult};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Case-insensitive text matched against name and description.
    pub search: Option<String>,
    /// Category label; empty means all categories.
    pub category: Option<String>,
    /// One of `name`, `category`, `price`, `stock`.
    pub sort: Option<String>,
    /// `asc` or `desc`.
    pub order: Option<String>,
}

impl ListParams {
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.category.is_none() && self.sort.is_none() && self.order.is_none()
    }

    /// Overlays the given parameters on `base`.
    pub fn apply_to(&self, base: &QueryState) -> PortResult<QueryState> {
        let mut query = base.clone();
        if let Some(search) = &self.search {
            query.search = search.clone();
        }
        if self.category.is_some() {
            query.category = optional_category(self.category.as_deref())?;
        }
        if let Some(sort) = &self.sort {
            query.sort_field = parse::<SortField>(sort)?;
        }
        if let Some(order) = &self.order {
            query.sort_order = parse::<SortOrder>(order)?;
        }
        Ok(query)
    }

    /// The commands that move the session's query state to `target`.
    pub fn commands_for(target: QueryState) -> [Command; 3] {
        [
            Command::SetSearch {
                term: target.search,
            },
            Command::SetCategoryFilter {
                category: target.category,
            },
            Command::SetSort {
                field: target.sort_field,
                order: target.sort_order,
            },
        ]
    }
}

fn parse<T>(raw: &str) -> PortResult<T>
where
    T: std::str::FromStr<Err = ParseValueError>,
{
    raw.parse()
        .map_err(|e: ParseValueError| PortError::InvalidInput(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_core::Category;

    #[test]
    fn overlays_only_supplied_parameters() {
        let base = QueryState {
            search: "mac".to_string(),
            ..QueryState::default()
        };
        let params = ListParams {
            category: Some("tablets".to_string()),
            order: Some("desc".to_string()),
            ..ListParams::default()
        };
        let query = params.apply_to(&base).unwrap();
        assert_eq!(query.search, "mac");
        assert_eq!(query.category, Some(Category::Tablets));
        assert_eq!(query.sort_field, SortField::Name);
        assert_eq!(query.sort_order, SortOrder::Desc);
    }

    #[test]
    fn rejects_unknown_sort_fields() {
        let params = ListParams {
            sort: Some("colour".to_string()),
            ..ListParams::default()
        };
        assert!(matches!(
            params.apply_to(&QueryState::default()),
            Err(PortError::InvalidInput(_))
        ));
    }
}
