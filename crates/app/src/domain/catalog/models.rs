//! Catalog Models

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::uuids::TypedUuid;

pub type FoodUuid = TypedUuid<Food>;
pub type RestaurantUuid = TypedUuid<Restaurant>;

/// Food Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub uuid: FoodUuid,
    pub restaurant_uuid: RestaurantUuid,
    pub name: String,
    pub description: String,
    /// Current menu price in whole currency units.
    pub price: u64,
    pub categories: Vec<String>,
    pub image: Option<String>,
}

/// Restaurant Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub uuid: RestaurantUuid,
    pub name: String,
    pub location: String,
    pub description: String,
    pub mobile: String,
    pub image: Option<String>,
    pub categories: Vec<String>,
    pub making_time: String,
    pub is_open: bool,
}

/// Filters for a food search. Every filter is optional and they combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoodSearch {
    /// Case-insensitive substring of the food name.
    pub name: Option<String>,

    /// Category the food must carry, compared case-insensitively.
    pub category: Option<String>,

    pub sort: Option<PriceSort>,
}

impl FoodSearch {
    /// Build a search, treating blank filters as absent.
    #[must_use]
    pub fn new(name: Option<String>, category: Option<String>, sort: Option<PriceSort>) -> Self {
        Self {
            name: non_blank(name),
            category: non_blank(category),
            sort,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Price ordering for food searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSort {
    Ascending,
    Descending,
}

impl PriceSort {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort order: {0}")]
pub struct UnknownPriceSort(pub String);

impl FromStr for PriceSort {
    type Err = UnknownPriceSort;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Ascending),
            "desc" => Ok(Self::Descending),
            _ => Err(UnknownPriceSort(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_filters_are_dropped() {
        let search = FoodSearch::new(Some("  ".to_string()), Some(" Veg ".to_string()), None);

        assert_eq!(search.name, None);
        assert_eq!(search.category.as_deref(), Some("Veg"));
    }

    #[test]
    fn price_sort_parses_both_directions() {
        assert_eq!("asc".parse(), Ok(PriceSort::Ascending));
        assert_eq!("DESC".parse(), Ok(PriceSort::Descending));
        assert_eq!(
            "cheapest".parse::<PriceSort>(),
            Err(UnknownPriceSort("cheapest".to_string()))
        );
    }
}
