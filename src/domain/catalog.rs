//! Declarative vehicle listing queries.
//!
//! [`CatalogQuery::build`] turns user-supplied listing options into a
//! [`QuerySpec`] that a gateway executes verbatim. Nothing here touches
//! storage.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::vehicle::{Vehicle, VehicleCategory};
use crate::error::{AppError, AppResult};

/// Number of vehicles shown in the featured listing.
pub const FEATURED_LIMIT: u64 = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "price_asc")]
    PriceAscending,
    #[serde(rename = "price_desc")]
    PriceDescending,
    #[serde(rename = "newest")]
    YearDescending,
}

/// Listing options as they arrive from the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogOptions {
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    #[serde(default)]
    pub sort: SortOrder,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    Known(VehicleCategory),
    /// Passed through untouched; matches no stored vehicle.
    Unrecognized(String),
}

impl CategoryFilter {
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<VehicleCategory>() {
            Ok(category) => CategoryFilter::Known(category),
            Err(_) => {
                tracing::debug!(category = %raw, "Unrecognized category filter");
                CategoryFilter::Unrecognized(raw.to_string())
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::Known(category) => category.as_str(),
            CategoryFilter::Unrecognized(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub available_only: bool,
    pub category: Option<CategoryFilter>,
    pub min_rate: Option<Decimal>,
    pub max_rate: Option<Decimal>,
    pub sort: SortOrder,
    pub limit: Option<u64>,
}

impl QuerySpec {
    /// Whether `vehicle` passes every filter.
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        (!self.available_only || vehicle.available)
            && self
                .category
                .as_ref()
                .is_none_or(|c| c.as_str() == vehicle.category)
            && self.min_rate.is_none_or(|min| vehicle.daily_rate >= min)
            && self.max_rate.is_none_or(|max| vehicle.daily_rate <= max)
    }

    /// Order `vehicles` by the requested sort key. The sort is stable.
    pub fn sort(&self, vehicles: &mut [Vehicle]) {
        match self.sort {
            SortOrder::PriceAscending => vehicles.sort_by(|a, b| a.daily_rate.cmp(&b.daily_rate)),
            SortOrder::PriceDescending => vehicles.sort_by(|a, b| b.daily_rate.cmp(&a.daily_rate)),
            SortOrder::YearDescending => vehicles.sort_by(|a, b| b.year.cmp(&a.year)),
        }
    }
}

pub struct CatalogQuery;

impl CatalogQuery {
    pub fn build(options: CatalogOptions) -> AppResult<QuerySpec> {
        if let (Some(min), Some(max)) = (options.min_price, options.max_price) {
            if min > max {
                return Err(AppError::Validation(format!(
                    "Minimum price {} is greater than maximum price {}",
                    min, max
                )));
            }
        }

        let category = options
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(CategoryFilter::parse);

        Ok(QuerySpec {
            available_only: true,
            category,
            min_rate: options.min_price,
            max_rate: options.max_price,
            sort: options.sort,
            limit: options.limit,
        })
    }

    /// The most expensive available vehicles, for the landing page.
    pub fn featured() -> QuerySpec {
        QuerySpec {
            available_only: true,
            category: None,
            min_rate: None,
            max_rate: None,
            sort: SortOrder::PriceDescending,
            limit: Some(FEATURED_LIMIT),
        }
    }
}
