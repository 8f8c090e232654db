use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::record_id::RecordId;

/// A rentable car as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: RecordId,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub daily_rate: Decimal,
    pub image_url: String,
    pub available: bool,
    pub category: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn summary(&self) -> VehicleSummary {
        VehicleSummary {
            id: self.id,
            make: self.make.clone(),
            model: self.model.clone(),
            year: self.year,
            image_url: self.image_url.clone(),
        }
    }
}

/// The vehicle fields embedded in a booking listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSummary {
    pub id: RecordId,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleCategory {
    Economy,
    Compact,
    Suv,
    Luxury,
    Van,
}

impl VehicleCategory {
    pub const ALL: [VehicleCategory; 5] = [
        VehicleCategory::Economy,
        VehicleCategory::Compact,
        VehicleCategory::Suv,
        VehicleCategory::Luxury,
        VehicleCategory::Van,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleCategory::Economy => "economy",
            VehicleCategory::Compact => "compact",
            VehicleCategory::Suv => "suv",
            VehicleCategory::Luxury => "luxury",
            VehicleCategory::Van => "van",
        }
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("unknown vehicle category: {}", s))
    }
}
