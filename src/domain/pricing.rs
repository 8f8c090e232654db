//! Rental price derivation.
//!
//! A rental is charged per whole day between pick-up and return, with a
//! one-day minimum. Totals are rounded to cents, midpoint away from zero.

use chrono::{Duration, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::domain::record_id::RecordId;
use crate::error::{AppError, AppResult};

/// Days between pick-up and return suggested on a vehicle detail page.
pub const DEFAULT_RENTAL_DAYS: i64 = 3;

/// A validated pick-up/return pair with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if end < start {
            return Err(AppError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Today through today + [`DEFAULT_RENTAL_DAYS`].
    pub fn default_from(today: NaiveDate) -> Self {
        Self {
            start: today,
            end: today + Duration::days(DEFAULT_RENTAL_DAYS),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Chargeable days, never less than one.
    pub fn rental_days(&self) -> i64 {
        (self.end - self.start).num_days().max(1)
    }

    pub fn price(&self, daily_rate: Decimal) -> Decimal {
        (daily_rate * Decimal::from(self.rental_days()))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// Total price for renting at `daily_rate` from `start` to `end`.
pub fn compute_total(daily_rate: Decimal, start: NaiveDate, end: NaiveDate) -> AppResult<Decimal> {
    if daily_rate <= Decimal::ZERO {
        return Err(AppError::Validation(
            "Daily rate must be positive".to_string(),
        ));
    }
    Ok(DateRange::new(start, end)?.price(daily_rate))
}

/// A price computed for display, not persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub vehicle_id: RecordId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: i64,
    pub daily_rate: Decimal,
    pub total_price: Decimal,
}

impl Quote {
    pub fn new(vehicle_id: RecordId, daily_rate: Decimal, range: DateRange) -> AppResult<Self> {
        Ok(Self {
            vehicle_id,
            start_date: range.start(),
            end_date: range.end(),
            days: range.rental_days(),
            daily_rate,
            total_price: compute_total(daily_rate, range.start(), range.end())?,
        })
    }
}
