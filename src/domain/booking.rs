use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::record_id::RecordId;
use crate::domain::vehicle::VehicleSummary;
use crate::error::{AppError, AppResult};

pub use crate::entities::booking::BookingStatus;

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Move to `next`, enforcing pending -> {confirmed, cancelled} and
    /// confirmed -> cancelled. Nothing leaves cancelled.
    pub fn transition(self, next: BookingStatus) -> AppResult<BookingStatus> {
        match (self, next) {
            (BookingStatus::Cancelled, _) => Err(AppError::AlreadyCancelled),
            (BookingStatus::Pending, BookingStatus::Confirmed | BookingStatus::Cancelled)
            | (BookingStatus::Confirmed, BookingStatus::Cancelled) => Ok(next),
            (from, to) => Err(AppError::Validation(format!(
                "Booking cannot move from {} to {}",
                from, to
            ))),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: RecordId,
    pub car_id: RecordId,
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Locked in at creation.
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// Row to insert; `id` and `created_at` are assigned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBooking {
    pub car_id: RecordId,
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: Decimal,
    pub status: BookingStatus,
}

/// A booking with the vehicle fields needed to render it in a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingSummary {
    #[serde(flatten)]
    pub booking: Booking,
    pub car: VehicleSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    use BookingStatus::{Cancelled, Confirmed, Pending};

    #[test]
    fn test_allowed_transitions() {
        assert_eq!(Pending.transition(Confirmed).unwrap(), Confirmed);
        assert_eq!(Pending.transition(Cancelled).unwrap(), Cancelled);
        assert_eq!(Confirmed.transition(Cancelled).unwrap(), Cancelled);
    }

    #[test]
    fn test_cancelled_is_terminal() {
        for next in [Pending, Confirmed, Cancelled] {
            assert!(matches!(
                Cancelled.transition(next),
                Err(AppError::AlreadyCancelled)
            ));
        }
    }

    #[test]
    fn test_no_backwards_or_self_moves() {
        assert!(matches!(
            Confirmed.transition(Pending),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            Confirmed.transition(Confirmed),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            Pending.transition(Pending),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_summary_reads_embedded_car() {
        let json = r#"{
            "id": "6f1c1f3e-2a43-4a6c-9a53-0c7f0b1c7e11",
            "car_id": "0b8f4a5e-3c2d-4e1f-8a9b-7c6d5e4f3a21",
            "user_id": "9a8b7c6d-5e4f-4a3b-8c2d-1e0f9a8b7c6d",
            "start_date": "2024-01-01",
            "end_date": "2024-01-04",
            "total_price": 150.0,
            "status": "confirmed",
            "created_at": "2023-12-20T09:30:00+00:00",
            "car": {
                "id": "0b8f4a5e-3c2d-4e1f-8a9b-7c6d5e4f3a21",
                "make": "Toyota",
                "model": "Corolla",
                "year": 2022,
                "image_url": "https://img.example/corolla.jpg"
            }
        }"#;

        let summary: BookingSummary = serde_json::from_str(json).unwrap();

        assert_eq!(summary.booking.status, Confirmed);
        assert_eq!(summary.booking.total_price, Decimal::from(150));
        assert_eq!(summary.car.make, "Toyota");
        assert_eq!(summary.car.id, summary.booking.car_id);
    }
}
