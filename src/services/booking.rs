//! Booking lifecycle: creation, cancellation and per-user listing.
//!
//! Availability is read and the booking written in separate gateway calls
//! with no lock between them. Overlapping bookings for one vehicle are
//! accepted as independent requests.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{
    compute_total, Booking, BookingStatus, BookingSummary, Identity, NewBooking, RecordId, Vehicle,
};
use crate::error::{AppError, AppResult};
use crate::gateway::BackendGateway;

#[derive(Clone)]
pub struct BookingService {
    gateway: Arc<dyn BackendGateway>,
}

impl BookingService {
    pub fn new(gateway: Arc<dyn BackendGateway>) -> Self {
        Self { gateway }
    }

    /// Creates a pending booking of `vehicle` for `identity`.
    pub async fn create(
        &self,
        identity: &Identity,
        vehicle: &Vehicle,
        start_date: NaiveDate,
        end_date: NaiveDate,
        today: NaiveDate,
    ) -> AppResult<Booking> {
        if !vehicle.available {
            return Err(AppError::Unavailable(vehicle.id));
        }

        if start_date < today {
            return Err(AppError::Validation(
                "Pick-up date cannot be in the past".to_string(),
            ));
        }

        let total_price = compute_total(vehicle.daily_rate, start_date, end_date)?;

        let booking = self
            .gateway
            .insert_booking(NewBooking {
                car_id: vehicle.id,
                user_id: identity.user_id,
                start_date,
                end_date,
                total_price,
                status: BookingStatus::Pending,
            })
            .await?;

        tracing::info!(
            booking_id = %booking.id,
            car_id = %vehicle.id,
            user_id = %identity.user_id,
            total_price = %booking.total_price,
            "Booking created"
        );

        Ok(booking)
    }

    /// Looks up the vehicle and books it.
    pub async fn book(
        &self,
        identity: &Identity,
        vehicle_id: RecordId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        today: NaiveDate,
    ) -> AppResult<Booking> {
        let vehicle = self
            .gateway
            .get_vehicle(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        self.create(identity, &vehicle, start_date, end_date, today)
            .await
    }

    /// Cancels a booking owned by `identity`. Cancelling twice is an error.
    pub async fn cancel(&self, identity: &Identity, booking_id: RecordId) -> AppResult<Booking> {
        let booking = self
            .gateway
            .get_booking(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if booking.user_id != identity.user_id {
            return Err(AppError::Forbidden(
                "You can only cancel your own bookings".to_string(),
            ));
        }

        let next = booking.status.transition(BookingStatus::Cancelled)?;
        let cancelled = self
            .gateway
            .update_booking_status(booking_id, next)
            .await?;

        tracing::info!(booking_id = %booking_id, user_id = %identity.user_id, "Booking cancelled");

        Ok(cancelled)
    }

    /// Bookings of `identity`, most recent first.
    pub async fn list(&self, identity: &Identity) -> AppResult<Vec<BookingSummary>> {
        Ok(self.gateway.list_bookings(identity.user_id).await?)
    }
}
