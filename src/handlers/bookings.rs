use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::domain::{Booking, BookingSummary, Identity, RecordId};
use crate::error::AppResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub car_id: RecordId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Create a booking
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<CreateBookingRequest>,
) -> AppResult<Json<Booking>> {
    let today = Utc::now().date_naive();
    let booking = state
        .bookings
        .book(
            &identity,
            payload.car_id,
            payload.start_date,
            payload.end_date,
            today,
        )
        .await?;

    Ok(Json(booking))
}

/// List the user's bookings, newest first
pub async fn my_bookings(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Json<Vec<BookingSummary>>> {
    Ok(Json(state.bookings.list(&identity).await?))
}

/// Cancel a booking
pub async fn cancel_booking(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(booking_id): Path<RecordId>,
) -> AppResult<Json<Booking>> {
    Ok(Json(state.bookings.cancel(&identity, booking_id).await?))
}
