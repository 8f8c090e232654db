//! The auth and storage contract the storefront relies on.
//!
//! The core never talks to storage itself. Any service that can hand out
//! sessions and read/write the `car`, `booking` and `profile` tables can
//! sit behind [`BackendGateway`].

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    Booking, BookingStatus, BookingSummary, Identity, NewBooking, Profile, QuerySpec, RecordId,
    Session, Vehicle,
};

#[cfg(test)]
pub(crate) mod memory;
pub mod postgres;
pub mod rest;

pub use postgres::PgGateway;
pub use rest::RestGateway;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("authentication rejected: {0}")]
    Auth(String),

    #[error("email already registered")]
    DuplicateEmail,

    #[error("{0} not found")]
    MissingRow(String),

    #[error("{0}")]
    Internal(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// Creates an account and opens a session for it.
    async fn sign_up(&self, email: &str, password: &str) -> GatewayResult<Session>;

    /// Opens a session for an existing account.
    async fn sign_in(&self, email: &str, password: &str) -> GatewayResult<Session>;

    /// Resolves an access token to the identity it was issued for.
    async fn session(&self, access_token: &str) -> GatewayResult<Identity>;

    /// Ends the session behind `access_token`.
    async fn sign_out(&self, access_token: &str) -> GatewayResult<()>;

    /// Filtered, sorted and optionally limited vehicle read.
    async fn list_vehicles(&self, spec: &QuerySpec) -> GatewayResult<Vec<Vehicle>>;

    async fn get_vehicle(&self, id: RecordId) -> GatewayResult<Option<Vehicle>>;

    /// Inserts a booking and returns the stored row with its assigned id.
    async fn insert_booking(&self, booking: NewBooking) -> GatewayResult<Booking>;

    async fn get_booking(&self, id: RecordId) -> GatewayResult<Option<Booking>>;

    /// Sets the status of one booking and returns the updated row.
    async fn update_booking_status(
        &self,
        id: RecordId,
        status: BookingStatus,
    ) -> GatewayResult<Booking>;

    /// All bookings owned by `user_id` with their vehicle, newest first.
    async fn list_bookings(&self, user_id: Uuid) -> GatewayResult<Vec<BookingSummary>>;

    async fn get_profile(&self, user_id: Uuid) -> GatewayResult<Option<Profile>>;

    /// Inserts or replaces the profile row keyed by `profile.id`.
    async fn upsert_profile(&self, profile: Profile) -> GatewayResult<Profile>;
}
