pub mod auth;
pub mod bookings;
pub mod cars;
pub mod profile;
