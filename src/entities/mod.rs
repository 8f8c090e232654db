pub mod booking;
pub mod car;
pub mod profile;
pub mod user;
