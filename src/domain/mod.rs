//! Storefront domain: vehicles, pricing, bookings and profiles.
//!
//! Everything here is free of I/O. Persistence goes through
//! [`crate::gateway::BackendGateway`].

pub mod booking;
pub mod catalog;
pub mod pricing;
pub mod profile;
pub mod record_id;
pub mod session;
pub mod vehicle;

pub use booking::{Booking, BookingStatus, BookingSummary, NewBooking};
pub use catalog::{CatalogOptions, CatalogQuery, CategoryFilter, QuerySpec, SortOrder};
pub use pricing::{compute_total, DateRange, Quote};
pub use profile::{Profile, ProfileUpdate};
pub use record_id::RecordId;
pub use session::{Identity, Session};
pub use vehicle::{Vehicle, VehicleCategory, VehicleSummary};
