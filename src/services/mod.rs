pub mod booking;
pub mod catalog;
pub mod profile;

pub use booking::BookingService;
pub use catalog::CatalogService;
pub use profile::ProfileService;
