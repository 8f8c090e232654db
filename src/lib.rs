pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

pub use config::Config;
pub use error::{AppError, AppResult};

use gateway::BackendGateway;
use services::{BookingService, CatalogService, ProfileService};

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn BackendGateway>,
    pub catalog: CatalogService,
    pub bookings: BookingService,
    pub profiles: ProfileService,
}

impl AppState {
    pub fn new(gateway: Arc<dyn BackendGateway>) -> Self {
        Self {
            catalog: CatalogService::new(gateway.clone()),
            bookings: BookingService::new(gateway.clone()),
            profiles: ProfileService::new(gateway.clone()),
            gateway,
        }
    }
}
