use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{CatalogOptions, CatalogQuery, DateRange, Quote, RecordId, Vehicle};
use crate::error::{AppError, AppResult};
use crate::gateway::BackendGateway;

#[derive(Clone)]
pub struct CatalogService {
    gateway: Arc<dyn BackendGateway>,
}

impl CatalogService {
    pub fn new(gateway: Arc<dyn BackendGateway>) -> Self {
        Self { gateway }
    }

    /// Available vehicles matching `options`. Bad options fail before any
    /// backend call.
    pub async fn list(&self, options: CatalogOptions) -> AppResult<Vec<Vehicle>> {
        let spec = CatalogQuery::build(options)?;
        Ok(self.gateway.list_vehicles(&spec).await?)
    }

    pub async fn featured(&self) -> AppResult<Vec<Vehicle>> {
        Ok(self.gateway.list_vehicles(&CatalogQuery::featured()).await?)
    }

    pub async fn get(&self, id: RecordId) -> AppResult<Vehicle> {
        self.gateway
            .get_vehicle(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))
    }

    /// Prices a rental of vehicle `id`. A missing start falls back to
    /// `today` and a missing end to the default rental length after start.
    pub async fn quote(
        &self,
        id: RecordId,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> AppResult<Quote> {
        let vehicle = self.get(id).await?;

        let default = DateRange::default_from(start_date.unwrap_or(today));
        let range = DateRange::new(default.start(), end_date.unwrap_or(default.end()))?;

        Quote::new(vehicle.id, vehicle.daily_rate, range)
    }
}
