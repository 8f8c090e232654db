use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::domain::{CatalogOptions, Quote, RecordId, Vehicle};
use crate::error::AppResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct QuoteParams {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// List available cars with optional filters and sort
pub async fn list_cars(
    State(state): State<AppState>,
    Query(options): Query<CatalogOptions>,
) -> AppResult<Json<Vec<Vehicle>>> {
    Ok(Json(state.catalog.list(options).await?))
}

/// Featured cars for the landing page
pub async fn featured_cars(State(state): State<AppState>) -> AppResult<Json<Vec<Vehicle>>> {
    Ok(Json(state.catalog.featured().await?))
}

/// Get car details
pub async fn get_car(
    State(state): State<AppState>,
    Path(car_id): Path<RecordId>,
) -> AppResult<Json<Vehicle>> {
    Ok(Json(state.catalog.get(car_id).await?))
}

/// Price a rental of this car for the given dates
pub async fn quote(
    State(state): State<AppState>,
    Path(car_id): Path<RecordId>,
    Query(params): Query<QuoteParams>,
) -> AppResult<Json<Quote>> {
    let today = Utc::now().date_naive();
    let quote = state
        .catalog
        .quote(car_id, params.start, params.end, today)
        .await?;

    Ok(Json(quote))
}
