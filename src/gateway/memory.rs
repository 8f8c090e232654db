//! In-process gateway for service tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{
    Booking, BookingStatus, BookingSummary, Identity, NewBooking, Profile, QuerySpec, RecordId,
    Session, Vehicle,
};
use crate::gateway::{BackendGateway, GatewayError, GatewayResult};

#[derive(Default)]
struct State {
    accounts: HashMap<String, (Identity, String)>,
    tokens: HashMap<String, Identity>,
    vehicles: Vec<Vehicle>,
    bookings: Vec<Booking>,
    profiles: HashMap<Uuid, Profile>,
    ticks: i64,
}

impl State {
    /// Strictly increasing creation times.
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        self.ticks += 1;
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(self.ticks)
    }
}

#[derive(Default)]
pub(crate) struct InMemoryGateway {
    state: Mutex<State>,
}

impl InMemoryGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("gateway state poisoned")
    }

    pub(crate) fn add_vehicle(&self, daily_rate: Decimal, available: bool) -> Vehicle {
        let mut state = self.state();
        let vehicle = Vehicle {
            id: RecordId::new_v4(),
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2022,
            daily_rate,
            image_url: "https://img.example/corolla.jpg".to_string(),
            available,
            category: "compact".to_string(),
            description: "Reliable compact sedan".to_string(),
            created_at: state.next_timestamp(),
        };
        state.vehicles.push(vehicle.clone());
        vehicle
    }

    pub(crate) fn set_available(&self, vehicle_id: RecordId, available: bool) {
        let mut state = self.state();
        if let Some(v) = state.vehicles.iter_mut().find(|v| v.id == vehicle_id) {
            v.available = available;
        }
    }

    pub(crate) fn force_status(&self, booking_id: RecordId, status: BookingStatus) {
        let mut state = self.state();
        if let Some(b) = state.bookings.iter_mut().find(|b| b.id == booking_id) {
            b.status = status;
        }
    }

    pub(crate) fn booking(&self, booking_id: RecordId) -> Option<Booking> {
        self.state()
            .bookings
            .iter()
            .find(|b| b.id == booking_id)
            .cloned()
    }
}

#[async_trait]
impl BackendGateway for InMemoryGateway {
    async fn sign_up(&self, email: &str, password: &str) -> GatewayResult<Session> {
        {
            let mut state = self.state();
            if state.accounts.contains_key(email) {
                return Err(GatewayError::DuplicateEmail);
            }
            let identity = Identity {
                user_id: Uuid::new_v4(),
                email: email.to_string(),
            };
            state
                .accounts
                .insert(email.to_string(), (identity, password.to_string()));
        }
        self.sign_in(email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> GatewayResult<Session> {
        let mut state = self.state();
        let identity = match state.accounts.get(email) {
            Some((identity, stored)) if stored == password => identity.clone(),
            _ => return Err(GatewayError::Auth("Invalid email or password".to_string())),
        };
        let access_token = Uuid::new_v4().to_string();
        state.tokens.insert(access_token.clone(), identity.clone());

        Ok(Session {
            access_token,
            identity,
        })
    }

    async fn session(&self, access_token: &str) -> GatewayResult<Identity> {
        self.state()
            .tokens
            .get(access_token)
            .cloned()
            .ok_or_else(|| GatewayError::Auth("Unknown session".to_string()))
    }

    async fn sign_out(&self, access_token: &str) -> GatewayResult<()> {
        self.state()
            .tokens
            .remove(access_token)
            .map(|_| ())
            .ok_or_else(|| GatewayError::Auth("Unknown session".to_string()))
    }

    async fn list_vehicles(&self, spec: &QuerySpec) -> GatewayResult<Vec<Vehicle>> {
        let mut vehicles: Vec<Vehicle> = self
            .state()
            .vehicles
            .iter()
            .filter(|v| spec.matches(v))
            .cloned()
            .collect();
        spec.sort(&mut vehicles);
        if let Some(limit) = spec.limit {
            vehicles.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        Ok(vehicles)
    }

    async fn get_vehicle(&self, id: RecordId) -> GatewayResult<Option<Vehicle>> {
        Ok(self.state().vehicles.iter().find(|v| v.id == id).cloned())
    }

    async fn insert_booking(&self, booking: NewBooking) -> GatewayResult<Booking> {
        let mut state = self.state();
        let stored = Booking {
            id: RecordId::new_v4(),
            car_id: booking.car_id,
            user_id: booking.user_id,
            start_date: booking.start_date,
            end_date: booking.end_date,
            total_price: booking.total_price,
            status: booking.status,
            created_at: state.next_timestamp(),
        };
        state.bookings.push(stored.clone());
        Ok(stored)
    }

    async fn get_booking(&self, id: RecordId) -> GatewayResult<Option<Booking>> {
        Ok(self.booking(id))
    }

    async fn update_booking_status(
        &self,
        id: RecordId,
        status: BookingStatus,
    ) -> GatewayResult<Booking> {
        let mut state = self.state();
        let booking = state
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| GatewayError::MissingRow("Booking".to_string()))?;
        booking.status = status;
        Ok(booking.clone())
    }

    async fn list_bookings(&self, user_id: Uuid) -> GatewayResult<Vec<BookingSummary>> {
        let state = self.state();
        let mut summaries: Vec<BookingSummary> = state
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .filter_map(|b| {
                let car = state.vehicles.iter().find(|v| v.id == b.car_id)?;
                Some(BookingSummary {
                    booking: b.clone(),
                    car: car.summary(),
                })
            })
            .collect();
        summaries.sort_by(|a, b| b.booking.created_at.cmp(&a.booking.created_at));
        Ok(summaries)
    }

    async fn get_profile(&self, user_id: Uuid) -> GatewayResult<Option<Profile>> {
        Ok(self.state().profiles.get(&user_id).cloned())
    }

    async fn upsert_profile(&self, profile: Profile) -> GatewayResult<Profile> {
        self.state().profiles.insert(profile.id, profile.clone());
        Ok(profile)
    }
}
