//! Hosted backend: a PostgREST data API under `/rest/v1` and a GoTrue-style
//! auth API under `/auth/v1`.
//!
//! Data calls use the configured service key, so ownership is enforced by
//! the storefront services rather than by row-level policies.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Booking, BookingStatus, BookingSummary, Identity, NewBooking, Profile, QuerySpec, RecordId,
    Session, SortOrder, Vehicle,
};
use crate::gateway::{BackendGateway, GatewayError, GatewayResult};

const CARS: &str = "cars";
const BOOKINGS: &str = "bookings";
const PROFILES: &str = "profiles";

/// Booking columns plus the embedded car summary.
pub(crate) const BOOKING_WITH_CAR: &str = "*,car:car_id(id,make,model,year,image_url)";

#[derive(Clone)]
pub struct RestGateway {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

impl From<AuthUser> for Identity {
    fn from(user: AuthUser) -> Self {
        Identity {
            user_id: user.id,
            email: user.email.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

#[derive(Debug, Serialize)]
struct StatusPatch {
    status: BookingStatus,
}

/// PostgREST query parameters for a catalog query.
pub(crate) fn vehicle_params(spec: &QuerySpec) -> Vec<(&'static str, String)> {
    let mut params = vec![("select", "*".to_string())];

    if spec.available_only {
        params.push(("available", "eq.true".to_string()));
    }
    if let Some(category) = &spec.category {
        params.push(("category", format!("eq.{}", category.as_str())));
    }
    if let Some(min) = spec.min_rate {
        params.push(("daily_rate", format!("gte.{}", min)));
    }
    if let Some(max) = spec.max_rate {
        params.push(("daily_rate", format!("lte.{}", max)));
    }

    let order = match spec.sort {
        SortOrder::PriceAscending => "daily_rate.asc",
        SortOrder::PriceDescending => "daily_rate.desc",
        SortOrder::YearDescending => "year.desc",
    };
    params.push(("order", order.to_string()));

    if let Some(limit) = spec.limit {
        params.push(("limit", limit.to_string()));
    }

    params
}

fn eq(id: impl std::fmt::Display) -> String {
    format!("eq.{}", id)
}

impl RestGateway {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> GatewayResult<Self> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn table(&self, method: reqwest::Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/rest/v1/{}", self.base_url, table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn auth(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/auth/v1/{}", self.base_url, path))
            .header("apikey", &self.api_key)
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> GatewayResult<T> {
        let response = Self::check(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check(response: Response) -> GatewayResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        tracing::warn!(status = %status, message = %message, "Backend request failed");

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GatewayError::Auth(message)),
            _ => Err(GatewayError::Status {
                status: status.as_u16(),
                message,
            }),
        }
    }

    async fn first<T: DeserializeOwned>(request: RequestBuilder) -> GatewayResult<Option<T>> {
        let rows: Vec<T> = Self::send(request).await?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl BackendGateway for RestGateway {
    async fn sign_up(&self, email: &str, password: &str) -> GatewayResult<Session> {
        let response = self
            .auth(reqwest::Method::POST, "signup")
            .json(&Credentials { email, password })
            .send()
            .await?;

        if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
            let message = response.text().await.unwrap_or_default();
            if message.contains("already") {
                return Err(GatewayError::DuplicateEmail);
            }
            return Err(GatewayError::Status {
                status: StatusCode::UNPROCESSABLE_ENTITY.as_u16(),
                message,
            });
        }
        Self::check(response).await?;

        // Signup may or may not return a session depending on project
        // settings; a password grant always does.
        self.sign_in(email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> GatewayResult<Session> {
        let request = self
            .auth(reqwest::Method::POST, "token")
            .query(&[("grant_type", "password")])
            .json(&Credentials { email, password });

        let response = request.send().await?;
        if response.status() == StatusCode::BAD_REQUEST {
            return Err(GatewayError::Auth("Invalid email or password".to_string()));
        }

        let token: TokenResponse = Self::check(response).await?.json().await?;

        Ok(Session {
            access_token: token.access_token,
            identity: token.user.into(),
        })
    }

    async fn session(&self, access_token: &str) -> GatewayResult<Identity> {
        let user: AuthUser =
            Self::send(self.auth(reqwest::Method::GET, "user").bearer_auth(access_token)).await?;
        Ok(user.into())
    }

    async fn sign_out(&self, access_token: &str) -> GatewayResult<()> {
        let response = self
            .auth(reqwest::Method::POST, "logout")
            .bearer_auth(access_token)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn list_vehicles(&self, spec: &QuerySpec) -> GatewayResult<Vec<Vehicle>> {
        Self::send(
            self.table(reqwest::Method::GET, CARS)
                .query(&vehicle_params(spec)),
        )
        .await
    }

    async fn get_vehicle(&self, id: RecordId) -> GatewayResult<Option<Vehicle>> {
        Self::first(
            self.table(reqwest::Method::GET, CARS)
                .query(&[("select", "*".to_string()), ("id", eq(id))]),
        )
        .await
    }

    async fn insert_booking(&self, booking: NewBooking) -> GatewayResult<Booking> {
        Self::first(
            self.table(reqwest::Method::POST, BOOKINGS)
                .header("Prefer", "return=representation")
                .json(&booking),
        )
        .await?
        .ok_or_else(|| GatewayError::Internal("Insert returned no booking".to_string()))
    }

    async fn get_booking(&self, id: RecordId) -> GatewayResult<Option<Booking>> {
        Self::first(
            self.table(reqwest::Method::GET, BOOKINGS)
                .query(&[("select", "*".to_string()), ("id", eq(id))]),
        )
        .await
    }

    async fn update_booking_status(
        &self,
        id: RecordId,
        status: BookingStatus,
    ) -> GatewayResult<Booking> {
        Self::first(
            self.table(reqwest::Method::PATCH, BOOKINGS)
                .query(&[("id", eq(id))])
                .header("Prefer", "return=representation")
                .json(&StatusPatch { status }),
        )
        .await?
        .ok_or_else(|| GatewayError::MissingRow("Booking".to_string()))
    }

    async fn list_bookings(&self, user_id: Uuid) -> GatewayResult<Vec<BookingSummary>> {
        Self::send(self.table(reqwest::Method::GET, BOOKINGS).query(&[
            ("select", BOOKING_WITH_CAR.to_string()),
            ("user_id", eq(user_id)),
            ("order", "created_at.desc".to_string()),
        ]))
        .await
    }

    async fn get_profile(&self, user_id: Uuid) -> GatewayResult<Option<Profile>> {
        Self::first(
            self.table(reqwest::Method::GET, PROFILES)
                .query(&[("select", "*".to_string()), ("id", eq(user_id))]),
        )
        .await
    }

    async fn upsert_profile(&self, profile: Profile) -> GatewayResult<Profile> {
        Self::first(
            self.table(reqwest::Method::POST, PROFILES)
                .header("Prefer", "resolution=merge-duplicates,return=representation")
                .json(&profile),
        )
        .await?
        .ok_or_else(|| GatewayError::Internal("Upsert returned no profile".to_string()))
    }
}
