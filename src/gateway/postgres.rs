//! Self-hosted backend: PostgreSQL through sea-orm, argon2 password hashes
//! and locally signed JWT sessions.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set, SqlErr,
};
use uuid::Uuid;

use crate::domain::{
    Booking, BookingStatus, BookingSummary, Identity, NewBooking, Profile, QuerySpec, RecordId,
    Session, SortOrder, Vehicle,
};
use crate::entities::{booking, car, profile, user};
use crate::gateway::{BackendGateway, GatewayError, GatewayResult};
use crate::utils::jwt::{create_token, verify_token};

#[derive(Clone)]
pub struct PgGateway {
    db: DatabaseConnection,
    jwt_secret: String,
    jwt_expiration_hours: i64,
}

impl PgGateway {
    pub fn new(db: DatabaseConnection, jwt_secret: String, jwt_expiration_hours: i64) -> Self {
        Self {
            db,
            jwt_secret,
            jwt_expiration_hours,
        }
    }

    fn open_session(&self, user: &user::Model) -> GatewayResult<Session> {
        let access_token = create_token(
            user.id,
            &user.email,
            &self.jwt_secret,
            self.jwt_expiration_hours,
        )?;

        Ok(Session {
            access_token,
            identity: Identity {
                user_id: user.id,
                email: user.email.clone(),
            },
        })
    }
}

/// Applies a catalog query to a `car` select.
pub(crate) fn vehicle_select(spec: &QuerySpec) -> Select<car::Entity> {
    let mut query = car::Entity::find();

    if spec.available_only {
        query = query.filter(car::Column::Available.eq(true));
    }
    if let Some(category) = &spec.category {
        query = query.filter(car::Column::Category.eq(category.as_str()));
    }
    if let Some(min) = spec.min_rate {
        query = query.filter(car::Column::DailyRate.gte(min));
    }
    if let Some(max) = spec.max_rate {
        query = query.filter(car::Column::DailyRate.lte(max));
    }

    query = match spec.sort {
        SortOrder::PriceAscending => query.order_by_asc(car::Column::DailyRate),
        SortOrder::PriceDescending => query.order_by_desc(car::Column::DailyRate),
        SortOrder::YearDescending => query.order_by_desc(car::Column::Year),
    };

    if let Some(limit) = spec.limit {
        query = query.limit(limit);
    }

    query
}

/// A unique violation on account insert means the email was taken by a
/// concurrent sign-up.
fn account_insert_error(sql_err: Option<SqlErr>, err: DbErr) -> GatewayError {
    match sql_err {
        Some(SqlErr::UniqueConstraintViolation(_)) => GatewayError::DuplicateEmail,
        _ => GatewayError::Database(err),
    }
}

impl From<car::Model> for Vehicle {
    fn from(m: car::Model) -> Self {
        Vehicle {
            id: m.id.into(),
            make: m.make,
            model: m.model,
            year: m.year,
            daily_rate: m.daily_rate,
            image_url: m.image_url,
            available: m.available,
            category: m.category,
            description: m.description,
            created_at: m.created_at.with_timezone(&Utc),
        }
    }
}

impl From<booking::Model> for Booking {
    fn from(m: booking::Model) -> Self {
        Booking {
            id: m.id.into(),
            car_id: m.car_id.into(),
            user_id: m.user_id,
            start_date: m.start_date,
            end_date: m.end_date,
            total_price: m.total_price,
            status: m.status,
            created_at: m.created_at.with_timezone(&Utc),
        }
    }
}

impl From<profile::Model> for Profile {
    fn from(m: profile::Model) -> Self {
        Profile {
            id: m.id,
            full_name: m.full_name,
            phone: m.phone,
            address: m.address,
            license_number: m.license_number,
        }
    }
}

#[async_trait]
impl BackendGateway for PgGateway {
    async fn sign_up(&self, email: &str, password: &str) -> GatewayResult<Session> {
        let existing = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(GatewayError::DuplicateEmail);
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| GatewayError::Internal(format!("Failed to hash password: {}", e)))?
            .to_string();

        let new_user = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            ..Default::default()
        };

        let user = new_user
            .insert(&self.db)
            .await
            .map_err(|e| account_insert_error(e.sql_err(), e))?;
        tracing::info!(user_id = %user.id, "Account created");

        self.open_session(&user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> GatewayResult<Session> {
        let user = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .ok_or_else(|| GatewayError::Auth("Invalid email or password".to_string()))?;

        let parsed_hash = PasswordHash::new(&user.password_hash).map_err(|e| {
            GatewayError::Internal(format!("Failed to parse password hash: {}", e))
        })?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| GatewayError::Auth("Invalid email or password".to_string()))?;

        self.open_session(&user)
    }

    async fn session(&self, access_token: &str) -> GatewayResult<Identity> {
        Ok(verify_token(access_token, &self.jwt_secret)?.into())
    }

    async fn sign_out(&self, access_token: &str) -> GatewayResult<()> {
        // Tokens are stateless and lapse at `exp`; the client drops its copy.
        let claims = verify_token(access_token, &self.jwt_secret)?;
        tracing::debug!(user_id = %claims.sub, "Session closed");
        Ok(())
    }

    async fn list_vehicles(&self, spec: &QuerySpec) -> GatewayResult<Vec<Vehicle>> {
        let cars = vehicle_select(spec).all(&self.db).await?;
        Ok(cars.into_iter().map(Vehicle::from).collect())
    }

    async fn get_vehicle(&self, id: RecordId) -> GatewayResult<Option<Vehicle>> {
        // Rows are keyed by UUID; any other id names no row
        let Some(id) = id.as_uuid() else {
            return Ok(None);
        };
        let car = car::Entity::find_by_id(id).one(&self.db).await?;
        Ok(car.map(Vehicle::from))
    }

    async fn insert_booking(&self, booking: NewBooking) -> GatewayResult<Booking> {
        let car_id = booking
            .car_id
            .as_uuid()
            .ok_or_else(|| GatewayError::MissingRow("Vehicle".to_string()))?;

        let new_booking = booking::ActiveModel {
            id: Set(Uuid::new_v4()),
            car_id: Set(car_id),
            user_id: Set(booking.user_id),
            start_date: Set(booking.start_date),
            end_date: Set(booking.end_date),
            total_price: Set(booking.total_price),
            status: Set(booking.status),
            ..Default::default()
        };

        Ok(new_booking.insert(&self.db).await?.into())
    }

    async fn get_booking(&self, id: RecordId) -> GatewayResult<Option<Booking>> {
        let Some(id) = id.as_uuid() else {
            return Ok(None);
        };
        let booking = booking::Entity::find_by_id(id).one(&self.db).await?;
        Ok(booking.map(Booking::from))
    }

    async fn update_booking_status(
        &self,
        id: RecordId,
        status: BookingStatus,
    ) -> GatewayResult<Booking> {
        let missing = || GatewayError::MissingRow("Booking".to_string());
        let id = id.as_uuid().ok_or_else(missing)?;
        let booking = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(missing)?;

        let mut active: booking::ActiveModel = booking.into();
        active.status = Set(status);

        Ok(active.update(&self.db).await?.into())
    }

    async fn list_bookings(&self, user_id: Uuid) -> GatewayResult<Vec<BookingSummary>> {
        let rows = booking::Entity::find()
            .filter(booking::Column::UserId.eq(user_id))
            .order_by_desc(booking::Column::CreatedAt)
            .find_also_related(car::Entity)
            .all(&self.db)
            .await?;

        let summaries = rows
            .into_iter()
            .filter_map(|(b, c)| match c {
                Some(c) => Some(BookingSummary {
                    car: Vehicle::from(c).summary(),
                    booking: b.into(),
                }),
                None => {
                    tracing::warn!(booking_id = %b.id, car_id = %b.car_id, "Booking references a missing car");
                    None
                }
            })
            .collect();

        Ok(summaries)
    }

    async fn get_profile(&self, user_id: Uuid) -> GatewayResult<Option<Profile>> {
        let profile = profile::Entity::find_by_id(user_id).one(&self.db).await?;
        Ok(profile.map(Profile::from))
    }

    async fn upsert_profile(&self, profile: Profile) -> GatewayResult<Profile> {
        let active = profile::ActiveModel {
            id: Set(profile.id),
            full_name: Set(profile.full_name),
            phone: Set(profile.phone),
            address: Set(profile.address),
            license_number: Set(profile.license_number),
            ..Default::default()
        };

        let stored = profile::Entity::insert(active)
            .on_conflict(
                OnConflict::column(profile::Column::Id)
                    .update_columns([
                        profile::Column::FullName,
                        profile::Column::Phone,
                        profile::Column::Address,
                        profile::Column::LicenseNumber,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await?;

        Ok(stored.into())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use sea_orm::{DbBackend, QueryTrait};

    use super::*;
    use crate::domain::{CatalogOptions, CatalogQuery};

    #[test]
    fn test_vehicle_select_applies_every_filter() {
        let spec = CatalogQuery::build(CatalogOptions {
            category: Some("suv".to_string()),
            min_price: Some(Decimal::from(30)),
            max_price: Some(Decimal::from(90)),
            sort: SortOrder::YearDescending,
            limit: Some(10),
        })
        .unwrap();

        let sql = vehicle_select(&spec).build(DbBackend::Postgres).to_string();

        assert!(sql.contains(r#""car"."available" = TRUE"#), "{}", sql);
        assert!(sql.contains(r#""car"."category" = 'suv'"#), "{}", sql);
        assert!(sql.contains(r#""car"."daily_rate" >= 30"#), "{}", sql);
        assert!(sql.contains(r#""car"."daily_rate" <= 90"#), "{}", sql);
        assert!(sql.contains(r#"ORDER BY "car"."year" DESC"#), "{}", sql);
        assert!(sql.contains("LIMIT 10"), "{}", sql);
    }

    #[test]
    fn test_unique_violation_on_account_insert_is_duplicate_email() {
        let err = account_insert_error(
            Some(SqlErr::UniqueConstraintViolation(
                "app_user_email_key".to_string(),
            )),
            DbErr::Custom("duplicate key value".to_string()),
        );
        assert!(matches!(err, GatewayError::DuplicateEmail));

        let err = account_insert_error(None, DbErr::Custom("connection reset".to_string()));
        assert!(matches!(err, GatewayError::Database(_)));
    }

    #[test]
    fn test_featured_select() {
        let sql = vehicle_select(&CatalogQuery::featured())
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains(r#"ORDER BY "car"."daily_rate" DESC"#), "{}", sql);
        assert!(sql.contains("LIMIT 3"), "{}", sql);
        assert!(!sql.contains(r#""car"."category" ="#), "{}", sql);
    }
}
