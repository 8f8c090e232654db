use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

use super::m20240601_000001_create_users::User;
use super::m20240601_000002_create_cars::Car;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(BookingStatus::Enum)
                    .values([
                        BookingStatus::Pending,
                        BookingStatus::Confirmed,
                        BookingStatus::Cancelled,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(uuid(Booking::Id).primary_key())
                    .col(uuid(Booking::CarId).not_null())
                    .col(uuid(Booking::UserId).not_null())
                    .col(date(Booking::StartDate).not_null())
                    .col(date(Booking::EndDate).not_null())
                    .col(decimal_len(Booking::TotalPrice, 12, 2).not_null())
                    .col(
                        ColumnDef::new(Booking::Status)
                            .custom(BookingStatus::Enum)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        timestamp_with_time_zone(Booking::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(Expr::col(Booking::StartDate).lte(Expr::col(Booking::EndDate)))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_car")
                            .from(Booking::Table, Booking::CarId)
                            .to(Car::Table, Car::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_user")
                            .from(Booking::Table, Booking::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_user_created_at")
                    .table(Booking::Table)
                    .col(Booking::UserId)
                    .col(Booking::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(BookingStatus::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Booking {
    Table,
    Id,
    CarId,
    UserId,
    StartDate,
    EndDate,
    TotalPrice,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum BookingStatus {
    #[sea_orm(iden = "booking_status")]
    Enum,
    #[sea_orm(iden = "pending")]
    Pending,
    #[sea_orm(iden = "confirmed")]
    Confirmed,
    #[sea_orm(iden = "cancelled")]
    Cancelled,
}
