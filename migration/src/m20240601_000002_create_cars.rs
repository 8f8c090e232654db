use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Car::Table)
                    .if_not_exists()
                    .col(uuid(Car::Id).primary_key())
                    .col(string_len(Car::Make, 100).not_null())
                    .col(string_len(Car::Model, 100).not_null())
                    .col(integer(Car::Year).not_null())
                    .col(decimal_len(Car::DailyRate, 10, 2).not_null())
                    .col(text(Car::ImageUrl).not_null())
                    .col(boolean(Car::Available).not_null().default(true))
                    .col(string_len(Car::Category, 50).not_null())
                    .col(text(Car::Description).not_null())
                    .col(
                        timestamp_with_time_zone(Car::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(Expr::col(Car::DailyRate).gt(0))
                    .to_owned(),
            )
            .await?;

        // Catalog listing filters on availability and sorts on rate
        manager
            .create_index(
                Index::create()
                    .name("idx_car_available_daily_rate")
                    .table(Car::Table)
                    .col(Car::Available)
                    .col(Car::DailyRate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Car::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Car {
    Table,
    Id,
    Make,
    Model,
    Year,
    DailyRate,
    ImageUrl,
    Available,
    Category,
    Description,
    CreatedAt,
}
