use sea_orm_migration::{prelude::*, schema::*};

use super::m20240601_000001_create_users::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Profile fields are stored as typed, so none of them is length-capped.
fn profile_table() -> TableCreateStatement {
    Table::create()
        .table(Profile::Table)
        .if_not_exists()
        .col(uuid(Profile::Id).primary_key())
        .col(text_null(Profile::FullName))
        .col(text_null(Profile::Phone))
        .col(text_null(Profile::Address))
        .col(text_null(Profile::LicenseNumber))
        .col(
            timestamp_with_time_zone(Profile::CreatedAt)
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_profile_user")
                .from(Profile::Table, Profile::Id)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(profile_table()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Profile::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Profile {
    Table,
    Id,
    FullName,
    Phone,
    Address,
    LicenseNumber,
    CreatedAt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_columns_are_unbounded_text() {
        let sql = profile_table().to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#""phone" text"#), "{}", sql);
        assert!(sql.contains(r#""license_number" text"#), "{}", sql);
        assert!(!sql.contains("varchar"), "{}", sql);
    }
}
