use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Drivers {
    Table,
    Id,
    Username,
    Password,
    OnlineStatus,
    Latitude,
    Longitude,
    Status,
    CreatedAt,
    CoordinateUpdatedAt,
}

#[derive(Iden)]
enum Cars {
    Table,
    Id,
    LicensePlate,
    SeatCount,
    Convertible,
    Rating,
    EngineType,
    Manufacturer,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum CarAssignments {
    Table,
    Id,
    DriverId,
    CarId,
    AssignedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drivers
        manager
            .create_table(
                Table::create()
                    .table(Drivers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Drivers::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Drivers::Username).string().not_null())
                    .col(ColumnDef::new(Drivers::Password).string().not_null())
                    .col(
                        ColumnDef::new(Drivers::OnlineStatus)
                            .string_len(16)
                            .not_null()
                            .default("OFFLINE"),
                    )
                    .col(ColumnDef::new(Drivers::Latitude).double().null())
                    .col(ColumnDef::new(Drivers::Longitude).double().null())
                    .col(
                        ColumnDef::new(Drivers::Status)
                            .string_len(16)
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(
                        ColumnDef::new(Drivers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Drivers::CoordinateUpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_drivers_username_unique")
                    .table(Drivers::Table)
                    .col(Drivers::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_drivers_online_status")
                    .table(Drivers::Table)
                    .col(Drivers::OnlineStatus)
                    .to_owned(),
            )
            .await?;

        // cars
        manager
            .create_table(
                Table::create()
                    .table(Cars::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cars::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Cars::LicensePlate).string().not_null())
                    .col(ColumnDef::new(Cars::SeatCount).integer().not_null())
                    .col(
                        ColumnDef::new(Cars::Convertible)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Cars::Rating).double().null())
                    .col(ColumnDef::new(Cars::EngineType).string_len(16).not_null())
                    .col(ColumnDef::new(Cars::Manufacturer).string().not_null())
                    .col(
                        ColumnDef::new(Cars::Status)
                            .string_len(16)
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(
                        ColumnDef::new(Cars::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Cars::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cars_license_plate_unique")
                    .table(Cars::Table)
                    .col(Cars::LicensePlate)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // car_assignments: one row per live driver/car pairing
        manager
            .create_table(
                Table::create()
                    .table(CarAssignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CarAssignments::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(CarAssignments::DriverId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CarAssignments::CarId).big_integer().not_null())
                    .col(
                        ColumnDef::new(CarAssignments::AssignedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_car_assignments_driver_id")
                            .from(CarAssignments::Table, CarAssignments::DriverId)
                            .to(Drivers::Table, Drivers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_car_assignments_car_id")
                            .from(CarAssignments::Table, CarAssignments::CarId)
                            .to(Cars::Table, Cars::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The two unique indexes make the assignment set a matching.
        manager
            .create_index(
                Index::create()
                    .name("idx_car_assignments_driver_unique")
                    .table(CarAssignments::Table)
                    .col(CarAssignments::DriverId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_car_assignments_car_unique")
                    .table(CarAssignments::Table)
                    .col(CarAssignments::CarId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_index(
                Index::drop()
                    .name("idx_car_assignments_car_unique")
                    .table(CarAssignments::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_car_assignments_driver_unique")
                    .table(CarAssignments::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CarAssignments::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_cars_license_plate_unique")
                    .table(Cars::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Cars::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_drivers_online_status")
                    .table(Drivers::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_drivers_username_unique")
                    .table(Drivers::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Drivers::Table).to_owned())
            .await?;

        Ok(())
    }
}
