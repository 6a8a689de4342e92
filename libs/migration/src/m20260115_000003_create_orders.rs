use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create order_status enum
        manager
            .create_type(
                Type::create()
                    .as_enum(OrderStatus::Enum)
                    .values([
                        OrderStatus::Pending,
                        OrderStatus::Confirmed,
                        OrderStatus::Shipped,
                        OrderStatus::Delivered,
                        OrderStatus::Cancelled,
                    ])
                    .to_owned(),
            )
            .await?;

        // Create orders table
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string(Orders::BuyerName))
                    .col(string(Orders::ShippingAddress))
                    .col(timestamp_with_time_zone(Orders::PlacedAt))
                    .col(
                        ColumnDef::new(Orders::Status)
                            .enumeration(
                                OrderStatus::Enum,
                                [
                                    OrderStatus::Pending,
                                    OrderStatus::Confirmed,
                                    OrderStatus::Shipped,
                                    OrderStatus::Delivered,
                                    OrderStatus::Cancelled,
                                ],
                            )
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        timestamp_with_time_zone(Orders::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Orders::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_status")
                    .table(Orders::Table)
                    .col(Orders::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(OrderStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    BuyerName,
    ShippingAddress,
    PlacedAt,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum OrderStatus {
    #[sea_orm(iden = "order_status")]
    Enum,
    #[sea_orm(iden = "pending")]
    Pending,
    #[sea_orm(iden = "confirmed")]
    Confirmed,
    #[sea_orm(iden = "shipped")]
    Shipped,
    #[sea_orm(iden = "delivered")]
    Delivered,
    #[sea_orm(iden = "cancelled")]
    Cancelled,
}
