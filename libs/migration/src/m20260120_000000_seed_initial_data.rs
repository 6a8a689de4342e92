use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Insert sample rooms
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO rooms (id, name, price_per_night, available)
            VALUES
                (1, 'Standard Single', 89.0, true),
                (2, 'Standard Double', 119.0, true),
                (3, 'Deluxe Double', 159.0, true),
                (4, 'Junior Suite', 219.0, true),
                (5, 'Penthouse Suite', 450.0, true)
            ON CONFLICT (id) DO NOTHING
            "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "SELECT setval(pg_get_serial_sequence('rooms', 'id'), (SELECT MAX(id) FROM rooms))",
            )
            .await?;

        // Insert sample products
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO products (id, name, price)
            VALUES
                (1, 'Mechanical Keyboard', 89.0),
                (2, 'Wireless Mouse', 29.0),
                (3, '27-inch Monitor', 249.0),
                (4, 'USB-C Dock', 119.0),
                (5, 'Laptop Stand', 39.0)
            ON CONFLICT (id) DO NOTHING
            "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "SELECT setval(pg_get_serial_sequence('products', 'id'), (SELECT MAX(id) FROM products))",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Delete in reverse order of foreign key dependencies
        manager
            .get_connection()
            .execute_unprepared("DELETE FROM order_lines WHERE product_id BETWEEN 1 AND 5")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DELETE FROM products WHERE id BETWEEN 1 AND 5")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DELETE FROM reservations WHERE room_id BETWEEN 1 AND 5")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DELETE FROM rooms WHERE id BETWEEN 1 AND 5")
            .await?;

        Ok(())
    }
}
