use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::{
    entity,
    error::{OrderError, OrderResult},
    models::{CreateOrder, Order, OrderLineInput, ReplaceOrder, SubtotalPolicy},
    projection,
    repository::OrderRepository,
};

/// PostgreSQL implementation of OrderRepository.
///
/// Create and replace run inside a transaction: every line's product
/// is resolved first, so one unresolved product rolls back the whole
/// operation and no partial order or line set survives.
pub struct PgOrderRepository {
    db: DatabaseConnection,
    policy: SubtotalPolicy,
}

impl PgOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_policy(db, SubtotalPolicy::default())
    }

    pub fn with_policy(db: DatabaseConnection, policy: SubtotalPolicy) -> Self {
        Self { db, policy }
    }

    /// Resolve every requested product, aborting on the first miss
    async fn resolve_products(
        txn: &DatabaseTransaction,
        lines: &[OrderLineInput],
    ) -> OrderResult<Vec<entity::product::Model>> {
        let mut products = Vec::with_capacity(lines.len());
        for line in lines {
            let product = entity::product::Entity::find_by_id(line.product_id)
                .one(txn)
                .await
                .map_err(db_error)?
                .ok_or(OrderError::ProductNotFound(line.product_id))?;
            products.push(product);
        }
        Ok(products)
    }

    /// Insert the line set for an order, returning the rows paired with
    /// their product rows for hydration
    async fn insert_lines(
        &self,
        txn: &DatabaseTransaction,
        order_id: i64,
        lines: &[OrderLineInput],
        products: Vec<entity::product::Model>,
    ) -> OrderResult<Vec<(entity::order_line::Model, entity::product::Model)>> {
        let mut rows = Vec::with_capacity(lines.len());
        for (line, product) in lines.iter().zip(products) {
            let row = entity::order_line::ActiveModel {
                order_id: Set(order_id),
                product_id: Set(line.product_id),
                quantity: Set(line.quantity),
                subtotal: Set(projection::resolve_subtotal(
                    self.policy,
                    line.subtotal,
                    product.price,
                    line.quantity,
                )),
                ..Default::default()
            }
            .insert(txn)
            .await
            .map_err(db_error)?;
            rows.push((row, product));
        }
        Ok(rows)
    }

    /// Load an order's lines with their product rows
    async fn load_lines<C: ConnectionTrait>(
        conn: &C,
        order_id: i64,
    ) -> OrderResult<Vec<(entity::order_line::Model, entity::product::Model)>> {
        let rows = entity::order_line::Entity::find()
            .filter(entity::order_line::Column::OrderId.eq(order_id))
            .order_by_asc(entity::order_line::Column::Id)
            .find_also_related(entity::product::Entity)
            .all(conn)
            .await
            .map_err(db_error)?;

        rows.into_iter()
            .map(|(line, product)| {
                let line_id = line.id;
                product.map(|p| (line, p)).ok_or_else(|| {
                    OrderError::Internal(format!(
                        "Order line {} references a missing product",
                        line_id
                    ))
                })
            })
            .collect()
    }
}

fn db_error(e: sea_orm::DbErr) -> OrderError {
    OrderError::Internal(format!("Database error: {}", e))
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create(&self, input: CreateOrder) -> OrderResult<Order> {
        let txn = self.db.begin().await.map_err(db_error)?;

        // A dropped transaction rolls back, so any early return below
        // persists nothing.
        let products = Self::resolve_products(&txn, &input.lines).await?;

        let now = Utc::now();
        let order = entity::order::ActiveModel {
            buyer_name: Set(input.buyer_name),
            shipping_address: Set(input.shipping_address),
            placed_at: Set(input.placed_at.into()),
            status: Set(input.status),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_error)?;

        let rows = self
            .insert_lines(&txn, order.id, &input.lines, products)
            .await?;

        txn.commit().await.map_err(db_error)?;

        tracing::info!(order_id = order.id, lines = rows.len(), "Created order");
        Ok(projection::hydrate_order(order, rows))
    }

    async fn get_by_id(&self, id: i64) -> OrderResult<Option<Order>> {
        let Some(order) = entity::order::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?
        else {
            return Ok(None);
        };

        let rows = Self::load_lines(&self.db, order.id).await?;
        Ok(Some(projection::hydrate_order(order, rows)))
    }

    async fn list(&self) -> OrderResult<Vec<Order>> {
        let orders = entity::order::Entity::find()
            .order_by_asc(entity::order::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        let mut result = Vec::with_capacity(orders.len());
        for order in orders {
            let rows = Self::load_lines(&self.db, order.id).await?;
            result.push(projection::hydrate_order(order, rows));
        }

        Ok(result)
    }

    async fn replace(&self, id: i64, input: ReplaceOrder) -> OrderResult<Order> {
        let txn = self.db.begin().await.map_err(db_error)?;

        let order = entity::order::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_error)?
            .ok_or(OrderError::NotFound(id))?;

        let products = Self::resolve_products(&txn, &input.lines).await?;

        // The old line set is discarded wholesale, never diffed
        entity::order_line::Entity::delete_many()
            .filter(entity::order_line::Column::OrderId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_error)?;

        let rows = self.insert_lines(&txn, id, &input.lines, products).await?;

        let mut active: entity::order::ActiveModel = order.into();
        active.buyer_name = Set(input.buyer_name);
        active.shipping_address = Set(input.shipping_address);
        active.placed_at = Set(input.placed_at.into());
        active.status = Set(input.status);
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(&txn).await.map_err(db_error)?;

        txn.commit().await.map_err(db_error)?;

        tracing::info!(order_id = id, lines = rows.len(), "Replaced order");
        Ok(projection::hydrate_order(updated, rows))
    }

    async fn delete(&self, id: i64) -> OrderResult<bool> {
        // order_lines carry ON DELETE CASCADE, so the line set goes
        // with the order in one statement
        let result = entity::order::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected > 0 {
            tracing::info!(order_id = id, "Deleted order");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
