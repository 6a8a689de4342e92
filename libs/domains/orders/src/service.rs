use std::sync::Arc;
use validator::Validate;

use crate::error::{OrderError, OrderResult};
use crate::models::{CreateOrder, Order, ReplaceOrder};
use crate::repository::OrderRepository;

/// Service layer for Order business logic
#[derive(Clone)]
pub struct OrderService<R: OrderRepository> {
    repository: Arc<R>,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new order with its full line set
    pub async fn create_order(&self, input: CreateOrder) -> OrderResult<Order> {
        input
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get a hydrated order by ID
    pub async fn get_order(&self, id: i64) -> OrderResult<Order> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(OrderError::NotFound(id))
    }

    /// List all orders
    pub async fn list_orders(&self) -> OrderResult<Vec<Order>> {
        self.repository.list().await
    }

    /// Replace an order's scalar fields and entire line set
    pub async fn replace_order(&self, id: i64, input: ReplaceOrder) -> OrderResult<Order> {
        input
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;

        self.repository.replace(id, input).await
    }

    /// Delete an order and its owned lines
    pub async fn delete_order(&self, id: i64) -> OrderResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(OrderError::NotFound(id));
        }

        Ok(())
    }
}
