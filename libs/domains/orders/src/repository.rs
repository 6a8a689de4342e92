use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{OrderError, OrderResult};
use crate::models::{
    CreateOrder, Order, OrderLine, Product, ReplaceOrder, SubtotalPolicy,
};
use crate::projection;

/// Repository trait for Order persistence.
///
/// Implementations must treat an order and its line set as one unit:
/// every line's product is resolved before anything is written, a
/// single unresolved product aborts the whole operation, and replace
/// discards the old line set rather than diffing it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Create a new order with its full line set
    async fn create(&self, input: CreateOrder) -> OrderResult<Order>;

    /// Get a hydrated order by ID
    async fn get_by_id(&self, id: i64) -> OrderResult<Option<Order>>;

    /// List all orders, hydrated
    async fn list(&self) -> OrderResult<Vec<Order>>;

    /// Replace an order's scalar fields and entire line set
    async fn replace(&self, id: i64, input: ReplaceOrder) -> OrderResult<Order>;

    /// Delete an order and its owned lines
    async fn delete(&self, id: i64) -> OrderResult<bool>;
}

#[derive(Debug, Default)]
struct Store {
    products: HashMap<i64, Product>,
    orders: HashMap<i64, Order>,
    next_product_id: i64,
    next_order_id: i64,
    next_line_id: i64,
}

/// In-memory implementation of OrderRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryOrderRepository {
    store: Arc<RwLock<Store>>,
    policy: SubtotalPolicy,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::with_policy(SubtotalPolicy::default())
    }

    pub fn with_policy(policy: SubtotalPolicy) -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::default())),
            policy,
        }
    }

    /// Seed a product into the catalog and return it with its assigned ID
    pub async fn insert_product(&self, name: &str, price: f64) -> Product {
        let mut store = self.store.write().await;
        store.next_product_id += 1;
        let product = Product {
            id: store.next_product_id,
            name: name.to_string(),
            price,
        };
        store.products.insert(product.id, product.clone());
        product
    }
}

/// Resolve every requested product up front so a single miss aborts
/// before any state is touched.
fn resolve_products(
    store: &Store,
    lines: &[crate::models::OrderLineInput],
) -> OrderResult<Vec<Product>> {
    lines
        .iter()
        .map(|line| {
            store
                .products
                .get(&line.product_id)
                .cloned()
                .ok_or(OrderError::ProductNotFound(line.product_id))
        })
        .collect()
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, input: CreateOrder) -> OrderResult<Order> {
        let mut store = self.store.write().await;

        let products = resolve_products(&store, &input.lines)?;

        let mut lines = Vec::with_capacity(input.lines.len());
        for (line, product) in input.lines.iter().zip(&products) {
            store.next_line_id += 1;
            lines.push(OrderLine {
                id: store.next_line_id,
                product: projection::product_summary(product),
                quantity: line.quantity,
                subtotal: projection::resolve_subtotal(
                    self.policy,
                    line.subtotal,
                    product.price,
                    line.quantity,
                ),
            });
        }

        store.next_order_id += 1;
        let now = Utc::now();
        let order = Order {
            id: store.next_order_id,
            buyer_name: input.buyer_name,
            shipping_address: input.shipping_address,
            placed_at: input.placed_at,
            status: input.status,
            lines,
            created_at: now,
            updated_at: now,
        };
        store.orders.insert(order.id, order.clone());

        tracing::info!(order_id = order.id, lines = order.lines.len(), "Created order");
        Ok(order)
    }

    async fn get_by_id(&self, id: i64) -> OrderResult<Option<Order>> {
        let store = self.store.read().await;
        Ok(store.orders.get(&id).cloned())
    }

    async fn list(&self) -> OrderResult<Vec<Order>> {
        let store = self.store.read().await;

        let mut result: Vec<Order> = store.orders.values().cloned().collect();
        result.sort_by_key(|o| o.id);

        Ok(result)
    }

    async fn replace(&self, id: i64, input: ReplaceOrder) -> OrderResult<Order> {
        let mut store = self.store.write().await;

        if !store.orders.contains_key(&id) {
            return Err(OrderError::NotFound(id));
        }

        // Resolve before mutating, so a bad product leaves the order intact
        let products = resolve_products(&store, &input.lines)?;

        // Fresh line identities: the old set is discarded, never diffed
        let mut lines = Vec::with_capacity(input.lines.len());
        for (line, product) in input.lines.iter().zip(&products) {
            store.next_line_id += 1;
            lines.push(OrderLine {
                id: store.next_line_id,
                product: projection::product_summary(product),
                quantity: line.quantity,
                subtotal: projection::resolve_subtotal(
                    self.policy,
                    line.subtotal,
                    product.price,
                    line.quantity,
                ),
            });
        }

        let order = store
            .orders
            .get_mut(&id)
            .ok_or(OrderError::NotFound(id))?;
        order.buyer_name = input.buyer_name;
        order.shipping_address = input.shipping_address;
        order.placed_at = input.placed_at;
        order.status = input.status;
        order.lines = lines;
        order.updated_at = Utc::now();
        let updated = order.clone();

        tracing::info!(order_id = id, lines = updated.lines.len(), "Replaced order");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> OrderResult<bool> {
        let mut store = self.store.write().await;

        if store.orders.remove(&id).is_some() {
            tracing::info!(order_id = id, "Deleted order");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderLineInput, OrderStatus};

    fn line(product_id: i64, quantity: i32, subtotal: f64) -> OrderLineInput {
        OrderLineInput {
            product_id,
            quantity,
            subtotal,
        }
    }

    fn create_input(lines: Vec<OrderLineInput>) -> CreateOrder {
        CreateOrder {
            buyer_name: "Ada".to_string(),
            shipping_address: "1 Main St".to_string(),
            placed_at: Utc::now(),
            status: OrderStatus::Pending,
            lines,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_order() {
        let repo = InMemoryOrderRepository::new();
        let product = repo.insert_product("Keyboard", 49.0).await;

        let order = repo
            .create(create_input(vec![line(product.id, 2, 98.0)]))
            .await
            .unwrap();

        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.lines[0].product.name, "Keyboard");
        assert_eq!(order.lines[0].subtotal, 98.0);

        let fetched = repo.get_by_id(order.id).await.unwrap().unwrap();
        assert_eq!(fetched, order);
    }

    #[tokio::test]
    async fn test_create_with_unknown_product_persists_nothing() {
        let repo = InMemoryOrderRepository::new();
        let product = repo.insert_product("Keyboard", 49.0).await;

        let result = repo
            .create(create_input(vec![
                line(product.id, 1, 49.0),
                line(999, 2, 20.0),
            ]))
            .await;

        assert!(matches!(result, Err(OrderError::ProductNotFound(999))));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_swaps_entire_line_set() {
        let repo = InMemoryOrderRepository::new();
        let keyboard = repo.insert_product("Keyboard", 49.0).await;
        let mouse = repo.insert_product("Mouse", 19.0).await;

        let order = repo
            .create(create_input(vec![
                line(keyboard.id, 1, 49.0),
                line(mouse.id, 1, 19.0),
            ]))
            .await
            .unwrap();
        let old_line_ids: Vec<i64> = order.lines.iter().map(|l| l.id).collect();

        let replaced = repo
            .replace(
                order.id,
                ReplaceOrder {
                    buyer_name: "Grace".to_string(),
                    shipping_address: "2 Side St".to_string(),
                    placed_at: order.placed_at,
                    status: OrderStatus::Confirmed,
                    lines: vec![line(mouse.id, 3, 57.0)],
                },
            )
            .await
            .unwrap();

        // Scalars overwritten unconditionally
        assert_eq!(replaced.buyer_name, "Grace");
        assert_eq!(replaced.status, OrderStatus::Confirmed);

        // Line count matches the input, and no old identity survives
        assert_eq!(replaced.lines.len(), 1);
        assert!(!old_line_ids.contains(&replaced.lines[0].id));
    }

    #[tokio::test]
    async fn test_replace_with_unknown_product_leaves_order_unchanged() {
        let repo = InMemoryOrderRepository::new();
        let keyboard = repo.insert_product("Keyboard", 49.0).await;

        let order = repo
            .create(create_input(vec![line(keyboard.id, 1, 49.0)]))
            .await
            .unwrap();

        let result = repo
            .replace(
                order.id,
                ReplaceOrder {
                    buyer_name: "Grace".to_string(),
                    shipping_address: "2 Side St".to_string(),
                    placed_at: order.placed_at,
                    status: OrderStatus::Confirmed,
                    lines: vec![line(999, 1, 10.0)],
                },
            )
            .await;

        assert!(matches!(result, Err(OrderError::ProductNotFound(999))));

        let current = repo.get_by_id(order.id).await.unwrap().unwrap();
        assert_eq!(current, order);
    }

    #[tokio::test]
    async fn test_replace_missing_order_returns_not_found() {
        let repo = InMemoryOrderRepository::new();

        let result = repo
            .replace(
                42,
                ReplaceOrder {
                    buyer_name: "Grace".to_string(),
                    shipping_address: "2 Side St".to_string(),
                    placed_at: Utc::now(),
                    status: OrderStatus::Pending,
                    lines: vec![],
                },
            )
            .await;

        assert!(matches!(result, Err(OrderError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_delete_removes_order_and_lines() {
        let repo = InMemoryOrderRepository::new();
        let product = repo.insert_product("Keyboard", 49.0).await;

        let order = repo
            .create(create_input(vec![line(product.id, 1, 49.0)]))
            .await
            .unwrap();

        assert!(repo.delete(order.id).await.unwrap());
        assert!(repo.get_by_id(order.id).await.unwrap().is_none());
        assert!(!repo.delete(order.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_recompute_policy_overrides_claimed_subtotal() {
        let repo = InMemoryOrderRepository::with_policy(SubtotalPolicy::Recompute);
        let product = repo.insert_product("Keyboard", 49.0).await;

        let order = repo
            .create(create_input(vec![line(product.id, 2, 1.0)]))
            .await
            .unwrap();

        assert_eq!(order.lines[0].subtotal, 98.0);
    }

    #[tokio::test]
    async fn test_list_returns_orders_in_id_order() {
        let repo = InMemoryOrderRepository::new();
        let product = repo.insert_product("Keyboard", 49.0).await;

        repo.create(create_input(vec![line(product.id, 1, 49.0)]))
            .await
            .unwrap();
        repo.create(create_input(vec![])).await.unwrap();

        let orders = repo.list().await.unwrap();
        assert_eq!(orders.len(), 2);
        assert!(orders[0].id < orders[1].id);
    }
}
