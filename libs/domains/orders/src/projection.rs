//! Pure assembly of hydrated order aggregates from entity rows.
//!
//! The repository implementations fetch rows; everything here is
//! side-effect free, so the row → aggregate shape is testable without
//! a database.

use crate::entity;
use crate::models::{Order, OrderLine, Product, ProductSummary, SubtotalPolicy};

/// Resolve the subtotal to persist for a line, according to policy
pub fn resolve_subtotal(
    policy: SubtotalPolicy,
    claimed: f64,
    price: f64,
    quantity: i32,
) -> f64 {
    match policy {
        SubtotalPolicy::TrustClient => claimed,
        SubtotalPolicy::Recompute => price * f64::from(quantity),
    }
}

/// Snapshot a catalog product into the shape embedded in hydrated lines
pub fn product_summary(product: &Product) -> ProductSummary {
    ProductSummary {
        id: product.id,
        name: product.name.clone(),
        price: product.price,
    }
}

/// Assemble one hydrated line from its row and the resolved product row
pub fn hydrate_line(
    line: entity::order_line::Model,
    product: entity::product::Model,
) -> OrderLine {
    OrderLine {
        id: line.id,
        product: ProductSummary {
            id: product.id,
            name: product.name,
            price: product.price,
        },
        quantity: line.quantity,
        subtotal: line.subtotal,
    }
}

/// Assemble a hydrated order from its row and its (line, product) rows
pub fn hydrate_order(
    order: entity::order::Model,
    lines: Vec<(entity::order_line::Model, entity::product::Model)>,
) -> Order {
    Order {
        id: order.id,
        buyer_name: order.buyer_name,
        shipping_address: order.shipping_address,
        placed_at: order.placed_at.into(),
        status: order.status,
        lines: lines
            .into_iter()
            .map(|(line, product)| hydrate_line(line, product))
            .collect(),
        created_at: order.created_at.into(),
        updated_at: order.updated_at.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderStatus;
    use chrono::Utc;

    fn product_row(id: i64, price: f64) -> entity::product::Model {
        entity::product::Model {
            id,
            name: format!("product-{}", id),
            price,
        }
    }

    fn line_row(id: i64, product_id: i64, quantity: i32, subtotal: f64) -> entity::order_line::Model {
        entity::order_line::Model {
            id,
            order_id: 1,
            product_id,
            quantity,
            subtotal,
        }
    }

    #[test]
    fn test_trust_client_keeps_claimed_subtotal() {
        let subtotal = resolve_subtotal(SubtotalPolicy::TrustClient, 99.0, 10.0, 2);
        assert_eq!(subtotal, 99.0);
    }

    #[test]
    fn test_recompute_derives_subtotal_from_price() {
        let subtotal = resolve_subtotal(SubtotalPolicy::Recompute, 99.0, 10.0, 2);
        assert_eq!(subtotal, 20.0);
    }

    #[test]
    fn test_hydrate_order_embeds_product_snapshots() {
        let now = Utc::now();
        let order = entity::order::Model {
            id: 1,
            buyer_name: "Ada".to_string(),
            shipping_address: "1 Main St".to_string(),
            placed_at: now.into(),
            status: OrderStatus::Confirmed,
            created_at: now.into(),
            updated_at: now.into(),
        };

        let hydrated = hydrate_order(
            order,
            vec![
                (line_row(10, 7, 2, 20.0), product_row(7, 10.0)),
                (line_row(11, 8, 1, 5.0), product_row(8, 5.0)),
            ],
        );

        assert_eq!(hydrated.status, OrderStatus::Confirmed);
        assert_eq!(hydrated.lines.len(), 2);
        assert_eq!(hydrated.lines[0].product.id, 7);
        assert_eq!(hydrated.lines[0].product.name, "product-7");
        assert_eq!(hydrated.lines[1].subtotal, 5.0);
    }
}
