use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

/// Lifecycle status of an order
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "order_status")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "shipped")]
    Shipped,
    #[sea_orm(string_value = "delivered")]
    Delivered,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// A catalog product.
///
/// Products are seeded by migrations and shared across orders. Order
/// lines reference them but never own them: deleting a line or an order
/// leaves the catalog untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

/// Snapshot of the product a line refers to, embedded in hydrated orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

/// A line item owned by a single order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderLine {
    pub id: i64,
    pub product: ProductSummary,
    pub quantity: i32,
    pub subtotal: f64,
}

/// A retail order with its full line set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i64,
    pub buyer_name: String,
    pub shipping_address: String,
    pub placed_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub lines: Vec<OrderLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One requested line in a create/replace payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderLineInput {
    pub product_id: i64,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
    #[validate(range(min = 0.0, message = "Subtotal must not be negative"))]
    pub subtotal: f64,
}

/// DTO for creating a new order
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrder {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Buyer name must be between 1 and 100 characters"
    ))]
    pub buyer_name: String,
    #[validate(length(
        min = 1,
        max = 500,
        message = "Shipping address must be between 1 and 500 characters"
    ))]
    pub shipping_address: String,
    pub placed_at: DateTime<Utc>,
    /// Defaults to `pending` when omitted
    #[serde(default)]
    pub status: OrderStatus,
    #[validate(nested)]
    pub lines: Vec<OrderLineInput>,
}

/// DTO for replacing an order.
///
/// This is a full replacement, not a merge: every scalar field is
/// required and overwrites the stored value, and the supplied lines
/// replace the existing line set wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReplaceOrder {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Buyer name must be between 1 and 100 characters"
    ))]
    pub buyer_name: String,
    #[validate(length(
        min = 1,
        max = 500,
        message = "Shipping address must be between 1 and 500 characters"
    ))]
    pub shipping_address: String,
    pub placed_at: DateTime<Utc>,
    pub status: OrderStatus,
    #[validate(nested)]
    pub lines: Vec<OrderLineInput>,
}

/// How line subtotals are derived when lines are assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubtotalPolicy {
    /// Persist the caller-supplied subtotal as-is
    #[default]
    TrustClient,
    /// Derive the subtotal as `price * quantity`, ignoring the claimed value
    Recompute,
}

/// Confirmation body returned by successful delete requests
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteConfirmation {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: i32, subtotal: f64) -> OrderLineInput {
        OrderLineInput {
            product_id: 1,
            quantity,
            subtotal,
        }
    }

    #[test]
    fn test_order_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(OrderStatus::Shipped.to_string(), "shipped");
    }

    #[test]
    fn test_create_order_validates_lines() {
        let order = CreateOrder {
            buyer_name: "Ada".to_string(),
            shipping_address: "1 Main St".to_string(),
            placed_at: Utc::now(),
            status: OrderStatus::Pending,
            lines: vec![line(0, 10.0)],
        };
        assert!(order.validate().is_err());

        let order = CreateOrder {
            lines: vec![line(2, -1.0)],
            ..order
        };
        assert!(order.validate().is_err());

        let order = CreateOrder {
            lines: vec![line(2, 10.0)],
            ..order
        };
        assert!(order.validate().is_ok());
    }

    #[test]
    fn test_create_order_status_defaults_to_pending() {
        let json = r#"{
            "buyer_name": "Ada",
            "shipping_address": "1 Main St",
            "placed_at": "2026-01-15T10:00:00Z",
            "lines": []
        }"#;
        let order: CreateOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
    }
}
