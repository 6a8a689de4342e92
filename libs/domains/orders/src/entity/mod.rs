//! SeaORM entities backing the orders domain.
//!
//! Three tables participate: `products` (seeded catalog), `orders`
//! (scalar fields plus lifecycle status) and `order_lines` (owned by
//! their order via ON DELETE CASCADE, referencing a shared product).

pub mod order;
pub mod order_line;
pub mod product;
