//! Orders Domain
//!
//! This module provides a complete domain implementation for retail orders
//! with owned line items. An order aggregates a set of lines; each line
//! references a shared product from the catalog. Lines live and die with
//! their order: replacing an order swaps its entire line set, and deleting
//! an order destroys its lines. Products are never touched.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Projection  │  ← Pure row → aggregate assembly
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_orders::{
//!     handlers,
//!     repository::InMemoryOrderRepository,
//!     service::OrderService,
//! };
//!
//! // Create repository and service
//! let repository = InMemoryOrderRepository::new();
//! let service = OrderService::new(repository);
//!
//! // Create Axum router
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod projection;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{OrderError, OrderResult};
pub use models::{
    CreateOrder, DeleteConfirmation, Order, OrderLine, OrderLineInput, OrderStatus, Product,
    ProductSummary, ReplaceOrder, SubtotalPolicy,
};
pub use postgres::PgOrderRepository;
pub use repository::{InMemoryOrderRepository, OrderRepository};
pub use service::OrderService;
