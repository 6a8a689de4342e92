//! Reservations Domain
//!
//! This module provides a complete domain implementation for managing hotel
//! room reservations. Every reservation occupies exactly one room, and room
//! availability is kept consistent with the reservations that hold them:
//! creating a reservation occupies its room, moving a reservation releases
//! the old room and occupies the new one, and deleting a reservation frees
//! its room again.
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
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_reservations::{
//!     handlers,
//!     repository::InMemoryReservationRepository,
//!     service::ReservationService,
//! };
//!
//! // Create repository and service
//! let repository = InMemoryReservationRepository::new();
//! let service = ReservationService::new(repository);
//!
//! // Create Axum router
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ReservationError, ReservationResult};
pub use models::{CreateReservation, DeleteConfirmation, Reservation, Room, UpdateReservation};
pub use postgres::PgReservationRepository;
pub use repository::{InMemoryReservationRepository, ReservationRepository};
pub use service::ReservationService;
