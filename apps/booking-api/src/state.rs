//! Application state management.
//!
//! The shared state passed to request handlers that need it directly
//! (currently only the readiness check). Domain routers receive their
//! own repository instances built from the same connection pool.

/// Shared application state.
///
/// Cloning is cheap: the configuration is small and the database
/// connection is an Arc'd pool handle.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
}
