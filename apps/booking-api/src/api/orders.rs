use axum::Router;
use domain_orders::{OrderService, PgOrderRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    // Line subtotals are caller-supplied; switch to
    // SubtotalPolicy::Recompute to derive them from the catalog price.
    let repository = PgOrderRepository::new(state.db.clone());
    let service = OrderService::new(repository);
    handlers::router(service)
}
