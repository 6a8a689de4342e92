use axum::Router;
use domain_reservations::{PgReservationRepository, ReservationService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgReservationRepository::new(state.db.clone());
    let service = ReservationService::new(repository);
    handlers::router(service)
}
