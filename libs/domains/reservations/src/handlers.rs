use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, IdPath, ValidatedJson, extract_ip_from_headers, extract_user_agent,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ReservationResult;
use crate::models::{CreateReservation, DeleteConfirmation, Reservation, UpdateReservation};
use crate::repository::ReservationRepository;
use crate::service::ReservationService;

const TAG: &str = "reservations";

/// OpenAPI documentation for Reservations API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_reservations,
        create_reservation,
        get_reservation,
        update_reservation,
        delete_reservation,
    ),
    components(
        schemas(Reservation, CreateReservation, UpdateReservation, DeleteConfirmation),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Room reservation endpoints")
    )
)]
pub struct ApiDoc;

/// Create the reservation router with all HTTP endpoints
pub fn router<R: ReservationRepository + 'static>(service: ReservationService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_reservations).post(create_reservation))
        .route(
            "/{id}",
            get(get_reservation)
                .put(update_reservation)
                .delete(delete_reservation),
        )
        .with_state(shared_service)
}

/// List all reservations
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "List of reservations", body = Vec<Reservation>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_reservations<R: ReservationRepository>(
    State(service): State<Arc<ReservationService<R>>>,
) -> ReservationResult<Json<Vec<Reservation>>> {
    let reservations = service.list_reservations().await?;
    Ok(Json(reservations))
}

/// Create a new reservation
///
/// The requested room must exist and be available; the room is marked
/// unavailable in the same transaction that persists the reservation.
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateReservation,
    responses(
        (status = 201, description = "Reservation created successfully", body = Reservation),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_reservation<R: ReservationRepository>(
    State(service): State<Arc<ReservationService<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateReservation>,
) -> ReservationResult<impl IntoResponse> {
    let reservation = service.create_reservation(input).await?;

    // Audit log successful creation
    AuditEvent::new(
        None,
        "reservation.create",
        Some(format!("reservation:{}", reservation.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({
        "guest_name": reservation.guest_name,
        "room_id": reservation.room_id,
    }))
    .log();

    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Get a reservation by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Reservation found", body = Reservation),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_reservation<R: ReservationRepository>(
    State(service): State<Arc<ReservationService<R>>>,
    IdPath(id): IdPath,
) -> ReservationResult<Json<Reservation>> {
    let reservation = service.get_reservation(id).await?;
    Ok(Json(reservation))
}

/// Update a reservation
///
/// Fields are optional: a present, non-empty guest name replaces the
/// current one, and a different room ID moves the reservation to that
/// room (releasing the old one).
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Reservation ID")
    ),
    request_body = UpdateReservation,
    responses(
        (status = 200, description = "Reservation updated successfully", body = Reservation),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_reservation<R: ReservationRepository>(
    State(service): State<Arc<ReservationService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateReservation>,
) -> ReservationResult<Json<Reservation>> {
    let reservation = service.update_reservation(id, input).await?;
    Ok(Json(reservation))
}

/// Delete a reservation
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Reservation deleted successfully", body = DeleteConfirmation),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_reservation<R: ReservationRepository>(
    State(service): State<Arc<ReservationService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> ReservationResult<impl IntoResponse> {
    service.delete_reservation(id).await?;

    // Audit log successful deletion
    AuditEvent::new(
        None,
        "reservation.delete",
        Some(format!("reservation:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok((
        StatusCode::OK,
        Json(DeleteConfirmation {
            message: "Reservation deleted successfully".to_string(),
        }),
    ))
}
