//! Handler tests for the Reservations domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes
//! - Error responses
//!
//! They run against the in-memory repository, so the full handler →
//! service → repository path is exercised without a database.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_reservations::*;
use http_body_util::BodyExt;
use serde_json::json;
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app(repo: &InMemoryReservationRepository) -> Router {
    handlers::router(ReservationService::new(repo.clone()))
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn put_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_create_reservation_returns_201_and_occupies_room() {
    let repo = InMemoryReservationRepository::new();
    let room = repo.insert_room("101", 120.0, true).await;
    let builder = TestDataBuilder::from_test_name("handler_create_201");

    let guest = builder.name("guest", "alice");
    let response = app(&repo)
        .oneshot(post_json(
            "/",
            json!({ "guest_name": guest, "room_id": room.id }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let reservation: Reservation = json_body(response.into_body()).await;
    assert_eq!(reservation.guest_name, guest);
    assert_eq!(reservation.room_id, room.id);

    // The room must now be occupied
    assert!(!repo.room(room.id).await.unwrap().available);
}

#[tokio::test]
async fn test_create_reservation_returns_404_for_unknown_room() {
    let repo = InMemoryReservationRepository::new();

    let response = app(&repo)
        .oneshot(post_json(
            "/",
            json!({ "guest_name": "Alice", "room_id": 999 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_reservation_returns_400_for_occupied_room() {
    let repo = InMemoryReservationRepository::new();
    let room = repo.insert_room("101", 120.0, false).await;

    let response = app(&repo)
        .oneshot(post_json(
            "/",
            json!({ "guest_name": "Alice", "room_id": room.id }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_reservation_validates_guest_name() {
    let repo = InMemoryReservationRepository::new();
    let room = repo.insert_room("101", 120.0, true).await;

    // Invalid guest name (empty string)
    let response = app(&repo)
        .oneshot(post_json(
            "/",
            json!({ "guest_name": "", "room_id": room.id }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Validation failed before any state changed
    assert!(repo.room(room.id).await.unwrap().available);
}

#[tokio::test]
async fn test_get_reservation_returns_200() {
    let repo = InMemoryReservationRepository::new();
    let room = repo.insert_room("101", 120.0, true).await;
    let created = repo
        .create(CreateReservation {
            guest_name: "Alice".to_string(),
            room_id: room.id,
        })
        .await
        .unwrap();

    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();

    let response = app(&repo).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let reservation: Reservation = json_body(response.into_body()).await;
    assert_eq!(reservation.id, created.id);
    assert_eq!(reservation.guest_name, "Alice");
}

#[tokio::test]
async fn test_get_reservation_returns_404_for_missing() {
    let repo = InMemoryReservationRepository::new();

    let request = Request::builder()
        .method("GET")
        .uri("/42")
        .body(Body::empty())
        .unwrap();

    let response = app(&repo).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_reservation_returns_400_for_malformed_id() {
    let repo = InMemoryReservationRepository::new();

    let request = Request::builder()
        .method("GET")
        .uri("/not-a-number")
        .body(Body::empty())
        .unwrap();

    let response = app(&repo).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_reservations_returns_empty_array() {
    let repo = InMemoryReservationRepository::new();

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app(&repo).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let reservations: Vec<Reservation> = json_body(response.into_body()).await;
    assert!(reservations.is_empty());
}

#[tokio::test]
async fn test_update_reservation_transfers_room() {
    let repo = InMemoryReservationRepository::new();
    let room_a = repo.insert_room("101", 120.0, true).await;
    let room_b = repo.insert_room("102", 150.0, true).await;
    let created = repo
        .create(CreateReservation {
            guest_name: "Alice".to_string(),
            room_id: room_a.id,
        })
        .await
        .unwrap();

    let response = app(&repo)
        .oneshot(put_json(
            &format!("/{}", created.id),
            json!({ "room_id": room_b.id }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let reservation: Reservation = json_body(response.into_body()).await;
    assert_eq!(reservation.room_id, room_b.id);

    // Old room released, new room occupied
    assert!(repo.room(room_a.id).await.unwrap().available);
    assert!(!repo.room(room_b.id).await.unwrap().available);
}

#[tokio::test]
async fn test_update_reservation_returns_404_for_missing() {
    let repo = InMemoryReservationRepository::new();

    let response = app(&repo)
        .oneshot(put_json("/42", json!({ "guest_name": "Bob" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_reservation_returns_confirmation_and_releases_room() {
    let repo = InMemoryReservationRepository::new();
    let room = repo.insert_room("101", 120.0, true).await;
    let created = repo
        .create(CreateReservation {
            guest_name: "Alice".to_string(),
            room_id: room.id,
        })
        .await
        .unwrap();

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();

    let response = app(&repo).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let confirmation: DeleteConfirmation = json_body(response.into_body()).await;
    assert_eq!(confirmation.message, "Reservation deleted successfully");

    assert!(repo.room(room.id).await.unwrap().available);
}

#[tokio::test]
async fn test_delete_reservation_returns_404_for_missing() {
    let repo = InMemoryReservationRepository::new();

    let request = Request::builder()
        .method("DELETE")
        .uri("/42")
        .body(Body::empty())
        .unwrap();

    let response = app(&repo).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
