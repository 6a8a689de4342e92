use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ReservationError, ReservationResult};
use crate::models::{CreateReservation, Reservation, Room, UpdateReservation};

/// Repository trait for Reservation persistence.
///
/// Implementations own the consistency between reservations and room
/// availability: every mutation that binds or releases a room must apply
/// the matching availability flip in the same atomic step, so a failed
/// operation never leaves a room half-booked.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Create a new reservation, occupying its room
    async fn create(&self, input: CreateReservation) -> ReservationResult<Reservation>;

    /// Get a reservation by ID
    async fn get_by_id(&self, id: i64) -> ReservationResult<Option<Reservation>>;

    /// List all reservations
    async fn list(&self) -> ReservationResult<Vec<Reservation>>;

    /// Update an existing reservation, transferring rooms if requested
    async fn update(&self, id: i64, input: UpdateReservation) -> ReservationResult<Reservation>;

    /// Delete a reservation by ID, releasing its room
    async fn delete(&self, id: i64) -> ReservationResult<bool>;
}

#[derive(Debug, Default)]
struct Store {
    rooms: HashMap<i64, Room>,
    reservations: HashMap<i64, Reservation>,
    next_room_id: i64,
    next_reservation_id: i64,
}

/// In-memory implementation of ReservationRepository (for development/testing)
///
/// A single lock guards rooms and reservations together, so each
/// operation observes and mutates both maps atomically.
#[derive(Debug, Default, Clone)]
pub struct InMemoryReservationRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryReservationRepository {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::default())),
        }
    }

    /// Seed a room into the store and return it with its assigned ID
    pub async fn insert_room(
        &self,
        name: &str,
        price_per_night: f64,
        available: bool,
    ) -> Room {
        let mut store = self.store.write().await;
        store.next_room_id += 1;
        let room = Room {
            id: store.next_room_id,
            name: name.to_string(),
            price_per_night,
            available,
        };
        store.rooms.insert(room.id, room.clone());
        room
    }

    /// Look up a room by ID (used by tests to inspect availability)
    pub async fn room(&self, id: i64) -> Option<Room> {
        let store = self.store.read().await;
        store.rooms.get(&id).cloned()
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn create(&self, input: CreateReservation) -> ReservationResult<Reservation> {
        let mut store = self.store.write().await;

        // Validate and occupy the room before anything is persisted
        {
            let room = store
                .rooms
                .get_mut(&input.room_id)
                .ok_or(ReservationError::RoomNotFound(input.room_id))?;

            if !room.available {
                return Err(ReservationError::RoomUnavailable(input.room_id));
            }

            room.available = false;
        }

        store.next_reservation_id += 1;
        let now = Utc::now();
        let reservation = Reservation {
            id: store.next_reservation_id,
            guest_name: input.guest_name,
            room_id: input.room_id,
            created_at: now,
            updated_at: now,
        };
        store
            .reservations
            .insert(reservation.id, reservation.clone());

        tracing::info!(
            reservation_id = reservation.id,
            room_id = reservation.room_id,
            "Created reservation"
        );
        Ok(reservation)
    }

    async fn get_by_id(&self, id: i64) -> ReservationResult<Option<Reservation>> {
        let store = self.store.read().await;
        Ok(store.reservations.get(&id).cloned())
    }

    async fn list(&self) -> ReservationResult<Vec<Reservation>> {
        let store = self.store.read().await;

        let mut result: Vec<Reservation> = store.reservations.values().cloned().collect();
        result.sort_by_key(|r| r.id);

        Ok(result)
    }

    async fn update(&self, id: i64, input: UpdateReservation) -> ReservationResult<Reservation> {
        let mut store = self.store.write().await;

        let mut updated = store
            .reservations
            .get(&id)
            .cloned()
            .ok_or(ReservationError::NotFound(id))?;

        if let Some(name) = input.guest_name {
            if !name.is_empty() {
                updated.guest_name = name;
            }
        }

        if let Some(new_room_id) = input.room_id {
            if new_room_id != updated.room_id {
                // Validate the target before touching any state
                match store.rooms.get(&new_room_id) {
                    None => return Err(ReservationError::RoomNotFound(new_room_id)),
                    Some(room) if !room.available => {
                        return Err(ReservationError::RoomUnavailable(new_room_id));
                    }
                    Some(_) => {}
                }

                // Release the old room, then occupy the new one
                if let Some(old_room) = store.rooms.get_mut(&updated.room_id) {
                    old_room.available = true;
                }
                if let Some(new_room) = store.rooms.get_mut(&new_room_id) {
                    new_room.available = false;
                }
                updated.room_id = new_room_id;
            }
        }

        updated.updated_at = Utc::now();
        store.reservations.insert(id, updated.clone());

        tracing::info!(reservation_id = id, "Updated reservation");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> ReservationResult<bool> {
        let mut store = self.store.write().await;

        match store.reservations.remove(&id) {
            Some(reservation) => {
                if let Some(room) = store.rooms.get_mut(&reservation.room_id) {
                    room.available = true;
                }
                tracing::info!(
                    reservation_id = id,
                    room_id = reservation.room_id,
                    "Deleted reservation"
                );
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(guest: &str, room_id: i64) -> CreateReservation {
        CreateReservation {
            guest_name: guest.to_string(),
            room_id,
        }
    }

    #[tokio::test]
    async fn test_create_occupies_room() {
        let repo = InMemoryReservationRepository::new();
        let room = repo.insert_room("101", 120.0, true).await;

        let reservation = repo.create(booking("Alice", room.id)).await.unwrap();
        assert_eq!(reservation.room_id, room.id);

        let room = repo.room(room.id).await.unwrap();
        assert!(!room.available);
    }

    #[tokio::test]
    async fn test_create_fails_for_missing_room() {
        let repo = InMemoryReservationRepository::new();

        let result = repo.create(booking("Alice", 999)).await;
        assert!(matches!(result, Err(ReservationError::RoomNotFound(999))));
    }

    #[tokio::test]
    async fn test_create_fails_for_occupied_room_without_side_effects() {
        let repo = InMemoryReservationRepository::new();
        let room = repo.insert_room("101", 120.0, true).await;

        repo.create(booking("Alice", room.id)).await.unwrap();

        let result = repo.create(booking("Bob", room.id)).await;
        assert!(matches!(
            result,
            Err(ReservationError::RoomUnavailable(_))
        ));

        // The failed attempt must not have persisted anything
        let reservations = repo.list().await.unwrap();
        assert_eq!(reservations.len(), 1);
        assert_eq!(reservations[0].guest_name, "Alice");
    }

    #[tokio::test]
    async fn test_concurrent_creates_for_one_room_admit_single_winner() {
        let repo = InMemoryReservationRepository::new();
        let room = repo.insert_room("101", 120.0, true).await;

        let attempts: Vec<_> = (0..32)
            .map(|i| {
                let repo = repo.clone();
                let room_id = room.id;
                tokio::spawn(async move {
                    repo.create(booking(&format!("Guest {}", i), room_id)).await
                })
            })
            .collect();

        let mut winners = 0;
        for attempt in attempts {
            if attempt.await.unwrap().is_ok() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert!(!repo.room(room.id).await.unwrap().available);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_releases_room() {
        let repo = InMemoryReservationRepository::new();
        let room = repo.insert_room("101", 120.0, true).await;

        let reservation = repo.create(booking("Alice", room.id)).await.unwrap();
        assert!(!repo.room(room.id).await.unwrap().available);

        let deleted = repo.delete(reservation.id).await.unwrap();
        assert!(deleted);
        assert!(repo.room(room.id).await.unwrap().available);
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let repo = InMemoryReservationRepository::new();
        assert!(!repo.delete(42).await.unwrap());
    }

    #[tokio::test]
    async fn test_transfer_swaps_room_availability() {
        let repo = InMemoryReservationRepository::new();
        let room_a = repo.insert_room("101", 120.0, true).await;
        let room_b = repo.insert_room("102", 150.0, true).await;

        let reservation = repo.create(booking("Alice", room_a.id)).await.unwrap();

        let updated = repo
            .update(
                reservation.id,
                UpdateReservation {
                    guest_name: None,
                    room_id: Some(room_b.id),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.room_id, room_b.id);
        assert!(repo.room(room_a.id).await.unwrap().available);
        assert!(!repo.room(room_b.id).await.unwrap().available);
    }

    #[tokio::test]
    async fn test_transfer_to_occupied_room_changes_nothing() {
        let repo = InMemoryReservationRepository::new();
        let room_a = repo.insert_room("101", 120.0, true).await;
        let room_b = repo.insert_room("102", 150.0, true).await;

        let alice = repo.create(booking("Alice", room_a.id)).await.unwrap();
        repo.create(booking("Bob", room_b.id)).await.unwrap();

        let result = repo
            .update(
                alice.id,
                UpdateReservation {
                    guest_name: None,
                    room_id: Some(room_b.id),
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(ReservationError::RoomUnavailable(_))
        ));
        // Alice still holds room A and room A stays occupied
        let alice = repo.get_by_id(alice.id).await.unwrap().unwrap();
        assert_eq!(alice.room_id, room_a.id);
        assert!(!repo.room(room_a.id).await.unwrap().available);
    }

    #[tokio::test]
    async fn test_update_to_same_room_is_noop() {
        let repo = InMemoryReservationRepository::new();
        let room = repo.insert_room("101", 120.0, true).await;

        let reservation = repo.create(booking("Alice", room.id)).await.unwrap();

        let updated = repo
            .update(
                reservation.id,
                UpdateReservation {
                    guest_name: None,
                    room_id: Some(room.id),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.room_id, room.id);
        assert!(!repo.room(room.id).await.unwrap().available);
    }

    #[tokio::test]
    async fn test_update_ignores_empty_guest_name() {
        let repo = InMemoryReservationRepository::new();
        let room = repo.insert_room("101", 120.0, true).await;

        let reservation = repo.create(booking("Alice", room.id)).await.unwrap();

        let updated = repo
            .update(
                reservation.id,
                UpdateReservation {
                    guest_name: Some(String::new()),
                    room_id: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.guest_name, "Alice");
    }

    #[tokio::test]
    async fn test_list_returns_reservations_in_id_order() {
        let repo = InMemoryReservationRepository::new();
        let room_a = repo.insert_room("101", 120.0, true).await;
        let room_b = repo.insert_room("102", 150.0, true).await;

        repo.create(booking("Alice", room_a.id)).await.unwrap();
        repo.create(booking("Bob", room_b.id)).await.unwrap();

        let reservations = repo.list().await.unwrap();
        assert_eq!(reservations.len(), 2);
        assert!(reservations[0].id < reservations[1].id);
    }
}
