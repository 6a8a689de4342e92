use std::sync::Arc;
use validator::Validate;

use crate::error::{ReservationError, ReservationResult};
use crate::models::{CreateReservation, Reservation, UpdateReservation};
use crate::repository::ReservationRepository;

/// Service layer for Reservation business logic
#[derive(Clone)]
pub struct ReservationService<R: ReservationRepository> {
    repository: Arc<R>,
}

impl<R: ReservationRepository> ReservationService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new reservation, occupying the requested room
    pub async fn create_reservation(
        &self,
        input: CreateReservation,
    ) -> ReservationResult<Reservation> {
        input
            .validate()
            .map_err(|e| ReservationError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get a reservation by ID
    pub async fn get_reservation(&self, id: i64) -> ReservationResult<Reservation> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ReservationError::NotFound(id))
    }

    /// List all reservations
    pub async fn list_reservations(&self) -> ReservationResult<Vec<Reservation>> {
        self.repository.list().await
    }

    /// Update a reservation, transferring rooms if a different room is requested
    pub async fn update_reservation(
        &self,
        id: i64,
        input: UpdateReservation,
    ) -> ReservationResult<Reservation> {
        input
            .validate()
            .map_err(|e| ReservationError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Delete a reservation, releasing its room
    pub async fn delete_reservation(&self, id: i64) -> ReservationResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(ReservationError::NotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockReservationRepository;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_create_rejects_blank_guest_name_without_touching_repo() {
        // No expectations set: any repository call would panic
        let mock_repo = MockReservationRepository::new();
        let service = ReservationService::new(mock_repo);

        let result = service
            .create_reservation(CreateReservation {
                guest_name: String::new(),
                room_id: 1,
            })
            .await;

        assert!(matches!(result, Err(ReservationError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_reservation_maps_missing_to_not_found() {
        let mut mock_repo = MockReservationRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(7))
            .returning(|_| Ok(None));

        let service = ReservationService::new(mock_repo);
        let result = service.get_reservation(7).await;

        assert!(matches!(result, Err(ReservationError::NotFound(7))));
    }

    #[tokio::test]
    async fn test_delete_reservation_maps_false_to_not_found() {
        let mut mock_repo = MockReservationRepository::new();
        mock_repo
            .expect_delete()
            .with(eq(3))
            .returning(|_| Ok(false));

        let service = ReservationService::new(mock_repo);
        let result = service.delete_reservation(3).await;

        assert!(matches!(result, Err(ReservationError::NotFound(3))));
    }

    #[tokio::test]
    async fn test_create_passes_valid_input_through() {
        let mut mock_repo = MockReservationRepository::new();
        mock_repo.expect_create().returning(|input| {
            Ok(Reservation {
                id: 1,
                guest_name: input.guest_name,
                room_id: input.room_id,
                created_at: chrono::Utc::now(),
                updated_at: chrono::Utc::now(),
            })
        });

        let service = ReservationService::new(mock_repo);
        let reservation = service
            .create_reservation(CreateReservation {
                guest_name: "Alice".to_string(),
                room_id: 2,
            })
            .await
            .unwrap();

        assert_eq!(reservation.guest_name, "Alice");
        assert_eq!(reservation.room_id, 2);
    }
}
