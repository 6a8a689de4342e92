use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, QueryOrder,
    QuerySelect, TransactionTrait,
};

use crate::{
    entity,
    error::{ReservationError, ReservationResult},
    models::{CreateReservation, Reservation, UpdateReservation},
    repository::ReservationRepository,
};

/// PostgreSQL implementation of ReservationRepository.
///
/// Every mutation runs in a transaction and takes a row lock
/// (`SELECT ... FOR UPDATE`) on the affected room, so two concurrent
/// bookings for the last free room serialize and exactly one wins.
pub struct PgReservationRepository {
    db: DatabaseConnection,
}

impl PgReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lock a room row for the remainder of the transaction
    async fn lock_room(
        txn: &DatabaseTransaction,
        room_id: i64,
    ) -> ReservationResult<Option<entity::room::Model>> {
        entity::room::Entity::find_by_id(room_id)
            .lock_exclusive()
            .one(txn)
            .await
            .map_err(db_error)
    }

    async fn set_room_availability(
        txn: &DatabaseTransaction,
        room: entity::room::Model,
        available: bool,
    ) -> ReservationResult<()> {
        let mut active: entity::room::ActiveModel = room.into();
        active.available = Set(available);
        active.update(txn).await.map_err(db_error)?;
        Ok(())
    }
}

fn db_error(e: sea_orm::DbErr) -> ReservationError {
    ReservationError::Internal(format!("Database error: {}", e))
}

#[async_trait]
impl ReservationRepository for PgReservationRepository {
    async fn create(&self, input: CreateReservation) -> ReservationResult<Reservation> {
        let txn = self.db.begin().await.map_err(db_error)?;

        // A dropped transaction rolls back, so any early return below
        // leaves the room untouched.
        let room = Self::lock_room(&txn, input.room_id)
            .await?
            .ok_or(ReservationError::RoomNotFound(input.room_id))?;

        if !room.available {
            return Err(ReservationError::RoomUnavailable(input.room_id));
        }

        Self::set_room_availability(&txn, room, false).await?;

        let active: entity::reservation::ActiveModel = input.into();
        let model = active.insert(&txn).await.map_err(db_error)?;

        txn.commit().await.map_err(db_error)?;

        tracing::info!(
            reservation_id = model.id,
            room_id = model.room_id,
            "Created reservation"
        );
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> ReservationResult<Option<Reservation>> {
        let model = entity::reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self) -> ReservationResult<Vec<Reservation>> {
        let models = entity::reservation::Entity::find()
            .order_by_asc(entity::reservation::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, id: i64, input: UpdateReservation) -> ReservationResult<Reservation> {
        let txn = self.db.begin().await.map_err(db_error)?;

        let model = entity::reservation::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_error)?
            .ok_or(ReservationError::NotFound(id))?;

        let current_room_id = model.room_id;
        let mut active: entity::reservation::ActiveModel = model.into();

        if let Some(name) = input.guest_name {
            if !name.is_empty() {
                active.guest_name = Set(name);
            }
        }

        if let Some(new_room_id) = input.room_id {
            if new_room_id != current_room_id {
                // Lock both rooms in ascending id order so two crossing
                // transfers cannot deadlock on each other's rows.
                let (low, high) = if current_room_id < new_room_id {
                    (current_room_id, new_room_id)
                } else {
                    (new_room_id, current_room_id)
                };
                let low_room = Self::lock_room(&txn, low).await?;
                let high_room = Self::lock_room(&txn, high).await?;
                let (old_room, target) = if low == current_room_id {
                    (low_room, high_room)
                } else {
                    (high_room, low_room)
                };

                let target = target.ok_or(ReservationError::RoomNotFound(new_room_id))?;
                if !target.available {
                    return Err(ReservationError::RoomUnavailable(new_room_id));
                }

                // Release the old room, then occupy the new one
                if let Some(old_room) = old_room {
                    Self::set_room_availability(&txn, old_room, true).await?;
                }
                Self::set_room_availability(&txn, target, false).await?;

                active.room_id = Set(new_room_id);
            }
        }

        active.updated_at = Set(Utc::now().into());
        let updated = active.update(&txn).await.map_err(db_error)?;

        txn.commit().await.map_err(db_error)?;

        tracing::info!(reservation_id = id, "Updated reservation");
        Ok(updated.into())
    }

    async fn delete(&self, id: i64) -> ReservationResult<bool> {
        let txn = self.db.begin().await.map_err(db_error)?;

        let Some(model) = entity::reservation::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_error)?
        else {
            return Ok(false);
        };

        if let Some(room) = Self::lock_room(&txn, model.room_id).await? {
            Self::set_room_availability(&txn, room, true).await?;
        }

        entity::reservation::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_error)?;

        txn.commit().await.map_err(db_error)?;

        tracing::info!(reservation_id = id, "Deleted reservation");
        Ok(true)
    }
}
