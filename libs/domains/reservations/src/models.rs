use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A bookable room with nightly pricing and live availability.
///
/// Rooms are seeded by migrations and never managed over HTTP. Their
/// `available` flag is owned by the reservation lifecycle: it flips to
/// `false` when a reservation occupies the room and back to `true` when
/// that reservation moves away or is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub name: String,
    pub price_per_night: f64,
    pub available: bool,
}

/// A reservation binding one guest to exactly one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Reservation {
    pub id: i64,
    pub guest_name: String,
    /// Room currently held by this reservation
    pub room_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new reservation
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateReservation {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Guest name must be between 1 and 100 characters"
    ))]
    pub guest_name: String,
    pub room_id: i64,
}

/// DTO for partially updating a reservation (all fields optional)
///
/// Absent fields are left untouched. An empty guest name is ignored
/// rather than rejected, so callers can send the full shape with
/// only the fields they care about filled in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateReservation {
    #[validate(length(max = 100, message = "Guest name must be at most 100 characters"))]
    pub guest_name: Option<String>,
    /// Target room; triggers a transfer when it differs from the current room
    pub room_id: Option<i64>,
}

/// Confirmation body returned by successful delete requests
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteConfirmation {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_reservation_validation() {
        let valid = CreateReservation {
            guest_name: "Ada Lovelace".to_string(),
            room_id: 1,
        };
        assert!(valid.validate().is_ok());

        let empty_name = CreateReservation {
            guest_name: String::new(),
            room_id: 1,
        };
        assert!(empty_name.validate().is_err());

        let too_long = CreateReservation {
            guest_name: "x".repeat(101),
            room_id: 1,
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_update_reservation_allows_absent_fields() {
        let update = UpdateReservation::default();
        assert!(update.validate().is_ok());
    }
}
