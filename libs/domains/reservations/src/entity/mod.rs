//! SeaORM entities backing the reservations domain.
//!
//! Two tables participate: `rooms` (seeded inventory with a live
//! availability flag) and `reservations` (one row per active booking,
//! each referencing the room it holds).

pub mod reservation;
pub mod room;
