use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SeatBookedEvent {
    pub seat_number: String,
    pub booking_reference: String,
    pub booked_at: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SeatFreedEvent {
    pub seat_number: String,
    pub booking_reference: String,
    pub freed_at: i64,
}

/// Seat map changes, in the order the inventory applied them.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatEvent {
    SeatBooked(SeatBookedEvent),
    SeatFreed(SeatFreedEvent),
}

impl SeatEvent {
    pub fn seat_number(&self) -> &str {
        match self {
            SeatEvent::SeatBooked(e) => &e.seat_number,
            SeatEvent::SeatFreed(e) => &e.seat_number,
        }
    }

    pub fn booking_reference(&self) -> &str {
        match self {
            SeatEvent::SeatBooked(e) => &e.booking_reference,
            SeatEvent::SeatFreed(e) => &e.booking_reference,
        }
    }
}
