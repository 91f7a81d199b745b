pub mod models;
pub mod pii;

pub use models::events::{SeatBookedEvent, SeatEvent, SeatFreedEvent};
pub use pii::Masked;
