pub mod booking;
pub mod inventory;
pub mod layout;
pub mod reference;
pub mod seat;
pub mod snapshot;

pub use booking::{Booking, CustomerData};
pub use inventory::SeatInventory;
pub use layout::{StorageZone, ZoneLayout};
pub use reference::{
    BookingReference, PositionalReferences, RandomReferences, ReferenceGenerator, ReferencePolicy,
};
pub use seat::{Column, SeatPosition, SeatState};
pub use snapshot::{ChartStyle, InventorySnapshot, Occupancy};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeatError {
    #[error("Invalid seat position: {0}")]
    InvalidPosition(String),

    #[error("Column {column} cannot be booked")]
    NonBookableColumn { column: Column },

    #[error("Seat {position} is not available ({state})")]
    SeatUnavailable {
        position: SeatPosition,
        state: &'static str,
    },

    #[error("Seat {position} is not reserved ({state})")]
    SeatNotReserved {
        position: SeatPosition,
        state: &'static str,
    },

    #[error("No unused booking reference found after {attempts} attempts")]
    ReferenceGenerationExhausted { attempts: u32 },

    #[error("Invalid booking reference: {0}")]
    InvalidReference(String),

    #[error("Invalid customer details: {0}")]
    InvalidCustomer(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type SeatResult<T> = Result<T, SeatError>;
