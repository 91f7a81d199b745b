use seatmap_core::SeatError;

/// Problems with what the user typed, caught before the inventory is called.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("'{0}' is not a row number.")]
    NotANumber(String),

    #[error("Row must be between 1 and {rows}.")]
    RowOutOfRange { rows: usize },

    #[error("Invalid column letter.")]
    UnknownColumn(String),

    #[error("This is an aisle, please enter A-F.")]
    AisleSelected,
}

/// Message shown to the user for an inventory failure.
pub fn user_message(err: &SeatError) -> String {
    match err {
        SeatError::InvalidPosition(detail) => format!("Invalid seat: {}.", detail),
        SeatError::NonBookableColumn { .. } => "This is an aisle, please enter A-F.".to_string(),
        SeatError::SeatUnavailable { position, state } => {
            format!("Seat {} is unavailable ({}).", position, state)
        }
        SeatError::SeatNotReserved { position, state } => {
            format!("Seat {} was not reserved ({}).", position, state)
        }
        SeatError::ReferenceGenerationExhausted { .. } => {
            tracing::error!(error = %err, "Booking reference generation failed");
            "Could not issue a booking reference, please try again.".to_string()
        }
        SeatError::InvalidReference(detail)
        | SeatError::InvalidCustomer(detail)
        | SeatError::InvalidConfiguration(detail) => format!("{}.", detail),
    }
}
