use crate::reference::BookingReference;
use crate::seat::SeatPosition;
use crate::{SeatError, SeatResult};
use chrono::{DateTime, Utc};
use seatmap_shared::Masked;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Customer details stored with a booking.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CustomerData {
    #[default]
    Anonymous,
    Named {
        name: String,
    },
    Passenger {
        passport_number: Masked<String>,
        first_name: String,
        last_name: String,
    },
}

impl CustomerData {
    pub fn named(name: impl Into<String>) -> Self {
        CustomerData::Named { name: name.into() }
    }

    pub fn passenger(
        passport_number: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        CustomerData::Passenger {
            passport_number: Masked::new(passport_number.into()),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn validate(&self) -> SeatResult<()> {
        match self {
            CustomerData::Anonymous => Ok(()),
            CustomerData::Named { name } => require("name", name),
            CustomerData::Passenger {
                passport_number,
                first_name,
                last_name,
            } => {
                require("passport number", passport_number.expose())?;
                require("first name", first_name)?;
                require("last name", last_name)
            }
        }
    }
}

fn require(field: &str, value: &str) -> SeatResult<()> {
    if value.trim().is_empty() {
        return Err(SeatError::InvalidCustomer(format!("{} is required", field)));
    }
    Ok(())
}

impl fmt::Display for CustomerData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerData::Anonymous => f.write_str("-"),
            CustomerData::Named { name } => f.write_str(name),
            CustomerData::Passenger {
                passport_number,
                first_name,
                last_name,
            } => write!(f, "{} {} (passport {})", first_name, last_name, passport_number),
        }
    }
}

/// Ledger entry for a reserved seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub reference: BookingReference,
    pub position: SeatPosition,
    pub customer: CustomerData,
    pub booked_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_validation() {
        assert!(CustomerData::Anonymous.validate().is_ok());
        assert!(CustomerData::named("Ada Lovelace").validate().is_ok());
        assert!(CustomerData::passenger("P1234567", "Ada", "Lovelace")
            .validate()
            .is_ok());

        assert!(matches!(
            CustomerData::named("  ").validate(),
            Err(SeatError::InvalidCustomer(_))
        ));
        assert!(CustomerData::passenger("", "Ada", "Lovelace")
            .validate()
            .is_err());
        assert!(CustomerData::passenger("P1234567", "Ada", "")
            .validate()
            .is_err());
    }

    #[test]
    fn test_customer_display_masks_passport() {
        let customer = CustomerData::passenger("P1234567", "Ada", "Lovelace");
        let shown = customer.to_string();

        assert_eq!(shown, "Ada Lovelace (passport ********)");
        assert!(!shown.contains("P1234567"));
        assert_eq!(CustomerData::Anonymous.to_string(), "-");
    }
}
