use crate::seat::SeatPosition;
use crate::{SeatError, SeatResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

const REFERENCE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const DEFAULT_REFERENCE_LENGTH: usize = 8;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 32;

/// Identifier tying a reserved seat to its ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct BookingReference(String);

impl BookingReference {
    pub fn new(value: impl Into<String>) -> SeatResult<Self> {
        let value = value.into().trim().to_ascii_uppercase();
        if value.is_empty() {
            return Err(SeatError::InvalidReference(
                "booking reference cannot be empty".to_string(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BookingReference {
    type Error = SeatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BookingReference> for String {
    fn from(reference: BookingReference) -> Self {
        reference.0
    }
}

impl fmt::Display for BookingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How booking references are produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ReferencePolicy {
    /// Random alphanumeric code, retried on collision with an active booking.
    Random {
        #[serde(default = "default_length")]
        length: usize,
        #[serde(default = "default_max_attempts")]
        max_attempts: u32,
    },
    /// Code derived from the seat itself, e.g. `A1` for row 1 column A.
    Positional,
}

fn default_length() -> usize {
    DEFAULT_REFERENCE_LENGTH
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

impl Default for ReferencePolicy {
    fn default() -> Self {
        ReferencePolicy::Random {
            length: DEFAULT_REFERENCE_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl ReferencePolicy {
    pub fn validate(&self) -> SeatResult<()> {
        match self {
            ReferencePolicy::Random { length: 0, .. } => Err(SeatError::InvalidConfiguration(
                "booking reference length must be positive".to_string(),
            )),
            ReferencePolicy::Random { max_attempts: 0, .. } => {
                Err(SeatError::InvalidConfiguration(
                    "reference generation needs at least one attempt".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }

    pub fn generator(&self) -> Box<dyn ReferenceGenerator + Send> {
        match self {
            ReferencePolicy::Random {
                length,
                max_attempts,
            } => Box::new(RandomReferences::new(*length, *max_attempts)),
            ReferencePolicy::Positional => Box::new(PositionalReferences),
        }
    }
}

/// Source of booking references for newly reserved seats.
pub trait ReferenceGenerator {
    /// Produce a reference not present in `active`.
    fn generate(
        &mut self,
        position: &SeatPosition,
        active: &HashSet<BookingReference>,
    ) -> SeatResult<BookingReference>;
}

pub struct RandomReferences<R = StdRng> {
    rng: R,
    length: usize,
    max_attempts: u32,
}

impl RandomReferences<StdRng> {
    pub fn new(length: usize, max_attempts: u32) -> Self {
        Self::with_rng(StdRng::from_entropy(), length, max_attempts)
    }

    pub fn seeded(seed: u64, length: usize, max_attempts: u32) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), length, max_attempts)
    }
}

impl<R: Rng> RandomReferences<R> {
    pub fn with_rng(rng: R, length: usize, max_attempts: u32) -> Self {
        Self {
            rng,
            length,
            max_attempts,
        }
    }

    fn candidate(&mut self) -> BookingReference {
        let code = (0..self.length)
            .map(|_| REFERENCE_ALPHABET[self.rng.gen_range(0..REFERENCE_ALPHABET.len())] as char)
            .collect();
        BookingReference(code)
    }
}

impl<R: Rng> ReferenceGenerator for RandomReferences<R> {
    fn generate(
        &mut self,
        position: &SeatPosition,
        active: &HashSet<BookingReference>,
    ) -> SeatResult<BookingReference> {
        for attempt in 1..=self.max_attempts {
            let reference = self.candidate();
            if !active.contains(&reference) {
                return Ok(reference);
            }
            tracing::debug!(seat = %position, attempt, "Booking reference collision, retrying");
        }

        tracing::error!(
            seat = %position,
            attempts = self.max_attempts,
            "Booking reference space exhausted"
        );
        Err(SeatError::ReferenceGenerationExhausted {
            attempts: self.max_attempts,
        })
    }
}

/// Derives the reference from the seat: column letter followed by the 1-based row.
pub struct PositionalReferences;

impl ReferenceGenerator for PositionalReferences {
    fn generate(
        &mut self,
        position: &SeatPosition,
        active: &HashSet<BookingReference>,
    ) -> SeatResult<BookingReference> {
        let reference = BookingReference(format!(
            "{}{}",
            position.column.letter(),
            position.row + 1
        ));
        // A free seat never holds its own code, so a hit here means the ledger is corrupt.
        if active.contains(&reference) {
            return Err(SeatError::ReferenceGenerationExhausted { attempts: 1 });
        }
        Ok(reference)
    }
}
