use crate::reference::BookingReference;
use crate::SeatError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cabin columns, left window to right window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Column {
    A,
    B,
    C,
    #[serde(rename = "X")]
    Aisle,
    D,
    E,
    F,
}

impl Column {
    pub const COUNT: usize = 7;

    pub const ALL: [Column; Column::COUNT] = [
        Column::A,
        Column::B,
        Column::C,
        Column::Aisle,
        Column::D,
        Column::E,
        Column::F,
    ];

    /// Position of the column within a row of the grid.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Letter printed on the seat chart. The aisle is drawn as `X`.
    pub fn letter(self) -> char {
        match self {
            Column::A => 'A',
            Column::B => 'B',
            Column::C => 'C',
            Column::Aisle => 'X',
            Column::D => 'D',
            Column::E => 'E',
            Column::F => 'F',
        }
    }

    pub fn is_bookable(self) -> bool {
        self != Column::Aisle
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl TryFrom<char> for Column {
    type Error = SeatError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value.to_ascii_uppercase() {
            'A' => Ok(Column::A),
            'B' => Ok(Column::B),
            'C' => Ok(Column::C),
            'X' => Ok(Column::Aisle),
            'D' => Ok(Column::D),
            'E' => Ok(Column::E),
            'F' => Ok(Column::F),
            other => Err(SeatError::InvalidPosition(format!(
                "unknown column '{}'",
                other
            ))),
        }
    }
}

impl FromStr for Column {
    type Err = SeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Column::try_from(letter),
            _ => Err(SeatError::InvalidPosition(format!(
                "unknown column '{}'",
                s.trim()
            ))),
        }
    }
}

/// A seat on the grid. `row` is zero-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatPosition {
    pub row: usize,
    pub column: Column,
}

impl SeatPosition {
    pub fn new(row: usize, column: Column) -> Self {
        Self { row, column }
    }

    /// Passenger-facing seat number, e.g. `12C` for row index 11.
    pub fn label(&self) -> String {
        format!("{}{}", self.row + 1, self.column.letter())
    }
}

impl fmt::Display for SeatPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row + 1, self.column.letter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reference", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatState {
    Free,
    Reserved(BookingReference),
    Storage,
    Aisle,
}

impl SeatState {
    /// Single-character glyph used on the seat chart.
    pub fn symbol(&self) -> char {
        match self {
            SeatState::Free => 'F',
            SeatState::Reserved(_) => 'R',
            SeatState::Storage => 'S',
            SeatState::Aisle => 'X',
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            SeatState::Free => "free",
            SeatState::Reserved(_) => "reserved",
            SeatState::Storage => "storage",
            SeatState::Aisle => "aisle",
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, SeatState::Free)
    }

    pub fn reference(&self) -> Option<&BookingReference> {
        match self {
            SeatState::Reserved(reference) => Some(reference),
            _ => None,
        }
    }
}
