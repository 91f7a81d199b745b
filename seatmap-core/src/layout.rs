use crate::seat::{Column, SeatPosition, SeatState};
use crate::{SeatError, SeatResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ROWS: usize = 80;
/// Largest cabin accepted; seat labels stay within three digits.
pub const MAX_ROWS: usize = 999;
pub const DEFAULT_STORAGE_FIRST_ROW: usize = 77;
pub const DEFAULT_STORAGE_LAST_ROW: usize = 79;

/// Block of seats held back for cabin storage. Rows are zero-indexed and inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageZone {
    pub first_row: usize,
    pub last_row: usize,
    pub columns: Vec<Column>,
}

impl StorageZone {
    pub fn contains(&self, position: &SeatPosition) -> bool {
        (self.first_row..=self.last_row).contains(&position.row)
            && self.columns.contains(&position.column)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Default for StorageZone {
    fn default() -> Self {
        Self {
            first_row: DEFAULT_STORAGE_FIRST_ROW,
            last_row: DEFAULT_STORAGE_LAST_ROW,
            columns: vec![Column::D, Column::E, Column::F],
        }
    }
}

/// Fixed zones of the cabin: the aisle column and the storage block.
///
/// Zones are applied once when the inventory is built and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneLayout {
    pub rows: usize,
    pub storage: StorageZone,
}

impl Default for ZoneLayout {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            storage: StorageZone::default(),
        }
    }
}

impl ZoneLayout {
    pub fn validate(&self) -> SeatResult<()> {
        if self.rows == 0 {
            return Err(SeatError::InvalidConfiguration(
                "seat map needs at least one row".to_string(),
            ));
        }

        if self.rows > MAX_ROWS {
            return Err(SeatError::InvalidConfiguration(format!(
                "seat map has {} rows, at most {} are supported",
                self.rows, MAX_ROWS
            )));
        }

        if self.storage.is_empty() {
            return Ok(());
        }

        if self.storage.first_row > self.storage.last_row {
            return Err(SeatError::InvalidConfiguration(format!(
                "storage rows are inverted: {} > {}",
                self.storage.first_row, self.storage.last_row
            )));
        }

        if self.storage.last_row >= self.rows {
            return Err(SeatError::InvalidConfiguration(format!(
                "storage row {} is outside a {}-row seat map",
                self.storage.last_row, self.rows
            )));
        }

        if self.storage.columns.contains(&Column::Aisle) {
            return Err(SeatError::InvalidConfiguration(
                "storage cannot overlap the aisle".to_string(),
            ));
        }

        Ok(())
    }

    /// Zone state for a seat, or `None` when the seat is bookable.
    pub fn zone_for(&self, position: &SeatPosition) -> Option<SeatState> {
        if position.column == Column::Aisle {
            Some(SeatState::Aisle)
        } else if self.storage.contains(position) {
            Some(SeatState::Storage)
        } else {
            None
        }
    }

    pub fn seat_count(&self) -> usize {
        self.rows * Column::COUNT
    }
}
