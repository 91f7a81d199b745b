use crate::booking::Booking;
use crate::seat::{Column, SeatState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seat counts by state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    pub free: usize,
    pub reserved: usize,
    pub storage: usize,
    pub aisle: usize,
}

impl Occupancy {
    pub fn bookable(&self) -> usize {
        self.free + self.reserved
    }

    /// Share of bookable seats currently reserved.
    pub fn utilization(&self) -> f64 {
        if self.bookable() == 0 {
            0.0
        } else {
            self.reserved as f64 / self.bookable() as f64
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartStyle {
    /// One glyph per seat: F, R, X or S.
    Symbols,
    /// Reserved seats show their booking reference.
    References,
}

/// Point-in-time copy of the seat map and the booking ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub taken_at: DateTime<Utc>,
    /// Row-major, `Column::COUNT` seats per row.
    pub rows: Vec<Vec<SeatState>>,
    pub bookings: Vec<Booking>,
    pub occupancy: Occupancy,
}

fn cell(state: &SeatState, style: ChartStyle) -> String {
    match (state, style) {
        (SeatState::Reserved(reference), ChartStyle::References) => reference.to_string(),
        _ => state.symbol().to_string(),
    }
}

impl InventorySnapshot {
    pub fn seat(&self, row: usize, column: Column) -> Option<&SeatState> {
        self.rows.get(row).and_then(|seats| seats.get(column.index()))
    }

    /// Seat chart with a header of column letters and one line per row.
    pub fn render(&self, style: ChartStyle) -> String {
        let width = self
            .rows
            .iter()
            .flatten()
            .map(|state| cell(state, style).len())
            .max()
            .unwrap_or(1);

        let header: Vec<String> = Column::ALL
            .iter()
            .map(|column| format!("{:<width$}", column.letter(), width = width))
            .collect();

        let mut out = format!("    {}\n", header.join(" ").trim_end());
        for (row, seats) in self.rows.iter().enumerate() {
            let cells: Vec<String> = seats
                .iter()
                .map(|state| format!("{:<width$}", cell(state, style), width = width))
                .collect();
            out.push_str(&format!("{:>3} {}\n", row + 1, cells.join(" ").trim_end()));
        }
        out
    }

    /// One line per active booking: reference, seat, customer.
    pub fn render_bookings(&self) -> String {
        self.bookings
            .iter()
            .map(|booking| {
                format!(
                    "{:<10} {:<4} {}\n",
                    booking.reference,
                    booking.position.label(),
                    booking.customer
                )
            })
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::CustomerData;
    use crate::inventory::SeatInventory;
    use crate::layout::ZoneLayout;
    use crate::reference::ReferencePolicy;

    fn inventory() -> SeatInventory {
        SeatInventory::new(ZoneLayout::default(), ReferencePolicy::Positional).unwrap()
    }

    #[test]
    fn test_render_symbols() {
        let mut inventory = inventory();
        inventory
            .book_seat(0, Column::B, CustomerData::Anonymous)
            .unwrap();

        let chart = inventory.snapshot().render(ChartStyle::Symbols);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines.len(), 81);
        assert_eq!(lines[0], "    A B C X D E F");
        assert_eq!(lines[1], "  1 F R F X F F F");
        assert_eq!(lines[78], " 78 F F F X S S S");
        assert_eq!(lines[80], " 80 F F F X S S S");
    }

    #[test]
    fn test_render_references() {
        let mut inventory = inventory();
        inventory
            .book_seat(9, Column::C, CustomerData::Anonymous)
            .unwrap();

        let chart = inventory.snapshot().render(ChartStyle::References);
        let row_ten = chart.lines().nth(10).unwrap();

        assert!(row_ten.starts_with(" 10 F   F   C10 X"));
    }

    #[test]
    fn test_render_bookings_masks_passport() {
        let mut inventory = inventory();
        inventory
            .book_seat(0, Column::A, CustomerData::passenger("P998877", "Ada", "Lovelace"))
            .unwrap();

        let listing = inventory.snapshot().render_bookings();
        assert!(listing.starts_with("A1"));
        assert!(listing.contains("1A"));
        assert!(listing.contains("Ada Lovelace (passport ********)"));
        assert!(!listing.contains("P998877"));
    }

    #[test]
    fn test_snapshot_json_carries_ledger() {
        let mut inventory = inventory();
        inventory
            .book_seat(2, Column::E, CustomerData::named("Grace"))
            .unwrap();

        let json = inventory.snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["bookings"][0]["reference"], "E3");
        assert_eq!(value["bookings"][0]["customer"]["kind"], "named");
        assert_eq!(value["bookings"][0]["customer"]["name"], "Grace");
        assert_eq!(value["rows"][2][Column::E.index()]["state"], "RESERVED");
        assert_eq!(value["rows"][2][Column::E.index()]["reference"], "E3");
        assert_eq!(value["occupancy"]["reserved"], 1);
    }

    #[test]
    fn test_utilization() {
        let occupancy = Occupancy {
            free: 3,
            reserved: 1,
            storage: 2,
            aisle: 4,
        };
        assert_eq!(occupancy.bookable(), 4);
        assert!((occupancy.utilization() - 0.25).abs() < f64::EPSILON);
        assert_eq!(Occupancy::default().utilization(), 0.0);
    }
}
