use crate::booking::{Booking, CustomerData};
use crate::layout::ZoneLayout;
use crate::reference::{BookingReference, ReferenceGenerator, ReferencePolicy};
use crate::seat::{Column, SeatPosition, SeatState};
use crate::snapshot::{InventorySnapshot, Occupancy};
use crate::{SeatError, SeatResult};
use chrono::Utc;
use seatmap_shared::{SeatBookedEvent, SeatEvent, SeatFreedEvent};
use std::collections::{BTreeMap, HashSet, VecDeque};

/// Events kept for `drain_events`; the oldest are dropped beyond this.
pub const JOURNAL_CAPACITY: usize = 1024;

/// In-memory seat map for a single cabin.
///
/// Owns the grid, the booking ledger and the set of active references. Every
/// mutation either updates all three or leaves them untouched.
pub struct SeatInventory {
    layout: ZoneLayout,
    seats: Vec<SeatState>,
    bookings: BTreeMap<BookingReference, Booking>,
    active: HashSet<BookingReference>,
    generator: Box<dyn ReferenceGenerator + Send>,
    journal: VecDeque<SeatEvent>,
}

impl SeatInventory {
    pub fn new(layout: ZoneLayout, policy: ReferencePolicy) -> SeatResult<Self> {
        policy.validate()?;
        Self::with_generator(layout, policy.generator())
    }

    /// Build an inventory that draws references from a caller-supplied generator.
    pub fn with_generator(
        layout: ZoneLayout,
        generator: Box<dyn ReferenceGenerator + Send>,
    ) -> SeatResult<Self> {
        layout.validate()?;
        Ok(Self::build(layout, generator))
    }

    fn build(layout: ZoneLayout, generator: Box<dyn ReferenceGenerator + Send>) -> Self {
        let mut inventory = Self {
            seats: vec![SeatState::Free; layout.seat_count()],
            layout,
            bookings: BTreeMap::new(),
            active: HashSet::new(),
            generator,
            journal: VecDeque::new(),
        };
        inventory.apply_zones();
        tracing::info!(
            rows = inventory.layout.rows,
            storage_rows = ?(inventory.layout.storage.first_row..=inventory.layout.storage.last_row),
            "Seat inventory initialized"
        );
        inventory
    }

    fn apply_zones(&mut self) {
        for row in 0..self.layout.rows {
            for column in Column::ALL {
                let position = SeatPosition::new(row, column);
                if let Some(zone) = self.layout.zone_for(&position) {
                    self.seats[row * Column::COUNT + column.index()] = zone;
                }
            }
        }
    }

    fn locate(&self, row: usize, column: Column) -> SeatResult<(SeatPosition, usize)> {
        if row >= self.layout.rows {
            return Err(SeatError::InvalidPosition(format!(
                "row {} is outside rows 1-{}",
                row + 1,
                self.layout.rows
            )));
        }
        Ok((
            SeatPosition::new(row, column),
            row * Column::COUNT + column.index(),
        ))
    }

    pub fn layout(&self) -> &ZoneLayout {
        &self.layout
    }

    pub fn rows(&self) -> usize {
        self.layout.rows
    }

    pub fn seat_state(&self, row: usize, column: Column) -> SeatResult<&SeatState> {
        let (_, index) = self.locate(row, column)?;
        Ok(&self.seats[index])
    }

    /// `true` only when the seat is free. The aisle is reported as unavailable
    /// rather than as an error.
    pub fn check_availability(&self, row: usize, column: Column) -> SeatResult<bool> {
        let (position, index) = self.locate(row, column)?;
        let available = column.is_bookable() && self.seats[index].is_free();
        tracing::debug!(seat = %position, available, "Checked seat availability");
        Ok(available)
    }

    /// Reserve a free seat and record the customer against a fresh reference.
    pub fn book_seat(
        &mut self,
        row: usize,
        column: Column,
        customer: CustomerData,
    ) -> SeatResult<BookingReference> {
        let (position, index) = self.locate(row, column)?;
        if !column.is_bookable() {
            tracing::warn!(seat = %position, "Rejected booking on non-bookable column");
            return Err(SeatError::NonBookableColumn { column });
        }
        customer.validate()?;

        if !self.seats[index].is_free() {
            let state = self.seats[index].describe();
            tracing::warn!(seat = %position, state, "Rejected booking on unavailable seat");
            return Err(SeatError::SeatUnavailable { position, state });
        }

        let reference = self.generator.generate(&position, &self.active)?;
        let booked_at = Utc::now();

        self.seats[index] = SeatState::Reserved(reference.clone());
        self.active.insert(reference.clone());
        self.bookings.insert(
            reference.clone(),
            Booking {
                reference: reference.clone(),
                position,
                customer,
                booked_at,
            },
        );
        self.record(SeatEvent::SeatBooked(SeatBookedEvent {
            seat_number: position.label(),
            booking_reference: reference.to_string(),
            booked_at: booked_at.timestamp(),
        }));

        tracing::info!(seat = %position, reference = %reference, "Seat booked");
        Ok(reference)
    }

    /// Release a reserved seat, returning the ledger entry that was removed.
    pub fn free_seat(&mut self, row: usize, column: Column) -> SeatResult<Booking> {
        let (position, index) = self.locate(row, column)?;
        if !column.is_bookable() {
            tracing::warn!(seat = %position, "Rejected release on non-bookable column");
            return Err(SeatError::NonBookableColumn { column });
        }

        let reference = match &self.seats[index] {
            SeatState::Reserved(reference) => reference.clone(),
            other => {
                let state = other.describe();
                tracing::warn!(seat = %position, state, "Rejected release of unreserved seat");
                return Err(SeatError::SeatNotReserved { position, state });
            }
        };

        let booking = self.bookings.remove(&reference).ok_or_else(|| {
            tracing::error!(seat = %position, reference = %reference, "Reserved seat missing from ledger");
            SeatError::SeatNotReserved {
                position,
                state: "reserved without ledger entry",
            }
        })?;
        self.active.remove(&reference);
        self.seats[index] = SeatState::Free;
        self.record(SeatEvent::SeatFreed(SeatFreedEvent {
            seat_number: position.label(),
            booking_reference: reference.to_string(),
            freed_at: Utc::now().timestamp(),
        }));

        tracing::info!(seat = %position, reference = %reference, "Seat freed");
        Ok(booking)
    }

    pub fn find_booking(&self, reference: &BookingReference) -> Option<&Booking> {
        self.bookings.get(reference)
    }

    /// Active bookings ordered by reference.
    pub fn bookings(&self) -> impl Iterator<Item = &Booking> {
        self.bookings.values()
    }

    pub fn occupancy(&self) -> Occupancy {
        self.seats
            .iter()
            .fold(Occupancy::default(), |mut acc, state| {
                match state {
                    SeatState::Free => acc.free += 1,
                    SeatState::Reserved(_) => acc.reserved += 1,
                    SeatState::Storage => acc.storage += 1,
                    SeatState::Aisle => acc.aisle += 1,
                }
                acc
            })
    }

    /// Consistent copy of the grid and ledger.
    pub fn snapshot(&self) -> InventorySnapshot {
        let rows = self
            .seats
            .chunks(Column::COUNT)
            .map(|row| row.to_vec())
            .collect();

        InventorySnapshot {
            taken_at: Utc::now(),
            rows,
            bookings: self.bookings.values().cloned().collect(),
            occupancy: self.occupancy(),
        }
    }

    fn record(&mut self, event: SeatEvent) {
        if self.journal.len() == JOURNAL_CAPACITY {
            if let Some(dropped) = self.journal.pop_front() {
                tracing::warn!(
                    seat = dropped.seat_number(),
                    "Seat event journal full, dropping oldest event"
                );
            }
        }
        self.journal.push_back(event);
    }

    /// Take the seat events recorded since the last drain.
    ///
    /// Callers should drain after each command; at most `JOURNAL_CAPACITY`
    /// undrained events are kept.
    pub fn drain_events(&mut self) -> Vec<SeatEvent> {
        self.journal.drain(..).collect()
    }
}

impl Default for SeatInventory {
    fn default() -> Self {
        Self::build(ZoneLayout::default(), ReferencePolicy::default().generator())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::RandomReferences;

    fn positional() -> SeatInventory {
        SeatInventory::new(ZoneLayout::default(), ReferencePolicy::Positional).unwrap()
    }

    #[test]
    fn test_zones_applied_on_construction() {
        let inventory = SeatInventory::default();

        for row in 0..80 {
            assert_eq!(
                inventory.seat_state(row, Column::Aisle).unwrap(),
                &SeatState::Aisle
            );
        }
        for row in 77..80 {
            for column in [Column::D, Column::E, Column::F] {
                assert_eq!(
                    inventory.seat_state(row, column).unwrap(),
                    &SeatState::Storage
                );
            }
        }
        assert_eq!(inventory.seat_state(77, Column::C).unwrap(), &SeatState::Free);
        assert_eq!(inventory.seat_state(76, Column::D).unwrap(), &SeatState::Free);
    }

    #[test]
    fn test_apply_zones_is_idempotent() {
        let mut inventory = positional();
        let before = inventory.snapshot().rows;

        inventory.apply_zones();
        assert_eq!(inventory.snapshot().rows, before);
    }

    #[test]
    fn test_booking_lifecycle() {
        let mut inventory = positional();

        assert!(inventory.check_availability(0, Column::A).unwrap());
        let reference = inventory
            .book_seat(0, Column::A, CustomerData::named("Ada"))
            .unwrap();
        assert_eq!(reference.as_str(), "A1");
        assert!(!inventory.check_availability(0, Column::A).unwrap());
        assert_eq!(
            inventory.find_booking(&reference).unwrap().position,
            SeatPosition::new(0, Column::A)
        );

        let freed = inventory.free_seat(0, Column::A).unwrap();
        assert_eq!(freed.reference, reference);
        assert_eq!(freed.customer, CustomerData::named("Ada"));
        assert!(inventory.check_availability(0, Column::A).unwrap());
        assert!(inventory.find_booking(&reference).is_none());
    }

    #[test]
    fn test_out_of_range_row() {
        let mut inventory = positional();

        assert!(matches!(
            inventory.check_availability(80, Column::A),
            Err(SeatError::InvalidPosition(_))
        ));
        assert!(matches!(
            inventory.book_seat(200, Column::B, CustomerData::Anonymous),
            Err(SeatError::InvalidPosition(_))
        ));
        assert!(matches!(
            inventory.free_seat(80, Column::C),
            Err(SeatError::InvalidPosition(_))
        ));
    }

    #[test]
    fn test_invalid_customer_leaves_seat_free() {
        let mut inventory = positional();

        let result = inventory.book_seat(3, Column::B, CustomerData::named(""));
        assert!(matches!(result, Err(SeatError::InvalidCustomer(_))));
        assert!(inventory.check_availability(3, Column::B).unwrap());
        assert_eq!(inventory.bookings().count(), 0);
    }

    #[test]
    fn test_exhausted_generator_leaves_seat_free() {
        let mut inventory = SeatInventory::with_generator(
            ZoneLayout::default(),
            Box::new(RandomReferences::seeded(3, 1, 10_000)),
        )
        .unwrap();

        let mut booked = 0;
        'fill: for row in 0..77 {
            for column in Column::ALL.into_iter().filter(|c| c.is_bookable()) {
                match inventory.book_seat(row, column, CustomerData::Anonymous) {
                    Ok(_) => booked += 1,
                    Err(SeatError::ReferenceGenerationExhausted { attempts }) => {
                        assert_eq!(attempts, 10_000);
                        assert!(inventory.check_availability(row, column).unwrap());
                        break 'fill;
                    }
                    Err(other) => panic!("unexpected error: {}", other),
                }
            }
        }

        // One-character references leave exactly 36 codes.
        assert_eq!(booked, 36);
        assert_eq!(inventory.bookings().count(), 36);
        assert_eq!(inventory.occupancy().reserved, 36);
    }

    #[test]
    fn test_events_recorded_in_order() {
        let mut inventory = positional();

        inventory
            .book_seat(4, Column::F, CustomerData::Anonymous)
            .unwrap();
        inventory.free_seat(4, Column::F).unwrap();

        let events = inventory.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], SeatEvent::SeatBooked(_)));
        assert!(matches!(events[1], SeatEvent::SeatFreed(_)));
        assert_eq!(events[1].seat_number(), "5F");
        assert_eq!(events[1].booking_reference(), "F5");
        assert!(inventory.drain_events().is_empty());
    }

    #[test]
    fn test_undrained_journal_is_bounded() {
        let mut inventory = positional();

        for _ in 0..1000 {
            inventory
                .book_seat(0, Column::A, CustomerData::Anonymous)
                .unwrap();
            inventory.free_seat(0, Column::A).unwrap();
        }

        let events = inventory.drain_events();
        assert_eq!(events.len(), JOURNAL_CAPACITY);
        assert!(matches!(events.last(), Some(SeatEvent::SeatFreed(_))));
        assert!(inventory.drain_events().is_empty());
    }

    #[test]
    fn test_default_occupancy() {
        let occupancy = SeatInventory::default().occupancy();
        assert_eq!(occupancy.aisle, 80);
        assert_eq!(occupancy.storage, 9);
        assert_eq!(occupancy.reserved, 0);
        assert_eq!(occupancy.free, 80 * 6 - 9);
    }
}
