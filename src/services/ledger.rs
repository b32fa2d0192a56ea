use std::collections::HashMap;

use crate::models::{Booking, BookingId};

/// Журнал подтверждённых броней и счётчики попыток.
#[derive(Debug, Clone, Default)]
pub struct BookingLedger {
    bookings: HashMap<BookingId, Booking>,
    total_bookings: u64,
    rejected_bookings: u64,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, booking: Booking) {
        self.bookings.insert(booking.id, booking);
        self.total_bookings += 1;
    }

    pub fn record_rejection(&mut self) {
        self.rejected_bookings += 1;
    }

    pub fn get(&self, id: &BookingId) -> Option<&Booking> {
        self.bookings.get(id)
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    pub fn bookings(&self) -> impl Iterator<Item = &Booking> {
        self.bookings.values()
    }

    pub fn total_bookings(&self) -> u64 {
        self.total_bookings
    }

    pub fn rejected_bookings(&self) -> u64 {
        self.rejected_bookings
    }

    pub fn clear(&mut self) {
        self.bookings.clear();
        self.total_bookings = 0;
        self.rejected_bookings = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeatId;
    use chrono::Utc;

    #[test]
    fn record_and_clear() {
        let mut ledger = BookingLedger::new();
        let id = BookingId::new();
        ledger.record(Booking {
            id,
            seats: vec![SeatId::new(0, 1)],
            customer_name: "Guest".to_string(),
            created_at: Utc::now(),
        });
        ledger.record_rejection();

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.total_bookings(), 1);
        assert_eq!(ledger.rejected_bookings(), 1);
        assert_eq!(ledger.get(&id).map(|b| b.seats.len()), Some(1));

        ledger.clear();
        assert!(ledger.is_empty());
        assert_eq!(ledger.total_bookings(), 0);
        assert_eq!(ledger.rejected_bookings(), 0);
    }
}
