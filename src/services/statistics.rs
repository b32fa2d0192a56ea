//! statistics.rs
//!
//! Производные показатели зала. Ничего не хранится: всё пересчитывается
//! при каждом чтении из текущего состояния зала и журнала.

use serde::Serialize;

use crate::models::CinemaHall;
use crate::services::fragmentation;
use crate::services::ledger::BookingLedger;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_bookings: u64,
    pub rejected_bookings: u64,
    pub fragmentation_percent: f64,
    pub utilization_percent: f64,
    pub total_seats: usize,
    pub occupied_seats: usize,
    pub free_seats: usize,
    pub isolated_seats: usize,
}

impl Statistics {
    pub fn collect(hall: &CinemaHall, ledger: &BookingLedger) -> Self {
        let free = hall.count_free();
        let isolated = fragmentation::isolated_seats(hall).len();

        Self {
            total_bookings: ledger.total_bookings(),
            rejected_bookings: ledger.rejected_bookings(),
            fragmentation_percent: fragmentation::percent(isolated, free),
            utilization_percent: utilization_percent(hall),
            total_seats: hall.total_seats(),
            occupied_seats: hall.count_occupied(),
            free_seats: free,
            isolated_seats: isolated,
        }
    }
}

/// Доля занятых мест от всех мест зала, в процентах.
pub fn utilization_percent(hall: &CinemaHall) -> f64 {
    hall.count_occupied() as f64 * 100.0 / hall.total_seats() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingId, SeatId};

    #[test]
    fn empty_hall_has_zero_metrics() {
        let hall = CinemaHall::new(5, 8).unwrap();
        let stats = Statistics::collect(&hall, &BookingLedger::new());
        assert_eq!(stats.total_seats, 40);
        assert_eq!(stats.occupied_seats, 0);
        assert_eq!(stats.fragmentation_percent, 0.0);
        assert_eq!(stats.utilization_percent, 0.0);
    }

    #[test]
    fn metrics_follow_hall_state() {
        let mut hall = CinemaHall::new(1, 4).unwrap();
        let id = BookingId::new();
        for n in [0, 2] {
            hall.seat_mut(SeatId::new(0, n)).unwrap().book(id);
        }

        let stats = Statistics::collect(&hall, &BookingLedger::new());
        assert_eq!(stats.occupied_seats, 2);
        assert_eq!(stats.free_seats, 2);
        // 0-1 и 0-3 изолированы
        assert_eq!(stats.isolated_seats, 2);
        assert_eq!(stats.fragmentation_percent, 100.0);
        assert_eq!(stats.fragmentation_percent, fragmentation::fragmentation_percent(&hall));
        assert_eq!(stats.utilization_percent, 50.0);
    }

    #[test]
    fn full_hall_reports_zero_fragmentation() {
        let mut hall = CinemaHall::new(1, 3).unwrap();
        let id = BookingId::new();
        for n in 0..3 {
            hall.seat_mut(SeatId::new(0, n)).unwrap().book(id);
        }

        let stats = Statistics::collect(&hall, &BookingLedger::new());
        assert_eq!(stats.free_seats, 0);
        assert_eq!(stats.fragmentation_percent, 0.0);
        assert_eq!(stats.utilization_percent, 100.0);
    }

    #[test]
    fn serializes_camel_case() {
        let hall = CinemaHall::new(1, 2).unwrap();
        let value = serde_json::to_value(Statistics::collect(&hall, &BookingLedger::new())).unwrap();
        assert_eq!(value["totalSeats"], 2);
        assert_eq!(value["fragmentationPercent"], 0.0);
        assert!(value.get("rejectedBookings").is_some());
    }
}
