//! Сценарии бронирования на уровне сервиса.
//!
//! Run with: `cargo test --test booking_scenarios`

use cinema_booking::models::{Admission, BookingOutcome, BookingRequest, RejectionReason, SeatId};
use cinema_booking::services::booking::BookingService;

fn book(service: &mut BookingService, seats: &[&str]) -> BookingOutcome {
    service
        .book_seats(&BookingRequest::new(seats.iter().copied(), "Test User"))
        .unwrap()
}

fn ids(seats: &[SeatId]) -> Vec<String> {
    seats.iter().map(ToString::to_string).collect()
}

#[test]
fn test_fragmenting_block_is_rejected_with_suggestions() {
    let mut service = BookingService::new(1, 8).unwrap();
    assert!(book(&mut service, &["0-5"]).is_confirmed());

    let outcome = book(&mut service, &["0-1", "0-2", "0-3"]);
    let rejection = outcome.rejection().expect("booking should be rejected");

    assert_eq!(rejection.reason, RejectionReason::FragmentationPrevention);
    assert_eq!(ids(&rejection.isolated_seats), ["0-0", "0-4"]);
    let suggestions: Vec<String> = rejection.suggestions.iter().map(ToString::to_string).collect();
    assert_eq!(suggestions, ["Row 1, seats 1-3", "Row 1, seats 3-5"]);

    // предложенный блок действительно бронируется
    let first = rejection.suggestions[0];
    let seats: Vec<String> = first.seat_ids().map(|id| id.to_string()).collect();
    let retry = service
        .book_seats(&BookingRequest::new(seats, "Test User"))
        .unwrap();
    assert_eq!(retry.confirmation().unwrap().admission, Admission::Standard);
}

#[test]
fn test_filling_gap_exactly_leaves_no_fragmentation() {
    let mut service = BookingService::new(1, 8).unwrap();

    assert!(book(&mut service, &["0-0", "0-1"]).is_confirmed());
    assert!(book(&mut service, &["0-4", "0-5"]).is_confirmed());
    let outcome = book(&mut service, &["0-2", "0-3"]);

    assert!(outcome.is_confirmed());
    assert_eq!(service.fragmentation(), 0.0);
    assert_eq!(service.statistics().fragmentation_percent, 0.0);
}

#[test]
fn test_last_resort_with_four_free_seats() {
    let mut service = BookingService::new(1, 8).unwrap();
    assert!(book(&mut service, &["0-4", "0-5", "0-6", "0-7"]).is_confirmed());
    assert_eq!(service.hall().count_free(), 4);

    // 0-0 останется одно, но зал почти полон
    let outcome = book(&mut service, &["0-1", "0-2", "0-3"]);
    let confirmation = outcome.confirmation().expect("last resort should allow booking");
    assert_eq!(confirmation.admission, Admission::LastResort);
    assert_eq!(service.hall().count_free(), 1);
}

#[test]
fn test_no_last_resort_with_five_free_seats() {
    let mut service = BookingService::new(1, 8).unwrap();
    assert!(book(&mut service, &["0-5", "0-6", "0-7"]).is_confirmed());
    assert_eq!(service.hall().count_free(), 5);

    let outcome = book(&mut service, &["0-1", "0-2", "0-3"]);
    let rejection = outcome.rejection().expect("booking should be rejected");
    assert_eq!(rejection.reason, RejectionReason::FragmentationPrevention);
    assert_eq!(service.statistics().rejected_bookings, 1);
}

#[test]
fn test_last_resort_needs_almost_all_free_seats() {
    let mut service = BookingService::new(1, 6).unwrap();
    assert!(book(&mut service, &["0-0", "0-1"]).is_confirmed());
    // свободны 0-2..0-5, пара в середине изолирует оба края
    let outcome = book(&mut service, &["0-3", "0-4"]);
    assert_eq!(
        outcome.rejection().map(|r| r.reason),
        Some(RejectionReason::FragmentationPrevention)
    );
}

#[test]
fn test_empty_hall_offers_every_seat_to_single_guest() {
    let service = BookingService::new(5, 8).unwrap();
    let available = service.available_seats(1);

    assert_eq!(available.len(), 40);
    assert_eq!(available.first().map(ToString::to_string).as_deref(), Some("0-0"));
    assert_eq!(available.last().map(ToString::to_string).as_deref(), Some("4-7"));
}

#[test]
fn test_availability_shrinks_to_last_resort_blocks() {
    let mut service = BookingService::new(1, 8).unwrap();
    assert!(book(&mut service, &["0-4", "0-5", "0-6", "0-7"]).is_confirmed());

    // при четырёх свободных местах любое окно из трёх допустимо
    assert_eq!(ids(&service.available_seats(3)), ["0-0", "0-1", "0-2", "0-3"]);
    // а пара в середине нет: 0-1..0-2 оставляет 0-0 и 0-3 одиночными
    assert_eq!(ids(&service.available_seats(2)), ["0-0", "0-1", "0-2", "0-3"]);
}

#[test]
fn test_sequential_blocks_fill_a_row() {
    let mut service = BookingService::new(8, 15).unwrap();
    for start in (0..15).step_by(3) {
        let seats: Vec<String> = (start..start + 3).map(|n| format!("0-{}", n)).collect();
        let outcome = service
            .book_seats(&BookingRequest::new(seats, format!("User{}", start)))
            .unwrap();
        assert!(outcome.is_confirmed(), "block starting at {} should be accepted", start);
    }
    assert_eq!(service.hall().row(0).unwrap().iter().filter(|s| s.is_occupied()).count(), 15);
}

#[test]
fn test_reset_is_idempotent() {
    let mut service = BookingService::new(3, 6).unwrap();
    book(&mut service, &["0-0", "0-1", "0-2"]);
    book(&mut service, &["1-3"]);
    book(&mut service, &["1-0", "1-1"]);

    for _ in 0..2 {
        service.reset();
        let stats = service.statistics();
        assert_eq!(stats.occupied_seats, 0);
        assert_eq!(stats.total_bookings, 0);
        assert_eq!(stats.rejected_bookings, 0);
        assert_eq!(stats.fragmentation_percent, 0.0);
        assert_eq!(stats.utilization_percent, 0.0);
    }
}

#[test]
fn test_booking_is_recorded_in_ledger() {
    let mut service = BookingService::new(2, 4).unwrap();
    let outcome = service
        .book_seats(&BookingRequest::new(["1-0", "1-1"], "Alice"))
        .unwrap();
    let id = outcome.confirmation().unwrap().booking_id;

    let booking = service.get_booking(&id).expect("booking should be in ledger");
    assert_eq!(booking.customer_name, "Alice");
    assert_eq!(ids(&booking.seats), ["1-0", "1-1"]);
    assert!(service
        .hall()
        .seats()
        .filter(|s| s.is_occupied())
        .all(|s| s.booking_id() == Some(id)));
}
