//! booking.rs
//!
//! Сервис бронирования: единственный владелец зала и журнала.
//!
//! Конвейер одной брони:
//! 1.  Разбор идентификаторов и проверка, что места существуют и свободны.
//! 2.  Все места в одном ряду.
//! 3.  Места идут подряд.
//! 4.  Бронь не оставляет изолированных мест. Одиночная бронь от проверки
//!     освобождена: одно место можно занять где угодно.
//! 5.  "Последний шанс": если свободно не больше четырёх мест и бронь забирает
//!     все или все без одного, фрагментация допускается.
//! 6.  Фиксация: места занимаются, бронь попадает в журнал.
//!
//! Сервис синхронный и не знает о блокировках: сериализацию вызовов
//! обеспечивает владелец (`AppState` держит его под мьютексом).

use chrono::Utc;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use crate::error::BookingError;
use crate::models::{
    Admission, Booking, BookingConfirmation, BookingId, BookingOutcome, BookingRejection,
    BookingRequest, CinemaHall, RejectionReason, SeatId,
};
use crate::services::fragmentation::{self, FragmentationReport};
use crate::services::ledger::BookingLedger;
use crate::services::statistics::Statistics;
use crate::services::suggestions;

/// Порог свободных мест, ниже которого включается режим "последнего шанса".
pub const LAST_RESORT_FREE_SEATS: usize = 4;

/// Разрешена ли фрагментирующая бронь размера `size` при `free` свободных местах.
pub fn is_last_resort(free: usize, size: usize) -> bool {
    // size >= free - 1 без вычитания в usize
    free <= LAST_RESORT_FREE_SEATS && size + 1 >= free
}

#[derive(Debug, Clone)]
pub struct BookingService {
    hall: CinemaHall,
    ledger: BookingLedger,
}

impl BookingService {
    pub fn new(rows: usize, seats_per_row: usize) -> Result<Self, BookingError> {
        Ok(Self {
            hall: CinemaHall::new(rows, seats_per_row)?,
            ledger: BookingLedger::new(),
        })
    }

    pub fn hall(&self) -> &CinemaHall {
        &self.hall
    }

    pub fn ledger(&self) -> &BookingLedger {
        &self.ledger
    }

    pub fn get_booking(&self, id: &BookingId) -> Option<&Booking> {
        self.ledger.get(id)
    }

    /// Полный конвейер бронирования. Отказы по бизнес-правилам возвращаются
    /// как `Ok(BookingOutcome::Rejected)`, ошибка только для некорректного ввода.
    pub fn book_seats(&mut self, request: &BookingRequest) -> Result<BookingOutcome, BookingError> {
        let seats = request.parse_seat_ids(self.hall.seats_per_row())?;
        self.book(seats, &request.customer_name)
    }

    /// Шаги 1-6 для уже разобранных мест. HTTP-слой разбирает запрос до
    /// захвата блокировки и приходит сюда; под блокировкой работа линейна
    /// по числу мест, которое не больше ширины ряда.
    pub fn book(&mut self, seats: Vec<SeatId>, customer_name: &str) -> Result<BookingOutcome, BookingError> {
        if seats.is_empty() {
            return Err(BookingError::EmptyRequest);
        }

        let admission = match self.evaluate(&seats) {
            Ok(admission) => admission,
            Err(rejection) => {
                if rejection.reason == RejectionReason::FragmentationPrevention {
                    self.ledger.record_rejection();
                    warn!(
                        "Booking for {} rejected: would isolate {}",
                        customer_name,
                        fragmentation::join_ids(&rejection.isolated_seats)
                    );
                } else {
                    debug!(reason = %rejection.reason, "Booking for {} rejected", customer_name);
                }
                return Ok(BookingOutcome::Rejected(rejection));
            }
        };

        Ok(BookingOutcome::Confirmed(self.commit(seats, admission, customer_name)))
    }

    /// Проверка без фиксации: шаги 1-5 конвейера для уже разобранных мест.
    pub fn evaluate(&self, seats: &[SeatId]) -> Result<Admission, BookingRejection> {
        self.check_placement(seats)?;

        self.admission(seats, self.hall.count_free()).map_err(|report| BookingRejection {
            reason: RejectionReason::FragmentationPrevention,
            message: report.message(),
            isolated_seats: report.isolated_seats,
            suggestions: suggestions::suggest_alternatives(&self.hall, seats),
        })
    }

    // Шаги 1-3: наличие, один ряд, непрерывность.
    fn check_placement(&self, seats: &[SeatId]) -> Result<(), BookingRejection> {
        for id in seats {
            let available = self.hall.seat_by_id(*id).is_some_and(|seat| !seat.is_occupied());
            if !available {
                return Err(BookingRejection::new(
                    RejectionReason::SeatUnavailable,
                    format!("Seat {} is not available", id),
                ));
            }
        }

        if seats.len() <= 1 {
            return Ok(());
        }

        let rows: BTreeSet<usize> = seats.iter().map(|id| id.row).collect();
        if rows.len() > 1 {
            return Err(BookingRejection::new(
                RejectionReason::DifferentRows,
                "All seats must be in the same row",
            ));
        }

        let mut numbers: Vec<usize> = seats.iter().map(|id| id.number).collect();
        numbers.sort_unstable();
        if numbers.windows(2).any(|pair| pair[1] - pair[0] != 1) {
            return Err(BookingRejection::new(
                RejectionReason::NotContiguous,
                "Seats must be contiguous",
            ));
        }

        Ok(())
    }

    // Шаги 4-5. `free` передаётся снаружи, чтобы не пересчитывать его для
    // каждого окна при построении списка доступных мест.
    fn admission(&self, seats: &[SeatId], free: usize) -> Result<Admission, FragmentationReport> {
        if seats.len() == 1 {
            return Ok(Admission::SingleSeat);
        }

        let report = fragmentation::would_isolate(&self.hall, seats);
        if !report.would_fragment() {
            Ok(Admission::Standard)
        } else if is_last_resort(free, seats.len()) {
            Ok(Admission::LastResort)
        } else {
            Err(report)
        }
    }

    // Шаг 6.
    fn commit(&mut self, seats: Vec<SeatId>, admission: Admission, customer_name: &str) -> BookingConfirmation {
        let fragmentation_before = fragmentation::fragmentation_percent(&self.hall);
        let booking_id = BookingId::new();

        for id in &seats {
            match self.hall.seat_mut(*id) {
                Some(seat) => seat.book(booking_id),
                None => unreachable!("seat {} passed validation but is outside the hall", id),
            }
        }

        let fragmentation_after = fragmentation::fragmentation_percent(&self.hall);
        let message = format!("Booking confirmed! {} seat(s) reserved", seats.len());

        info!(
            admission = ?admission,
            "Booking {} confirmed for {}: {} seat(s), fragmentation {:.1}% -> {:.1}%",
            booking_id,
            customer_name,
            seats.len(),
            fragmentation_before,
            fragmentation_after
        );

        self.ledger.record(Booking {
            id: booking_id,
            seats: seats.clone(),
            customer_name: customer_name.to_string(),
            created_at: Utc::now(),
        });

        BookingConfirmation {
            booking_id,
            seats,
            admission,
            fragmentation_before,
            fragmentation_after,
            message,
        }
    }

    /// Все места, которые могут войти хотя бы в один допустимый блок из
    /// `party_size` мест. Использует то же правило допуска, что и
    /// `book_seats`, поэтому подсветка мест не расходится с реальной бронью.
    pub fn available_seats(&self, party_size: usize) -> Vec<SeatId> {
        if party_size == 0 || party_size > self.hall.seats_per_row() {
            return Vec::new();
        }

        let free = self.hall.count_free();
        let mut bookable = BTreeSet::new();

        for row in 0..self.hall.rows() {
            let Some(seats) = self.hall.row(row) else {
                continue;
            };
            for window in seats.windows(party_size) {
                if window.iter().any(|seat| seat.is_occupied()) {
                    continue;
                }
                let candidate: Vec<SeatId> = window.iter().map(|seat| seat.id).collect();
                if self.admission(&candidate, free).is_ok() {
                    bookable.extend(candidate);
                }
            }
        }

        bookable.into_iter().collect()
    }

    pub fn fragmentation(&self) -> f64 {
        fragmentation::fragmentation_percent(&self.hall)
    }

    pub fn statistics(&self) -> Statistics {
        Statistics::collect(&self.hall, &self.ledger)
    }

    /// Освобождает все места, очищает журнал и обнуляет счётчики.
    pub fn reset(&mut self) {
        let bookings = self.ledger.len();
        let occupied = self.hall.count_occupied();

        self.hall.release_all();
        self.ledger.clear();

        warn!("RESET: released {} seats, dropped {} bookings", occupied, bookings);
    }
}
