use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

use crate::error::BookingError;
use crate::models::seat::SeatId;

/// Идентификатор успешной брони (случайный UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(Uuid);

impl BookingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for BookingId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Входящий запрос на бронирование. Имя клиента только для отображения.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub seat_ids: Vec<String>,
    #[serde(default = "default_customer_name")]
    pub customer_name: String,
}

fn default_customer_name() -> String {
    "Guest".to_string()
}

impl BookingRequest {
    pub fn new<I, S>(seat_ids: I, customer_name: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            seat_ids: seat_ids.into_iter().map(Into::into).collect(),
            customer_name: customer_name.into(),
        }
    }

    /// Разбирает идентификаторы мест, убирая повторы (первое вхождение
    /// сохраняет свою позицию).
    ///
    /// Бронь всегда лежит в одном ряду, поэтому больше `max_seats` различных
    /// мест (ширина ряда) не бывает: разбор останавливается сразу, как только
    /// предел превышен. Вызывается до захвата блокировки зала.
    pub fn parse_seat_ids(&self, max_seats: usize) -> Result<Vec<SeatId>, BookingError> {
        let mut seen: HashSet<SeatId> = HashSet::new();
        let mut seats: Vec<SeatId> = Vec::new();
        for raw in &self.seat_ids {
            let id: SeatId = raw.parse()?;
            if seen.insert(id) {
                if seats.len() == max_seats {
                    return Err(BookingError::TooManySeats { max: max_seats });
                }
                seats.push(id);
            }
        }

        if seats.is_empty() {
            return Err(BookingError::EmptyRequest);
        }
        Ok(seats)
    }
}

/// Запись журнала о подтверждённой брони.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub seats: Vec<SeatId>,
    pub customer_name: String,
    pub created_at: DateTime<Utc>,
}

/// Причина отказа. Закрытый набор, отдаётся клиенту как есть.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionReason {
    SeatUnavailable,
    DifferentRows,
    NotContiguous,
    FragmentationPrevention,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::SeatUnavailable => "SEAT_UNAVAILABLE",
            RejectionReason::DifferentRows => "DIFFERENT_ROWS",
            RejectionReason::NotContiguous => "NOT_CONTIGUOUS",
            RejectionReason::FragmentationPrevention => "FRAGMENTATION_PREVENTION",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// По какому правилу бронь была допущена.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Admission {
    /// Бронь не оставляет изолированных мест.
    Standard,
    /// Одно место можно занять где угодно.
    SingleSeat,
    /// Бронь фрагментирует зал, но свободных мест почти не осталось.
    LastResort,
}

/// Альтернативный блок мест в том же ряду.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub row: usize,
    pub start: usize,
    pub size: usize,
}

impl Suggestion {
    pub fn seat_ids(&self) -> impl Iterator<Item = SeatId> + '_ {
        (self.start..self.start + self.size).map(|n| SeatId::new(self.row, n))
    }
}

impl fmt::Display for Suggestion {
    // Для людей ряды и места нумеруются с единицы
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Row {}, seats {}-{}",
            self.row + 1,
            self.start + 1,
            self.start + self.size
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingConfirmation {
    pub booking_id: BookingId,
    pub seats: Vec<SeatId>,
    pub admission: Admission,
    pub fragmentation_before: f64,
    pub fragmentation_after: f64,
    pub message: String,
}

impl BookingConfirmation {
    pub fn seats_reserved(&self) -> usize {
        self.seats.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingRejection {
    pub reason: RejectionReason,
    pub message: String,
    pub isolated_seats: Vec<SeatId>,
    pub suggestions: Vec<Suggestion>,
}

impl BookingRejection {
    pub(crate) fn new(reason: RejectionReason, message: impl Into<String>) -> Self {
        Self {
            reason,
            message: message.into(),
            isolated_seats: Vec::new(),
            suggestions: Vec::new(),
        }
    }
}

/// Итог одного вызова `book_seats`.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingOutcome {
    Confirmed(BookingConfirmation),
    Rejected(BookingRejection),
}

impl BookingOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, BookingOutcome::Confirmed(_))
    }

    pub fn confirmation(&self) -> Option<&BookingConfirmation> {
        match self {
            BookingOutcome::Confirmed(c) => Some(c),
            BookingOutcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&BookingRejection> {
        match self {
            BookingOutcome::Rejected(r) => Some(r),
            BookingOutcome::Confirmed(_) => None,
        }
    }
}
