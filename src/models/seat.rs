use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BookingError;
use crate::models::booking::BookingId;

/// Координата места в зале: ряд и номер, оба с нуля.
///
/// Каноническая строковая форма `"{row}-{number}"`, в ней же место
/// сериализуется в JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SeatId {
    pub row: usize,
    pub number: usize,
}

impl SeatId {
    pub const fn new(row: usize, number: usize) -> Self {
        Self { row, number }
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.number)
    }
}

impl FromStr for SeatId {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BookingError::InvalidSeatId(s.to_string());

        let (row, number) = s.trim().split_once('-').ok_or_else(invalid)?;
        // `usize::from_str` принимает ведущий '+', нам нужны только цифры
        let is_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(row) || !is_digits(number) {
            return Err(invalid());
        }

        // после проверки на цифры `parse` падает только на переполнении;
        // такая координата заведомо за пределами зала
        let coordinate = |part: &str| part.parse().unwrap_or(usize::MAX);
        Ok(SeatId {
            row: coordinate(row),
            number: coordinate(number),
        })
    }
}

impl From<SeatId> for String {
    fn from(id: SeatId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for SeatId {
    type Error = BookingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatState {
    Free,
    Occupied(BookingId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub id: SeatId,
    pub state: SeatState,
}

impl Seat {
    pub fn new(row: usize, number: usize) -> Self {
        Self {
            id: SeatId::new(row, number),
            state: SeatState::Free,
        }
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self.state, SeatState::Occupied(_))
    }

    pub fn booking_id(&self) -> Option<BookingId> {
        match self.state {
            SeatState::Occupied(id) => Some(id),
            SeatState::Free => None,
        }
    }

    pub(crate) fn book(&mut self, booking_id: BookingId) {
        self.state = SeatState::Occupied(booking_id);
    }

    pub(crate) fn release(&mut self) {
        self.state = SeatState::Free;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_form() {
        assert_eq!("3-11".parse::<SeatId>(), Ok(SeatId::new(3, 11)));
        assert_eq!("0-007".parse::<SeatId>(), Ok(SeatId::new(0, 7)));
        assert_eq!(SeatId::new(2, 5).to_string(), "2-5");
    }

    #[test]
    fn rejects_malformed_ids() {
        for raw in ["", "1", "a-1", "1-b", "1-2-3", "-1-2", "+1-2", "1--2", "invalid-seat-id"] {
            assert_eq!(
                raw.parse::<SeatId>(),
                Err(BookingError::InvalidSeatId(raw.to_string())),
                "{raw} should not parse"
            );
        }
    }

    #[test]
    fn overflowing_digits_are_out_of_any_hall() {
        let id: SeatId = "99999999999999999999999-0".parse().unwrap();
        assert_eq!(id, SeatId::new(usize::MAX, 0));
        assert_eq!("1-184467440737095516150".parse::<SeatId>(), Ok(SeatId::new(1, usize::MAX)));
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&SeatId::new(4, 2)).unwrap();
        assert_eq!(json, "\"4-2\"");
        let back: SeatId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SeatId::new(4, 2));
    }

    #[test]
    fn book_and_release_flip_state() {
        let mut seat = Seat::new(0, 0);
        let id = BookingId::new();
        seat.book(id);
        assert!(seat.is_occupied());
        assert_eq!(seat.booking_id(), Some(id));
        seat.release();
        assert_eq!(seat.state, SeatState::Free);
    }
}
