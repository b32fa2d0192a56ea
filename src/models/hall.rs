use serde::Serialize;

use crate::error::BookingError;
use crate::models::seat::{Seat, SeatId};

/// Зал фиксированного размера `rows x seats_per_row`.
///
/// Места хранятся плотным массивом по рядам. Размеры задаются один раз при
/// создании и больше не меняются, меняется только занятость мест.
#[derive(Debug, Clone)]
pub struct CinemaHall {
    rows: usize,
    seats_per_row: usize,
    seats: Vec<Seat>,
}

impl CinemaHall {
    pub fn new(rows: usize, seats_per_row: usize) -> Result<Self, BookingError> {
        if rows == 0 || seats_per_row == 0 {
            return Err(BookingError::InvalidHallDimensions { rows, seats_per_row });
        }

        let seats = (0..rows)
            .flat_map(|r| (0..seats_per_row).map(move |s| Seat::new(r, s)))
            .collect();

        Ok(Self { rows, seats_per_row, seats })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn seats_per_row(&self) -> usize {
        self.seats_per_row
    }

    pub fn total_seats(&self) -> usize {
        self.seats.len()
    }

    fn index(&self, row: usize, number: usize) -> Option<usize> {
        (row < self.rows && number < self.seats_per_row).then(|| row * self.seats_per_row + number)
    }

    /// Место по координатам; `None` за пределами зала.
    pub fn seat(&self, row: usize, number: usize) -> Option<&Seat> {
        self.index(row, number).map(|i| &self.seats[i])
    }

    pub fn seat_by_id(&self, id: SeatId) -> Option<&Seat> {
        self.seat(id.row, id.number)
    }

    pub(crate) fn seat_mut(&mut self, id: SeatId) -> Option<&mut Seat> {
        let i = self.index(id.row, id.number)?;
        Some(&mut self.seats[i])
    }

    pub fn row(&self, row: usize) -> Option<&[Seat]> {
        (row < self.rows).then(|| {
            let start = row * self.seats_per_row;
            &self.seats[start..start + self.seats_per_row]
        })
    }

    /// Все места по рядам, слева направо.
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter()
    }

    pub fn count_free(&self) -> usize {
        self.seats.iter().filter(|s| !s.is_occupied()).count()
    }

    pub fn count_occupied(&self) -> usize {
        self.total_seats() - self.count_free()
    }

    pub(crate) fn release_all(&mut self) {
        self.seats.iter_mut().for_each(Seat::release);
    }

    /// Снимок занятости для отрисовки схемы зала.
    pub fn layout(&self) -> HallLayout {
        let rows = self
            .seats
            .chunks(self.seats_per_row)
            .map(|row| row.iter().map(SeatView::from).collect())
            .collect();

        HallLayout {
            row_count: self.rows,
            seats_per_row: self.seats_per_row,
            rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HallLayout {
    pub row_count: usize,
    pub seats_per_row: usize,
    pub rows: Vec<Vec<SeatView>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatView {
    pub id: SeatId,
    pub row: usize,
    pub number: usize,
    pub occupied: bool,
}

impl From<&Seat> for SeatView {
    fn from(seat: &Seat) -> Self {
        Self {
            id: seat.id,
            row: seat.id.row,
            number: seat.id.number,
            occupied: seat.is_occupied(),
        }
    }
}
