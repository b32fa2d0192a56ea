//! fragmentation.rs
//!
//! Анализ фрагментации зала.
//!
//! Место считается изолированным, если оно свободно, а оба его соседа в ряду
//! заняты (край ряда считается занятым). Одиночное свободное место почти
//! невозможно продать, поэтому бронь, которая оставляет такие места,
//! по умолчанию отклоняется.

use std::collections::BTreeSet;

use crate::models::{CinemaHall, SeatId};

/// Результат проверки гипотетической брони.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentationReport {
    pub isolated_seats: Vec<SeatId>,
}

impl FragmentationReport {
    pub fn would_fragment(&self) -> bool {
        !self.isolated_seats.is_empty()
    }

    /// Сообщение для клиента; пустая строка, если фрагментации нет.
    pub fn message(&self) -> String {
        match self.isolated_seats.as_slice() {
            [] => String::new(),
            [single] => format!(
                "This booking would leave 1 isolated seat ({}). Please choose other seats.",
                single
            ),
            many => format!(
                "This booking would leave {} isolated seats ({}). Please choose other seats.",
                many.len(),
                join_ids(many)
            ),
        }
    }
}

pub(crate) fn join_ids(ids: &[SeatId]) -> String {
    ids.iter().map(SeatId::to_string).collect::<Vec<_>>().join(", ")
}

/// Какие свободные места станут изолированными, если занять `hypothetical`.
///
/// Просматриваются только затронутые ряды: бронь в одном ряду не может
/// изолировать место в другом.
pub fn would_isolate(hall: &CinemaHall, hypothetical: &[SeatId]) -> FragmentationReport {
    let taken: BTreeSet<SeatId> = hypothetical.iter().copied().collect();
    let rows: BTreeSet<usize> = taken.iter().map(|id| id.row).collect();

    let isolated_seats = rows
        .into_iter()
        .flat_map(|row| isolated_in_row(hall, row, &taken))
        .collect();

    FragmentationReport { isolated_seats }
}

/// Изолированные места в текущем состоянии зала.
pub fn isolated_seats(hall: &CinemaHall) -> Vec<SeatId> {
    let none = BTreeSet::new();
    (0..hall.rows())
        .flat_map(|row| isolated_in_row(hall, row, &none))
        .collect()
}

/// Фрагментация текущего состояния зала, в процентах.
pub fn fragmentation_percent(hall: &CinemaHall) -> f64 {
    percent(isolated_seats(hall).len(), hall.count_free())
}

/// Доля изолированных мест среди свободных, в процентах.
/// Если свободных мест нет, фрагментация равна нулю.
pub fn percent(isolated: usize, free: usize) -> f64 {
    if free == 0 {
        return 0.0;
    }
    isolated as f64 * 100.0 / free as f64
}

fn isolated_in_row(hall: &CinemaHall, row: usize, taken: &BTreeSet<SeatId>) -> Vec<SeatId> {
    let Some(seats) = hall.row(row) else {
        return Vec::new();
    };

    let blocked = |number: Option<usize>| match number {
        // край ряда
        None => true,
        Some(n) => match seats.get(n) {
            None => true,
            Some(seat) => seat.is_occupied() || taken.contains(&seat.id),
        },
    };

    seats
        .iter()
        .enumerate()
        .filter(|(_, seat)| !seat.is_occupied() && !taken.contains(&seat.id))
        .filter(|(n, _)| blocked(n.checked_sub(1)) && blocked(Some(n + 1)))
        .map(|(_, seat)| seat.id)
        .collect()
}
