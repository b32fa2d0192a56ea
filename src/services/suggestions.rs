use crate::models::{CinemaHall, SeatId, Suggestion};
use crate::services::fragmentation;

pub const MAX_SUGGESTIONS: usize = 3;

/// Ищет в ряду первого запрошенного места свободные блоки того же размера,
/// которые не оставляют изолированных мест. Не больше `MAX_SUGGESTIONS`.
pub fn suggest_alternatives(hall: &CinemaHall, requested: &[SeatId]) -> Vec<Suggestion> {
    let Some(first) = requested.first() else {
        return Vec::new();
    };
    let size = requested.len();
    let Some(seats) = hall.row(first.row) else {
        return Vec::new();
    };
    if size > seats.len() {
        return Vec::new();
    }

    let mut suggestions = Vec::new();
    for (start, window) in seats.windows(size).enumerate() {
        if window.iter().any(|seat| seat.is_occupied()) {
            continue;
        }

        let candidate: Vec<SeatId> = window.iter().map(|seat| seat.id).collect();
        if !fragmentation::would_isolate(hall, &candidate).would_fragment() {
            suggestions.push(Suggestion { row: first.row, start, size });
            if suggestions.len() >= MAX_SUGGESTIONS {
                break;
            }
        }
    }

    suggestions
}
