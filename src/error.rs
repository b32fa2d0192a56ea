use thiserror::Error;

/// Ошибки входных данных и конструирования зала.
///
/// Бизнес-отказы (занятое место, разные ряды, фрагментация) сюда не входят:
/// они возвращаются как обычный результат `BookingOutcome::Rejected`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("invalid seat id '{0}', expected format '<row>-<number>'")]
    InvalidSeatId(String),

    #[error("booking request contains no seats")]
    EmptyRequest,

    #[error("booking request names more than {max} distinct seats, a row holds only {max}")]
    TooManySeats { max: usize },

    #[error("hall must have at least one row and one seat per row (got {rows}x{seats_per_row})")]
    InvalidHallDimensions { rows: usize, seats_per_row: usize },
}

impl BookingError {
    /// Машиночитаемый код для транспортного слоя.
    pub fn code(&self) -> &'static str {
        match self {
            BookingError::InvalidSeatId(_) => "INVALID_SEAT_ID",
            BookingError::EmptyRequest => "EMPTY_REQUEST",
            BookingError::TooManySeats { .. } => "TOO_MANY_SEATS",
            BookingError::InvalidHallDimensions { .. } => "INVALID_HALL_DIMENSIONS",
        }
    }
}

/// Ошибка чтения конфигурации из окружения.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{key} has invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}
