pub mod seat;
pub mod hall;
pub mod booking;

pub use seat::{Seat, SeatId, SeatState};
pub use hall::{CinemaHall, HallLayout, SeatView};
pub use booking::{
    Admission, Booking, BookingConfirmation, BookingId, BookingOutcome, BookingRejection,
    BookingRequest, RejectionReason, Suggestion,
};
