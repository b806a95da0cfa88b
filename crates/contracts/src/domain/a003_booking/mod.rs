pub mod aggregate;

pub use aggregate::{Booking, BookingId, BookingRequest};
