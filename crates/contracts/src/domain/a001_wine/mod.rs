pub mod aggregate;

pub use aggregate::{Wine, WineDto, WineId};
