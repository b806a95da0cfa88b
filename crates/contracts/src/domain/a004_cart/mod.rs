pub mod dto;

pub use dto::{CartCalculationDto, CartCalculationRequest, CartLineDetailDto, CartLineDto};
