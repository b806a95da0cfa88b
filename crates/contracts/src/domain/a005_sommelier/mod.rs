pub mod dto;

pub use dto::{SommelierRecommendationDto, SommelierRequest};
