pub mod booking_status;
pub mod event_category;
pub mod price_range;
pub mod stock_status;
pub mod wine_flavor;
pub mod wine_type;

pub use booking_status::BookingStatus;
pub use event_category::EventCategory;
pub use price_range::PriceRange;
pub use stock_status::StockStatus;
pub use wine_flavor::WineFlavor;
pub use wine_type::WineType;
