use serde::{Deserialize, Serialize};

/// Статус наличия товара на складе
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    InStock,
    OutOfStock,
    OnDemand,
}

impl StockStatus {
    /// Получить код статуса
    pub fn code(&self) -> &'static str {
        match self {
            StockStatus::InStock => "IN_STOCK",
            StockStatus::OutOfStock => "OUT_OF_STOCK",
            StockStatus::OnDemand => "ON_DEMAND",
        }
    }

    /// Парсинг из строки; неизвестный код трактуется как отсутствие на складе
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "IN_STOCK" => StockStatus::InStock,
            "ON_DEMAND" => StockStatus::OnDemand,
            _ => StockStatus::OutOfStock,
        }
    }
}

impl ToString for StockStatus {
    fn to_string(&self) -> String {
        self.code().to_string()
    }
}
