use serde::{Deserialize, Serialize};

use crate::enums::StockStatus;

/// Запрос расчета корзины
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartCalculationRequest {
    pub items: Vec<CartLineDto>,
}

/// Строка корзины (request-scoped, не персистится).
/// Отсутствующий productId не прерывает расчет, но сбрасывает
/// флаг allAvailable всего ответа.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineDto {
    #[serde(rename = "productId")]
    pub product_id: Option<String>,
    pub quantity: u32,
}

/// Детальная информация по строке корзины в ответе
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineDetailDto {
    #[serde(rename = "productId")]
    pub product_id: String,
    pub name: String,
    #[serde(rename = "unitPrice")]
    pub unit_price: f64,
    pub quantity: u32,
    pub subtotal: f64,
    #[serde(rename = "stockStatus")]
    pub stock_status: StockStatus,
    pub available: bool,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

/// Результат расчета корзины
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartCalculationDto {
    #[serde(rename = "totalAmount")]
    pub total_amount: f64,
    pub items: Vec<CartLineDetailDto>,
    #[serde(rename = "allAvailable")]
    pub all_available: bool,
}
