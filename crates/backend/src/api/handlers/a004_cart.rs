use axum::Json;
use contracts::domain::a004_cart::{CartCalculationDto, CartCalculationRequest};

use crate::domain::a004_cart;
use crate::shared::error::AppError;

/// POST /api/cart/calculate — расчет стоимости и доступности корзины
pub async fn calculate(
    Json(request): Json<CartCalculationRequest>,
) -> Result<Json<CartCalculationDto>, AppError> {
    Ok(Json(a004_cart::service::calculate(request).await?))
}
