use axum::extract::Query;
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a003_booking::{Booking, BookingRequest};
use serde::Deserialize;

use crate::domain::a003_booking;
use crate::shared::error::AppError;

/// POST /api/bookings — захват мест и подтверждение бронирования.
/// 409 — мест не хватает, 404 — мероприятие не существует.
pub async fn create(
    Json(request): Json<BookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let booking = a003_booking::service::reserve(request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

#[derive(Debug, Deserialize)]
pub struct BookingsByEmailQuery {
    pub email: String,
}

/// GET /api/bookings/by-email?email=...
pub async fn list_by_email(
    Query(query): Query<BookingsByEmailQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(
        a003_booking::service::list_by_email(&query.email).await?,
    ))
}
