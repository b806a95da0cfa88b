use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::a002_event::EventId;
use crate::domain::common::AggregateId;
use crate::enums::BookingStatus;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор бронирования
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(pub Uuid);

impl BookingId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for BookingId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(BookingId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Бронирование мест на мероприятие.
///
/// Создается только как результат успешного захвата мест аллокатором;
/// после создания емкость мероприятия не трогает.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,

    /// Мероприятие-владелец (many bookings per event)
    #[serde(rename = "eventRef")]
    pub event_ref: EventId,

    #[serde(rename = "customerName")]
    pub customer_name: String,

    #[serde(rename = "customerEmail")]
    pub customer_email: String,

    #[serde(rename = "customerPhone")]
    pub customer_phone: Option<String>,

    #[serde(rename = "guestsCount")]
    pub guests_count: i32,

    /// guests × price_per_person, фиксируется в момент создания
    #[serde(rename = "totalPrice")]
    pub total_price: f64,

    pub status: BookingStatus,

    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Booking {
    /// Создать подтвержденное бронирование после успешного захвата мест
    pub fn new_confirmed(event_ref: EventId, request: &BookingRequest, total_price: f64) -> Self {
        Self {
            id: BookingId::new_v4(),
            event_ref,
            customer_name: request.name.clone(),
            customer_email: request.email.clone(),
            customer_phone: request.phone.clone(),
            guests_count: request.guests as i32,
            total_price,
            status: BookingStatus::Confirmed,
            created_at: chrono::Utc::now(),
        }
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Запрос на бронирование. Границы (guests >= 1, непустые имя/email)
/// проверяются валидацией на границе HTTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    #[serde(rename = "eventId")]
    pub event_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub guests: u32,
}

impl BookingRequest {
    /// Валидация полей запроса
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Имя гостя не может быть пустым".into());
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err("Некорректный email".into());
        }
        if self.guests == 0 {
            return Err("Число гостей должно быть положительным".into());
        }
        Ok(())
    }
}
