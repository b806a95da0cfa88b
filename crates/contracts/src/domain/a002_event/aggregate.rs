use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{AggregateId, EntityMetadata};
use crate::enums::EventCategory;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор мероприятия
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
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

impl AggregateId for EventId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(EventId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Мероприятие (дегустация, фестиваль) с ограниченным числом мест.
///
/// Инвариант: booked_spots <= total_spots в любой момент времени.
/// Счетчик booked_spots меняется только условным UPDATE на уровне
/// хранилища, никогда чтением-записью в приложении.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,

    pub title: String,

    /// URL-дружественный уникальный идентификатор
    pub slug: String,

    pub description: Option<String>,

    pub date: NaiveDate,

    /// Время начала в свободном формате ("18:30")
    pub time: Option<String>,

    pub location: Option<String>,

    #[serde(rename = "pricePerPerson")]
    pub price_per_person: f64,

    #[serde(rename = "totalSpots")]
    pub total_spots: i32,

    #[serde(rename = "bookedSpots")]
    pub booked_spots: i32,

    pub category: EventCategory,

    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,

    pub metadata: EntityMetadata,
}

impl Event {
    /// Создать новое мероприятие для вставки в БД
    pub fn new_for_insert(dto: EventDto) -> Self {
        Self {
            id: EventId::new_v4(),
            title: dto.title,
            slug: dto.slug,
            description: dto.description,
            date: dto.date,
            time: dto.time,
            location: dto.location,
            price_per_person: dto.price_per_person,
            total_spots: dto.total_spots,
            booked_spots: 0,
            category: dto
                .category
                .as_deref()
                .map(EventCategory::from_code)
                .unwrap_or(EventCategory::Other),
            image_url: dto.image_url,
            metadata: EntityMetadata::new(),
        }
    }

    /// Производный признак "мест нет"
    pub fn is_full(&self) -> bool {
        self.booked_spots >= self.total_spots
    }

    /// Сколько мест еще свободно
    pub fn spots_left(&self) -> i32 {
        (self.total_spots - self.booked_spots).max(0)
    }

    /// Итоговая цена бронирования на указанное число гостей
    pub fn price_for(&self, guests: u32) -> f64 {
        self.price_per_person * guests as f64
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Заголовок не может быть пустым".into());
        }
        if self.slug.trim().is_empty() {
            return Err("Slug не может быть пустым".into());
        }
        if self.total_spots <= 0 {
            return Err("Число мест должно быть положительным".into());
        }
        if self.price_per_person < 0.0 {
            return Err("Цена за гостя не может быть отрицательной".into());
        }
        if self.booked_spots < 0 || self.booked_spots > self.total_spots {
            return Err("Занятые места вне диапазона 0..=total_spots".into());
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.metadata.touch();
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания мероприятия. Категория приходит строкой и сводится
/// к EventCategory::Other, если код не распознан.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDto {
    pub id: Option<String>,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "pricePerPerson")]
    pub price_per_person: f64,
    #[serde(rename = "totalSpots")]
    pub total_spots: i32,
    pub category: Option<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_dto(total: i32) -> EventDto {
        EventDto {
            id: None,
            title: "Riesling-Probe".into(),
            slug: "riesling-probe".into(),
            description: None,
            date: NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(),
            time: Some("19:00".into()),
            location: Some("Vinothek".into()),
            price_per_person: 35.0,
            total_spots: total,
            category: Some("TASTING".into()),
            image_url: None,
        }
    }

    #[test]
    fn test_is_full_is_derived_from_counters() {
        let mut event = Event::new_for_insert(event_dto(5));
        assert!(!event.is_full());
        assert_eq!(event.spots_left(), 5);

        event.booked_spots = 5;
        assert!(event.is_full());
        assert_eq!(event.spots_left(), 0);
    }

    #[test]
    fn test_price_for_guests() {
        let event = Event::new_for_insert(event_dto(10));
        assert_eq!(event.price_for(3), 105.0);
    }

    #[test]
    fn test_unknown_category_becomes_other() {
        let mut dto = event_dto(5);
        dto.category = Some("MOONLIGHT".into());
        assert_eq!(Event::new_for_insert(dto).category, EventCategory::Other);
    }
}
