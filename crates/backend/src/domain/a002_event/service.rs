use chrono::Utc;
use contracts::domain::a002_event::{Event, EventDto};

use super::repository;
use crate::shared::error::AppError;

/// Предстоящие мероприятия (с сегодняшнего дня, по возрастанию даты)
pub async fn upcoming() -> Result<Vec<Event>, AppError> {
    tracing::info!("Fetching upcoming events");
    let today = Utc::now().date_naive();
    repository::list_upcoming(today).await.map_err(Into::into)
}

/// Получение мероприятия по slug
pub async fn get_by_slug(slug: &str) -> Result<Event, AppError> {
    tracing::info!("Fetching event by slug: {}", slug);
    repository::get_by_slug(slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event not found: {}", slug)))
}

/// Создание нового мероприятия
pub async fn create(dto: EventDto) -> Result<Event, AppError> {
    let mut aggregate = Event::new_for_insert(dto);

    aggregate.validate().map_err(AppError::Validation)?;
    aggregate.before_write();

    repository::insert(&aggregate).await?;
    Ok(aggregate)
}

/// Вставка тестовых данных
pub async fn insert_test_data() -> Result<(), AppError> {
    let today = Utc::now().date_naive();
    let data = vec![
        EventDto {
            id: None,
            title: "Große Riesling-Probe".into(),
            slug: "grosse-riesling-probe".into(),
            description: Some("Verkostung der besten Rieslinge Deutschlands.".into()),
            date: today + chrono::Duration::days(14),
            time: Some("19:00".into()),
            location: Some("Vinothek am Markt".into()),
            price_per_person: 35.0,
            total_spots: 24,
            category: Some("TASTING".into()),
            image_url: None,
        },
        EventDto {
            id: None,
            title: "Afterwork Wein & Käse".into(),
            slug: "afterwork-wein-und-kaese".into(),
            description: Some("Entspannter Ausklang mit offenen Weinen.".into()),
            date: today + chrono::Duration::days(7),
            time: Some("18:00".into()),
            location: Some("Weinbar Süd".into()),
            price_per_person: 19.5,
            total_spots: 40,
            category: Some("AFTERWORK".into()),
            image_url: None,
        },
    ];

    for dto in data {
        create(dto).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db;
    use chrono::NaiveDate;

    fn dto(slug: &str, date: NaiveDate, total_spots: i32) -> EventDto {
        EventDto {
            id: None,
            title: format!("Event {}", slug),
            slug: slug.to_string(),
            description: None,
            date,
            time: None,
            location: None,
            price_per_person: 30.0,
            total_spots,
            category: Some("TASTING".into()),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_upcoming_is_sorted_and_excludes_past_events() {
        db::ensure_test_database().await;

        let today = Utc::now().date_naive();
        create(dto("evt-past", today - chrono::Duration::days(3), 10))
            .await
            .unwrap();
        create(dto("evt-in-two-weeks", today + chrono::Duration::days(14), 10))
            .await
            .unwrap();
        create(dto("evt-tomorrow", today + chrono::Duration::days(1), 10))
            .await
            .unwrap();

        let events = upcoming().await.unwrap();
        let slugs: Vec<&str> = events.iter().map(|e| e.slug.as_str()).collect();

        assert!(!slugs.contains(&"evt-past"));
        let tomorrow_pos = slugs.iter().position(|s| *s == "evt-tomorrow").unwrap();
        let later_pos = slugs.iter().position(|s| *s == "evt-in-two-weeks").unwrap();
        assert!(tomorrow_pos < later_pos);
    }

    #[tokio::test]
    async fn test_get_by_slug_miss_is_not_found() {
        db::ensure_test_database().await;

        let err = get_by_slug("kein-solches-event").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
