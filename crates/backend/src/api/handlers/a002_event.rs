use axum::extract::Path;
use axum::Json;
use contracts::domain::a002_event::Event;

use crate::domain::a002_event;
use crate::shared::error::AppError;

/// Мероприятие с производным признаком заполненности
#[derive(Debug, Clone, serde::Serialize)]
pub struct EventResponse {
    #[serde(flatten)]
    pub event: Event,
    #[serde(rename = "isFull")]
    pub is_full: bool,
    #[serde(rename = "spotsLeft")]
    pub spots_left: i32,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        let is_full = event.is_full();
        let spots_left = event.spots_left();
        Self {
            event,
            is_full,
            spots_left,
        }
    }
}

/// GET /api/events — предстоящие мероприятия
pub async fn list_upcoming() -> Result<Json<Vec<EventResponse>>, AppError> {
    let events = a002_event::service::upcoming().await?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

/// GET /api/events/:slug
pub async fn get_by_slug(Path(slug): Path<String>) -> Result<Json<EventResponse>, AppError> {
    let event = a002_event::service::get_by_slug(&slug).await?;
    Ok(Json(event.into()))
}

/// POST /api/events/testdata
pub async fn insert_test_data() -> Result<(), AppError> {
    a002_event::service::insert_test_data().await
}
