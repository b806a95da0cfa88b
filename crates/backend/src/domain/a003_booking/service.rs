use contracts::domain::a003_booking::{Booking, BookingRequest};
use sea_orm::TransactionTrait;
use uuid::Uuid;

use super::repository;
use crate::domain::a002_event;
use crate::shared::data::db::get_connection;
use crate::shared::error::AppError;

/// Захват мест и создание бронирования.
///
/// Инкремент счетчика и вставка бронирования выполняются в одной
/// транзакции: условный UPDATE либо захватывает места целиком, либо не
/// трогает ничего, а неудачная вставка откатывает и инкремент.
///
/// Повторная отправка того же запроса создаст второе бронирование —
/// дедупликация по ключу запроса остается за HTTP-слоем.
pub async fn reserve(request: BookingRequest) -> Result<Booking, AppError> {
    request.validate().map_err(AppError::Validation)?;

    let event_id = Uuid::parse_str(&request.event_id)
        .map_err(|_| AppError::Validation(format!("Invalid event id: {}", request.event_id)))?;

    tracing::info!(
        "Creating booking for event {} for {} guests",
        event_id,
        request.guests
    );

    let db = get_connection();
    let txn = db.begin().await?;

    let updated_rows =
        a002_event::repository::increment_booked_spots_txn(&txn, event_id, request.guests).await?;

    if updated_rows == 0 {
        txn.rollback().await?;

        // Ноль строк означает либо нехватку мест, либо отсутствие
        // мероприятия; клиент обязан уметь их различить
        return match a002_event::repository::get_by_id(event_id).await? {
            Some(_) => {
                tracing::warn!(
                    "Failed to create booking - not enough spots for event {}",
                    event_id
                );
                Err(AppError::Conflict("Not enough spots available".into()))
            }
            None => Err(AppError::NotFound(format!("Event not found: {}", event_id))),
        };
    }

    let event = a002_event::repository::get_by_id_txn(&txn, event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event not found: {}", event_id)))?;

    let total_price = event.price_for(request.guests);
    let booking = Booking::new_confirmed(event.id, &request, total_price);

    repository::insert_txn(&txn, &booking).await?;
    txn.commit().await?;

    tracing::info!(
        "Booking {} confirmed: {} guests, total {:.2}",
        booking.id.value(),
        booking.guests_count,
        booking.total_price
    );
    Ok(booking)
}

/// Бронирования клиента по email
pub async fn list_by_email(email: &str) -> Result<Vec<Booking>, AppError> {
    repository::list_by_email(email).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_event::service as event_service;
    use crate::shared::data::db;
    use chrono::Utc;
    use contracts::domain::a002_event::{Event, EventDto};
    use contracts::enums::BookingStatus;

    async fn seeded_event(slug: &str, total_spots: i32, price: f64) -> Event {
        event_service::create(EventDto {
            id: None,
            title: format!("Probe {}", slug),
            slug: slug.to_string(),
            description: None,
            date: Utc::now().date_naive() + chrono::Duration::days(10),
            time: Some("19:00".into()),
            location: None,
            price_per_person: price,
            total_spots,
            category: Some("TASTING".into()),
            image_url: None,
        })
        .await
        .unwrap()
    }

    fn booking_request(event: &Event, guests: u32) -> BookingRequest {
        BookingRequest {
            event_id: event.id.value().to_string(),
            name: "Anna Keller".into(),
            email: "anna@example.com".into(),
            phone: Some("+49 170 1234567".into()),
            guests,
        }
    }

    #[tokio::test]
    async fn test_reserve_confirms_booking_and_prices_it() {
        db::ensure_test_database().await;
        let event = seeded_event("bkg-basic", 10, 35.0).await;

        let booking = reserve(booking_request(&event, 3)).await.unwrap();

        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.guests_count, 3);
        assert_eq!(booking.total_price, 105.0);
        assert_eq!(booking.event_ref, event.id);

        let stored = a002_event::repository::get_by_id(event.id.value())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.booked_spots, 3);
    }

    #[tokio::test]
    async fn test_concurrent_reservations_never_overbook() {
        db::ensure_test_database().await;
        let event = seeded_event("bkg-race", 5, 30.0).await;

        // 4 из 5 мест уже заняты
        reserve(booking_request(&event, 4)).await.unwrap();

        // Конкурентные заявки на 1 и 2 гостей: пройти может только
        // однoместная (4+1=5), двухместная обязана получить Conflict
        let one_guest = reserve(booking_request(&event, 1));
        let two_guests = reserve(booking_request(&event, 2));
        let (first, second) = tokio::join!(one_guest, two_guests);

        assert!(first.is_ok(), "1-guest reservation must fit the last seat");
        assert!(matches!(second.unwrap_err(), AppError::Conflict(_)));

        let stored = a002_event::repository::get_by_id(event.id.value())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.booked_spots, 5);
        assert!(stored.is_full());
    }

    #[tokio::test]
    async fn test_sold_out_is_conflict_but_missing_event_is_not_found() {
        db::ensure_test_database().await;
        let event = seeded_event("bkg-soldout", 2, 25.0).await;

        reserve(booking_request(&event, 2)).await.unwrap();

        let err = reserve(booking_request(&event, 1)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let ghost = BookingRequest {
            event_id: Uuid::new_v4().to_string(),
            name: "Max Weber".into(),
            email: "max@example.com".into(),
            phone: None,
            guests: 1,
        };
        let err = reserve(ghost).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_invalid_request_is_rejected_before_touching_storage() {
        db::ensure_test_database().await;

        let bad_id = BookingRequest {
            event_id: "not-a-uuid".into(),
            name: "Anna".into(),
            email: "anna@example.com".into(),
            phone: None,
            guests: 1,
        };
        assert!(matches!(
            reserve(bad_id).await.unwrap_err(),
            AppError::Validation(_)
        ));

        let zero_guests = BookingRequest {
            event_id: Uuid::new_v4().to_string(),
            name: "Anna".into(),
            email: "anna@example.com".into(),
            phone: None,
            guests: 0,
        };
        assert!(matches!(
            reserve(zero_guests).await.unwrap_err(),
            AppError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn test_bookings_are_listed_by_customer_email() {
        db::ensure_test_database().await;
        let event = seeded_event("bkg-email", 10, 20.0).await;

        let mut request = booking_request(&event, 1);
        request.email = "lena@example.com".into();
        reserve(request.clone()).await.unwrap();
        reserve(request).await.unwrap();

        let bookings = list_by_email("lena@example.com").await.unwrap();
        assert_eq!(bookings.len(), 2);
        assert!(bookings.iter().all(|b| b.event_ref == event.id));
    }
}
