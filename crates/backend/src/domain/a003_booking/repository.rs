use chrono::Utc;
use contracts::domain::a002_event::EventId;
use contracts::domain::a003_booking::{Booking, BookingId};
use contracts::enums::BookingStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_booking")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub event_ref: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub guests_count: i32,
    pub total_price: f64,
    pub status: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Booking {
    fn from(m: Model) -> Self {
        let id = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let event_ref = Uuid::parse_str(&m.event_ref).unwrap_or_else(|_| Uuid::new_v4());

        Booking {
            id: BookingId::new(id),
            event_ref: EventId::new(event_ref),
            customer_name: m.customer_name,
            customer_email: m.customer_email,
            customer_phone: m.customer_phone,
            guests_count: m.guests_count,
            total_price: m.total_price,
            status: BookingStatus::from_code(&m.status).unwrap_or(BookingStatus::Pending),
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

fn to_active_model(aggregate: &Booking) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.id.value().to_string()),
        event_ref: Set(aggregate.event_ref.value().to_string()),
        customer_name: Set(aggregate.customer_name.clone()),
        customer_email: Set(aggregate.customer_email.clone()),
        customer_phone: Set(aggregate.customer_phone.clone()),
        guests_count: Set(aggregate.guests_count),
        total_price: Set(aggregate.total_price),
        status: Set(aggregate.status.code().to_string()),
        created_at: Set(Some(aggregate.created_at)),
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Вставка бронирования в рамках транзакции захвата мест.
/// Откат транзакции откатывает и инкремент счетчика (all-or-nothing).
pub async fn insert_txn(txn: &DatabaseTransaction, aggregate: &Booking) -> anyhow::Result<Uuid> {
    let uuid = aggregate.id.value();
    to_active_model(aggregate).insert(txn).await?;
    Ok(uuid)
}

/// Бронирования клиента по email, новые сверху
pub async fn list_by_email(email: &str) -> anyhow::Result<Vec<Booking>> {
    let items: Vec<Booking> = Entity::find()
        .filter(Column::CustomerEmail.eq(email))
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}
