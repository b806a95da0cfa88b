use chrono::Utc;
use contracts::domain::a002_event::{Event, EventId};
use contracts::domain::common::EntityMetadata;
use contracts::enums::EventCategory;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseTransaction, EntityTrait, QueryFilter,
    QueryOrder, Set, Statement,
};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_event")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub event_date: chrono::NaiveDate,
    pub event_time: Option<String>,
    pub location: Option<String>,
    pub price_per_person: f64,
    pub total_spots: i32,
    pub booked_spots: i32,
    pub category: String,
    pub image_url: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Event {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Event {
            id: EventId::new(uuid),
            title: m.title,
            slug: m.slug,
            description: m.description,
            date: m.event_date,
            time: m.event_time,
            location: m.location,
            price_per_person: m.price_per_person,
            total_spots: m.total_spots,
            booked_spots: m.booked_spots,
            category: EventCategory::from_code(&m.category),
            image_url: m.image_url,
            metadata,
        }
    }
}

fn to_active_model(aggregate: &Event) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.id.value().to_string()),
        title: Set(aggregate.title.clone()),
        slug: Set(aggregate.slug.clone()),
        description: Set(aggregate.description.clone()),
        event_date: Set(aggregate.date),
        event_time: Set(aggregate.time.clone()),
        location: Set(aggregate.location.clone()),
        price_per_person: Set(aggregate.price_per_person),
        total_spots: Set(aggregate.total_spots),
        booked_spots: Set(aggregate.booked_spots),
        category: Set(aggregate.category.code().to_string()),
        image_url: Set(aggregate.image_url.clone()),
        created_at: Set(Some(aggregate.metadata.created_at)),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
        version: Set(aggregate.metadata.version),
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Предстоящие мероприятия (сегодня и позже) по возрастанию даты
pub async fn list_upcoming(from: chrono::NaiveDate) -> anyhow::Result<Vec<Event>> {
    let items: Vec<Event> = Entity::find()
        .filter(Column::EventDate.gte(from))
        .order_by_asc(Column::EventDate)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Event>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// Чтение мероприятия внутри открытой транзакции
pub async fn get_by_id_txn(txn: &DatabaseTransaction, id: Uuid) -> anyhow::Result<Option<Event>> {
    let result = Entity::find_by_id(id.to_string()).one(txn).await?;
    Ok(result.map(Into::into))
}

pub async fn get_by_slug(slug: &str) -> anyhow::Result<Option<Event>> {
    let result = Entity::find()
        .filter(Column::Slug.eq(slug))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Event) -> anyhow::Result<Uuid> {
    let uuid = aggregate.id.value();
    to_active_model(aggregate).insert(conn()).await?;
    Ok(uuid)
}

/// Условный захват мест одним UPDATE.
///
/// Инкремент проходит только если booked_spots + requested <= total_spots;
/// результат определяется по числу затронутых строк. Читать счетчик и
/// писать его отдельным шагом нельзя — два конкурентных бронирования
/// последних мест перезаписали бы друг друга.
pub async fn increment_booked_spots_txn(
    txn: &DatabaseTransaction,
    event_id: Uuid,
    requested_spots: u32,
) -> anyhow::Result<u64> {
    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        r#"UPDATE a002_event
           SET booked_spots = booked_spots + ?, updated_at = ?
           WHERE id = ? AND booked_spots + ? <= total_spots"#,
        [
            (requested_spots as i32).into(),
            Utc::now().into(),
            event_id.to_string().into(),
            (requested_spots as i32).into(),
        ],
    );
    let result = txn.execute(stmt).await?;
    Ok(result.rows_affected())
}
