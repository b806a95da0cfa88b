use chrono::Utc;
use contracts::domain::a001_wine::{Wine, WineId};
use contracts::domain::common::EntityMetadata;
use contracts::enums::{StockStatus, WineFlavor, WineType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_wine")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub slug: String,
    pub price: Option<f64>,
    pub sale: bool,
    pub sale_price: Option<f64>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub image_url: Option<String>,
    pub wine_type: String,
    pub stock_status: String,
    pub stock_quantity: Option<i32>,
    pub grape_variety: Option<String>,
    pub production_year: Option<i32>,
    pub alcohol: Option<String>,
    pub flavor: Option<String>,
    pub quality_level: Option<String>,
    pub edition: Option<String>,
    pub rating: Option<f64>,
    // JSON-массивы в текстовых колонках
    pub recommended_dishes: String,
    pub tags: String,
    pub featured: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Wine {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Wine {
            id: WineId::new(uuid),
            name: m.name,
            slug: m.slug,
            price: m.price.unwrap_or(0.0),
            sale: m.sale,
            sale_price: m.sale_price,
            description: m.description,
            short_description: m.short_description,
            image_url: m.image_url,
            wine_type: WineType::from_code(&m.wine_type).unwrap_or(WineType::Other),
            stock_status: StockStatus::from_code(&m.stock_status),
            stock_quantity: m.stock_quantity,
            grape_variety: m.grape_variety,
            production_year: m.production_year,
            alcohol: m.alcohol,
            flavor: m.flavor.as_deref().and_then(WineFlavor::from_code),
            quality_level: m.quality_level,
            edition: m.edition,
            rating: m.rating,
            recommended_dishes: serde_json::from_str(&m.recommended_dishes).unwrap_or_default(),
            tags: serde_json::from_str(&m.tags).unwrap_or_default(),
            featured: m.featured,
            metadata,
        }
    }
}

fn to_active_model(aggregate: &Wine) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.id.value().to_string()),
        name: Set(aggregate.name.clone()),
        slug: Set(aggregate.slug.clone()),
        price: Set(Some(aggregate.price)),
        sale: Set(aggregate.sale),
        sale_price: Set(aggregate.sale_price),
        description: Set(aggregate.description.clone()),
        short_description: Set(aggregate.short_description.clone()),
        image_url: Set(aggregate.image_url.clone()),
        wine_type: Set(aggregate.wine_type.code().to_string()),
        stock_status: Set(aggregate.stock_status.code().to_string()),
        stock_quantity: Set(aggregate.stock_quantity),
        grape_variety: Set(aggregate.grape_variety.clone()),
        production_year: Set(aggregate.production_year),
        alcohol: Set(aggregate.alcohol.clone()),
        flavor: Set(aggregate.flavor.map(|f| f.code().to_string())),
        quality_level: Set(aggregate.quality_level.clone()),
        edition: Set(aggregate.edition.clone()),
        rating: Set(aggregate.rating),
        recommended_dishes: Set(serde_json::to_string(&aggregate.recommended_dishes)
            .unwrap_or_else(|_| "[]".to_string())),
        tags: Set(serde_json::to_string(&aggregate.tags).unwrap_or_else(|_| "[]".to_string())),
        featured: Set(aggregate.featured),
        created_at: Set(Some(aggregate.metadata.created_at)),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
        version: Set(aggregate.metadata.version),
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

// ============================================================================
// Фильтрация каталога
// ============================================================================

/// Параметры выборки каталога. Все поля опциональны; нераспознанные
/// коды enum'ов (категория, вкус) молча не добавляют предикат — клиенты
/// с более новыми справочниками не должны получать ошибку.
#[derive(Debug, Clone, Default)]
pub struct WineListQuery {
    pub search: Option<String>,
    /// Категория вина; выигрывает у `type_alias`, если заданы обе
    pub category: Option<String>,
    /// Псевдоним категории из старых клиентов
    pub type_alias: Option<String>,
    pub grape: Option<String>,
    pub flavor: Option<String>,
    pub quality: Option<String>,
    pub tag: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// price_asc | price_desc | newest | rating; иначе сортировка по имени
    pub sort: Option<String>,
    pub limit: u64,
    pub offset: u64,
}

fn has_text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Конъюнкция предикатов из запроса. Пустой запрос — универсально
/// истинное условие (выборка без фильтрации).
pub fn build_condition(query: &WineListQuery) -> Condition {
    let mut condition = Condition::all();

    // 1. Поиск: подстрока без учета регистра по имени, описанию,
    //    сорту винограда или тегам
    if let Some(search) = has_text(&query.search) {
        let pattern = format!("%{}%", search.to_lowercase());
        condition = condition.add(
            Condition::any()
                .add(Expr::expr(Func::lower(Expr::col(Column::Name))).like(pattern.as_str()))
                .add(Expr::expr(Func::lower(Expr::col(Column::Description))).like(pattern.as_str()))
                .add(Expr::expr(Func::lower(Expr::col(Column::GrapeVariety))).like(pattern.as_str()))
                .add(Expr::expr(Func::lower(Expr::col(Column::Tags))).like(pattern.as_str())),
        );
    }

    // 2. Категория / тип (категория выигрывает); нераспознанный код
    //    не добавляет предикат
    let category = has_text(&query.category).or_else(|| has_text(&query.type_alias));
    if let Some(code) = category {
        if let Some(wine_type) = WineType::from_code(code) {
            condition = condition.add(Column::WineType.eq(wine_type.code()));
        }
    }

    // 3. Сорт винограда: точное совпадение без учета регистра
    if let Some(grape) = has_text(&query.grape) {
        condition = condition.add(
            Expr::expr(Func::lower(Expr::col(Column::GrapeVariety))).eq(grape.to_lowercase()),
        );
    }

    // 4. Вкус: точное совпадение enum'а, нераспознанный код игнорируется
    if let Some(code) = has_text(&query.flavor) {
        if let Some(flavor) = WineFlavor::from_code(code) {
            condition = condition.add(Column::Flavor.eq(flavor.code()));
        }
    }

    // 5. Тег: точное членство в JSON-массиве (токен в кавычках)
    if let Some(tag) = has_text(&query.tag) {
        condition = condition.add(Column::Tags.like(format!("%\"{}\"%", tag).as_str()));
    }

    // 6. Качество: подстрока по уровню качества ИЛИ изданию
    if let Some(quality) = has_text(&query.quality) {
        let pattern = format!("%{}%", quality.to_lowercase());
        condition = condition.add(
            Condition::any()
                .add(Expr::expr(Func::lower(Expr::col(Column::QualityLevel))).like(pattern.as_str()))
                .add(Expr::expr(Func::lower(Expr::col(Column::Edition))).like(pattern.as_str())),
        );
    }

    // 7. Диапазон цен: включающие границы по прайсовой цене
    if let Some(min_price) = query.min_price {
        condition = condition.add(Column::Price.gte(min_price));
    }
    if let Some(max_price) = query.max_price {
        condition = condition.add(Column::Price.lte(max_price));
    }

    condition
}

/// Пагинированная выборка каталога с фильтрами и сортировкой
pub async fn list_paginated(query: &WineListQuery) -> anyhow::Result<(Vec<Wine>, u64)> {
    let condition = build_condition(query);

    // Подсчет общего количества
    let total = Entity::find()
        .filter(condition.clone())
        .count(conn())
        .await?;

    let mut select = Entity::find().filter(condition);

    // Сортировка
    select = match query.sort.as_deref() {
        Some("price_asc") => select.order_by_asc(Column::Price),
        Some("price_desc") => select.order_by_desc(Column::Price),
        Some("newest") => select.order_by_desc(Column::CreatedAt),
        Some("rating") => select.order_by_desc(Column::Rating),
        _ => select.order_by_asc(Column::Name),
    };

    // limit == 0 трактуется как "без ограничения"
    let limit = if query.limit > 0 {
        Some(query.limit)
    } else {
        None
    };

    let items: Vec<Wine> = select
        .limit(limit)
        .offset(query.offset)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((items, total))
}

pub async fn list_all() -> anyhow::Result<Vec<Wine>> {
    let items: Vec<Wine> = Entity::find()
        .order_by_asc(Column::Name)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_slug(slug: &str) -> anyhow::Result<Option<Wine>> {
    let result = Entity::find()
        .filter(Column::Slug.eq(slug))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

/// Выборка по списку идентификаторов (для расчета корзины)
pub async fn find_by_ids(ids: &[String]) -> anyhow::Result<Vec<Wine>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let items: Vec<Wine> = Entity::find()
        .filter(Column::Id.is_in(ids.iter().cloned()))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn list_featured() -> anyhow::Result<Vec<Wine>> {
    let items: Vec<Wine> = Entity::find()
        .filter(Column::Featured.eq(true))
        .order_by_asc(Column::Name)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn list_top_rated(limit: u64) -> anyhow::Result<Vec<Wine>> {
    let items: Vec<Wine> = Entity::find()
        .filter(Column::Rating.is_not_null())
        .order_by_desc(Column::Rating)
        .limit(limit)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Список уникальных сортов винограда для фильтров каталога
pub async fn distinct_grape_varieties() -> anyhow::Result<Vec<String>> {
    let mut grapes: Vec<String> = Entity::find()
        .select_only()
        .column(Column::GrapeVariety)
        .distinct()
        .into_tuple::<Option<String>>()
        .all(conn())
        .await?
        .into_iter()
        .flatten()
        .filter(|g| !g.trim().is_empty())
        .collect();
    grapes.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
    Ok(grapes)
}

pub async fn insert(aggregate: &Wine) -> anyhow::Result<Uuid> {
    let uuid = aggregate.id.value();
    to_active_model(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &Wine) -> anyhow::Result<()> {
    let mut active = to_active_model(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn delete_by_slug(slug: &str) -> anyhow::Result<bool> {
    let result = Entity::delete_many()
        .filter(Column::Slug.eq(slug))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    // Рендерит только WHERE-предикаты запроса (без проекции колонок из
    // SELECT), чтобы утверждения проверяли именно условие фильтрации.
    // Пустое условие sea-orm отображает как `WHERE TRUE` — трактуем его
    // как отсутствие предикатов.
    fn render(query: &WineListQuery) -> String {
        let sql = Entity::find()
            .filter(build_condition(query))
            .build(DbBackend::Sqlite)
            .to_string();
        match sql.split_once(" WHERE ") {
            Some((_, where_clause)) if where_clause.trim() != "TRUE" => where_clause.to_string(),
            _ => String::new(),
        }
    }

    #[test]
    fn test_empty_query_adds_no_predicates() {
        let sql = render(&WineListQuery::default());
        assert!(!sql.contains("WHERE"), "unexpected WHERE in: {sql}");
    }

    #[test]
    fn test_category_and_price_bounds_compose_conjunctively() {
        let base = WineListQuery {
            min_price: Some(10.0),
            max_price: Some(30.0),
            ..Default::default()
        };
        let sql = render(&base);
        assert!(sql.contains("\"price\" >= 10"));
        assert!(sql.contains("\"price\" <= 30"));
        assert!(!sql.contains("wine_type"));

        // Добавление категории только сужает условие
        let narrowed = WineListQuery {
            category: Some("RED".into()),
            ..base
        };
        let sql = render(&narrowed);
        assert!(sql.contains("\"price\" >= 10"));
        assert!(sql.contains("\"price\" <= 30"));
        assert!(sql.contains("\"wine_type\" = 'RED'"));
        assert!(sql.contains(" AND "));
    }

    #[test]
    fn test_unparsable_category_degrades_to_no_filter() {
        let query = WineListQuery {
            category: Some("PURPLE".into()),
            min_price: Some(10.0),
            ..Default::default()
        };
        let sql = render(&query);
        assert!(!sql.contains("wine_type"));
        assert!(sql.contains("\"price\" >= 10"));
    }

    #[test]
    fn test_category_wins_over_type_alias() {
        let query = WineListQuery {
            category: Some("RED".into()),
            type_alias: Some("WHITE".into()),
            ..Default::default()
        };
        let sql = render(&query);
        assert!(sql.contains("\"wine_type\" = 'RED'"));
        assert!(!sql.contains("'WHITE'"));
    }

    #[test]
    fn test_type_alias_applies_when_category_absent() {
        let query = WineListQuery {
            type_alias: Some("white".into()),
            ..Default::default()
        };
        let sql = render(&query);
        assert!(sql.contains("\"wine_type\" = 'WHITE'"));
    }

    #[test]
    fn test_search_spans_name_description_grape_and_tags() {
        let query = WineListQuery {
            search: Some("Riesling".into()),
            ..Default::default()
        };
        let sql = render(&query);
        assert!(sql.contains("LOWER(\"name\") LIKE '%riesling%'"));
        assert!(sql.contains("LOWER(\"description\") LIKE '%riesling%'"));
        assert!(sql.contains("LOWER(\"grape_variety\") LIKE '%riesling%'"));
        assert!(sql.contains("LOWER(\"tags\") LIKE '%riesling%'"));
        assert!(sql.contains(" OR "));
    }

    #[test]
    fn test_quality_matches_level_or_edition() {
        let query = WineListQuery {
            quality: Some("Kabinett".into()),
            ..Default::default()
        };
        let sql = render(&query);
        assert!(sql.contains("LOWER(\"quality_level\") LIKE '%kabinett%'"));
        assert!(sql.contains("LOWER(\"edition\") LIKE '%kabinett%'"));
        assert!(sql.contains(" OR "));
    }

    #[test]
    fn test_tag_filter_matches_quoted_token() {
        let query = WineListQuery {
            tag: Some("BIO".into()),
            ..Default::default()
        };
        let sql = render(&query);
        assert!(sql.contains("\"tags\" LIKE '%\"BIO\"%'"));
    }

    #[test]
    fn test_unparsable_flavor_is_ignored() {
        let query = WineListQuery {
            flavor: Some("UMAMI".into()),
            ..Default::default()
        };
        let sql = render(&query);
        assert!(!sql.contains("flavor"));
    }
}
