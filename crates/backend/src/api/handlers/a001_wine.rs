use axum::extract::{Path, Query};
use axum::Json;
use contracts::domain::a001_wine::{Wine, WineDto};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::a001_wine;
use crate::shared::error::AppError;

#[derive(Debug, Clone, Serialize)]
pub struct PaginatedWineResponse {
    pub items: Vec<Wine>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

#[derive(Debug, Deserialize)]
pub struct ListWinesQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub type_alias: Option<String>,
    pub grape: Option<String>,
    pub flavor: Option<String>,
    pub quality: Option<String>,
    pub tag: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<f64>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<f64>,
    pub sort: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// GET /api/wines
pub async fn list(
    Query(query): Query<ListWinesQuery>,
) -> Result<Json<PaginatedWineResponse>, AppError> {
    let limit = query.limit.unwrap_or(100);
    let offset = query.offset.unwrap_or(0);
    let page = if limit > 0 { offset / limit } else { 0 };

    let list_query = a001_wine::repository::WineListQuery {
        search: query.search,
        category: query.category,
        type_alias: query.type_alias,
        grape: query.grape,
        flavor: query.flavor,
        quality: query.quality,
        tag: query.tag,
        min_price: query.min_price,
        max_price: query.max_price,
        sort: query.sort,
        limit,
        offset,
    };

    let (items, total) = a001_wine::service::list(list_query).await?;
    let total_pages = if limit > 0 {
        (total + limit - 1) / limit
    } else {
        0
    };

    Ok(Json(PaginatedWineResponse {
        items,
        total,
        page,
        page_size: limit,
        total_pages,
    }))
}

/// GET /api/wines/featured
pub async fn featured() -> Result<Json<Vec<Wine>>, AppError> {
    Ok(Json(a001_wine::service::featured().await?))
}

/// GET /api/wines/top-rated
pub async fn top_rated() -> Result<Json<Vec<Wine>>, AppError> {
    Ok(Json(a001_wine::service::top_rated().await?))
}

/// GET /api/wines/grapes
pub async fn grapes() -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(a001_wine::service::grape_varieties().await?))
}

/// GET /api/wines/:slug
pub async fn get_by_slug(Path(slug): Path<String>) -> Result<Json<Wine>, AppError> {
    Ok(Json(a001_wine::service::get_by_slug(&slug).await?))
}

/// POST /api/wines — создание или обновление (по наличию slug в DTO)
pub async fn upsert(Json(dto): Json<WineDto>) -> Result<Json<serde_json::Value>, AppError> {
    let wine = match dto.id.clone() {
        Some(_) => {
            let slug = dto
                .slug
                .clone()
                .ok_or_else(|| AppError::Validation("Slug is required for update".into()))?;
            a001_wine::service::update(&slug, dto).await?
        }
        None => a001_wine::service::create(dto).await?,
    };
    Ok(Json(json!({ "id": wine.id.value().to_string(), "slug": wine.slug })))
}

/// DELETE /api/wines/:slug
pub async fn delete(Path(slug): Path<String>) -> Result<(), AppError> {
    a001_wine::service::delete(&slug).await
}

/// POST /api/wines/testdata
pub async fn insert_test_data() -> Result<(), AppError> {
    a001_wine::service::insert_test_data().await
}
