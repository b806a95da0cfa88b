use axum::extract::Query;
use axum::Json;
use contracts::domain::a001_wine::Wine;
use contracts::domain::a005_sommelier::{SommelierRecommendationDto, SommelierRequest};
use serde::Deserialize;

use crate::domain::a005_sommelier;
use crate::shared::error::AppError;

/// POST /api/ai/recommend — рекомендации сомелье по Match Score
pub async fn recommend(
    Json(request): Json<SommelierRequest>,
) -> Result<Json<Vec<SommelierRecommendationDto>>, AppError> {
    Ok(Json(a005_sommelier::service::recommend(request).await?))
}

#[derive(Debug, Deserialize)]
pub struct VectorSearchQuery {
    pub query: String,
}

/// GET /api/ai/search — экспериментальный векторный поиск (заглушка)
pub async fn vector_search(
    Query(params): Query<VectorSearchQuery>,
) -> Result<Json<Vec<Wine>>, AppError> {
    Ok(Json(
        a005_sommelier::service::vector_search(&params.query).await?,
    ))
}
