use contracts::domain::a001_wine::{Wine, WineDto};

use super::repository;
use crate::shared::error::AppError;

/// Пагинированная выборка каталога с фильтрами
pub async fn list(query: repository::WineListQuery) -> Result<(Vec<Wine>, u64), AppError> {
    repository::list_paginated(&query).await.map_err(Into::into)
}

/// Получение вина по slug
pub async fn get_by_slug(slug: &str) -> Result<Wine, AppError> {
    tracing::info!("Fetching wine by slug: {}", slug);
    repository::get_by_slug(slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Wine not found: {}", slug)))
}

/// Избранные вина (витрина)
pub async fn featured() -> Result<Vec<Wine>, AppError> {
    repository::list_featured().await.map_err(Into::into)
}

/// Топ-10 вин по рейтингу
pub async fn top_rated() -> Result<Vec<Wine>, AppError> {
    repository::list_top_rated(10).await.map_err(Into::into)
}

/// Уникальные сорта винограда для выпадающих фильтров
pub async fn grape_varieties() -> Result<Vec<String>, AppError> {
    repository::distinct_grape_varieties()
        .await
        .map_err(Into::into)
}

/// Создание нового вина
pub async fn create(dto: WineDto) -> Result<Wine, AppError> {
    tracing::info!("Creating new wine: {}", dto.name);
    let mut aggregate = Wine::new_for_insert(dto);

    aggregate.validate().map_err(AppError::Validation)?;
    aggregate.before_write();

    repository::insert(&aggregate).await?;
    Ok(aggregate)
}

/// Обновление существующего вина по slug
pub async fn update(slug: &str, dto: WineDto) -> Result<Wine, AppError> {
    tracing::info!("Updating wine with slug: {}", slug);
    let mut aggregate = repository::get_by_slug(slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Wine not found: {}", slug)))?;

    aggregate.update(&dto);
    aggregate.validate().map_err(AppError::Validation)?;
    aggregate.before_write();
    aggregate.metadata.increment_version();

    repository::update(&aggregate).await?;
    Ok(aggregate)
}

/// Удаление вина по slug
pub async fn delete(slug: &str) -> Result<(), AppError> {
    tracing::info!("Deleting wine with slug: {}", slug);
    if !repository::delete_by_slug(slug).await? {
        return Err(AppError::NotFound(format!("Wine not found: {}", slug)));
    }
    Ok(())
}

/// Вставка тестовых данных
pub async fn insert_test_data() -> Result<(), AppError> {
    let data = vec![
        WineDto {
            name: "Spätburgunder Reserve".into(),
            slug: Some("spaetburgunder-reserve".into()),
            price: Some(25.0),
            sale: false,
            wine_type: Some(contracts::enums::WineType::Red),
            stock_status: Some(contracts::enums::StockStatus::InStock),
            stock_quantity: Some(48),
            grape_variety: Some("Spätburgunder".into()),
            production_year: Some(2021),
            alcohol: Some("13.5%".into()),
            flavor: Some(contracts::enums::WineFlavor::Trocken),
            quality_level: Some("VDP.Ortswein".into()),
            rating: Some(4.5),
            recommended_dishes: vec!["Steak".into(), "Lamm".into()],
            tags: vec!["BIO".into()],
            featured: true,
            ..Default::default()
        },
        WineDto {
            name: "Riesling Kabinett".into(),
            slug: Some("riesling-kabinett".into()),
            price: Some(20.0),
            sale: true,
            sale_price: Some(15.0),
            wine_type: Some(contracts::enums::WineType::White),
            stock_status: Some(contracts::enums::StockStatus::InStock),
            stock_quantity: Some(120),
            grape_variety: Some("Riesling".into()),
            production_year: Some(2023),
            alcohol: Some("11.0%".into()),
            flavor: Some(contracts::enums::WineFlavor::Halbtrocken),
            quality_level: Some("Kabinett".into()),
            rating: Some(4.2),
            recommended_dishes: vec!["Fisch".into(), "Sushi".into()],
            tags: vec!["VEGAN".into()],
            ..Default::default()
        },
        WineDto {
            name: "Rosé Feinherb".into(),
            slug: Some("rose-feinherb".into()),
            price: Some(12.5),
            wine_type: Some(contracts::enums::WineType::Rose),
            stock_status: Some(contracts::enums::StockStatus::OnDemand),
            grape_variety: Some("Portugieser".into()),
            flavor: Some(contracts::enums::WineFlavor::Feinherb),
            rating: Some(3.8),
            recommended_dishes: vec!["Pizza".into()],
            ..Default::default()
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
    use contracts::domain::a001_wine::aggregate::generate_slug;

    #[test]
    fn test_generated_slug_is_url_safe() {
        let dto = WineDto {
            name: "Grauburgunder & Co 2022".into(),
            ..Default::default()
        };
        let wine = Wine::new_for_insert(dto);
        assert_eq!(wine.slug, generate_slug("Grauburgunder & Co 2022"));
        assert!(wine.slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
    }
}
