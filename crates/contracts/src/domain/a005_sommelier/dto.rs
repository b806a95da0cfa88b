use serde::{Deserialize, Serialize};

use crate::domain::a001_wine::Wine;

/// Запрос к сомелье: блюдо обязательно, остальное опционально.
/// priceRange приходит строкой ("under-20" | "20-50" | "50-plus"),
/// нераспознанный диапазон просто не дает бюджетных баллов.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SommelierRequest {
    pub dish: String,
    pub occasion: Option<String>,
    #[serde(rename = "priceRange")]
    pub price_range: Option<String>,
    /// Зарезервировано под будущий flavor-бустинг, сейчас не участвует
    /// в подсчете баллов
    pub mood: Option<String>,
}

impl SommelierRequest {
    /// Валидация: блюдо не может быть пустым
    pub fn validate(&self) -> Result<(), String> {
        if self.dish.trim().is_empty() {
            return Err("Блюдо не может быть пустым".into());
        }
        Ok(())
    }
}

/// Рекомендация сомелье: вино, балл совпадения и объяснение
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SommelierRecommendationDto {
    pub wine: Wine,
    #[serde(rename = "matchScore")]
    pub match_score: i32,
    #[serde(rename = "matchReasoning")]
    pub match_reasoning: String,
}
