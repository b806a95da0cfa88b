use contracts::domain::a001_wine::Wine;
use contracts::domain::a005_sommelier::{SommelierRecommendationDto, SommelierRequest};
use contracts::enums::{PriceRange, WineType};

use crate::domain::a001_wine;
use crate::shared::error::AppError;

/// База знаний "блюдо -> подходящие типы вин".
///
/// Порядок записей значим: при поиске берется первое совпадение по
/// подстроке, поэтому таблица — статический упорядоченный список, а не
/// HashMap.
static PAIRING_RULES: &[(&str, &[WineType])] = &[
    // Мясо
    ("steak", &[WineType::Red]),
    ("beef", &[WineType::Red]),
    ("lamb", &[WineType::Red]),
    // Рыба и морепродукты
    ("fish", &[WineType::White, WineType::Sparkling, WineType::Rose]),
    ("seafood", &[WineType::White, WineType::Sparkling]),
    ("sushi", &[WineType::White, WineType::Sparkling]),
    // Птица
    ("chicken", &[WineType::White, WineType::Rose, WineType::Red]),
    ("duck", &[WineType::Red, WineType::Rose]),
    // Паста и пицца
    ("pasta", &[WineType::Red, WineType::White]),
    ("pizza", &[WineType::Red, WineType::Rose]),
    // Сыр
    ("cheese", &[WineType::Red, WineType::White]),
    // Десерты
    ("dessert", &[WineType::White, WineType::Sparkling]),
    ("cake", &[WineType::White, WineType::Sparkling]),
];

/// Типы вин для блюда; неизвестное блюдо не дает баллов за тип
fn preferred_types_for_dish(dish: &str) -> &'static [WineType] {
    let dish = dish.to_lowercase();
    PAIRING_RULES
        .iter()
        .find(|(keyword, _)| dish.contains(keyword) || keyword.contains(dish.as_str()))
        .map(|(_, types)| *types)
        .unwrap_or(&[])
}

/// Подсчет Match Score для одного вина
fn score_wine(wine: &Wine, dish: &str, price_range: Option<PriceRange>) -> (i32, String) {
    let mut score = 0;
    let mut reasoning: Vec<String> = Vec::new();

    // 1. Совпадение по блюду (самый сильный сигнал)
    let dish_lower = dish.to_lowercase();
    let dish_direct_match = wine.recommended_dishes.iter().any(|recommended| {
        recommended.eq_ignore_ascii_case(dish)
            || recommended.to_lowercase().contains(&dish_lower)
    });
    if dish_direct_match {
        score += 50;
        reasoning.push(format!("Perfect for {}", dish));
    }

    // 2. Эвристическое совпадение по типу вина
    if preferred_types_for_dish(dish).contains(&wine.wine_type) {
        score += 30;
        reasoning.push(format!("Good type match for {}", dish));
    }

    // 3. Бюджет (по прайсовой цене)
    if let Some(range) = price_range {
        if range.matches(wine.price) {
            score += 20;
            reasoning.push("Fits your budget".into());
        }
    }

    // 4. Бонус за витрину и рейтинг
    if wine.featured {
        score += 5;
    }
    if let Some(rating) = wine.rating {
        // Рейтинг 4.5 -> +9 баллов
        score += (rating * 2.0).floor() as i32;
    }

    let reasoning = if reasoning.is_empty() {
        "General recommendation".to_string()
    } else {
        format!("{}.", reasoning.join(". "))
    };

    (score, reasoning)
}

/// Чистое ранжирование каталога: баллы, отсев нулей, топ-3
fn rank(wines: Vec<Wine>, request: &SommelierRequest) -> Vec<SommelierRecommendationDto> {
    let price_range = request
        .price_range
        .as_deref()
        .and_then(PriceRange::from_code);

    let mut scored: Vec<SommelierRecommendationDto> = wines
        .into_iter()
        .map(|wine| {
            let (match_score, match_reasoning) = score_wine(&wine, &request.dish, price_range);
            SommelierRecommendationDto {
                wine,
                match_score,
                match_reasoning,
            }
        })
        .filter(|r| r.match_score > 0)
        .collect();

    scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    scored.truncate(3);
    scored
}

/// Рекомендации сомелье по блюду, поводу и бюджету
pub async fn recommend(
    request: SommelierRequest,
) -> Result<Vec<SommelierRecommendationDto>, AppError> {
    request.validate().map_err(AppError::Validation)?;
    tracing::info!(
        "Calculating recommendations for dish '{}', budget {:?}",
        request.dish,
        request.price_range
    );

    let wines = a001_wine::repository::list_all().await?;
    Ok(rank(wines, &request))
}

/// Векторный поиск вин. Движка еще нет — endpoint существует и честно
/// возвращает пустой список.
pub async fn vector_search(query: &str) -> Result<Vec<Wine>, AppError> {
    tracing::info!("AI vector search requested (stub): {}", query);
    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_wine::WineDto;

    fn wine(
        name: &str,
        wine_type: WineType,
        price: f64,
        rating: Option<f64>,
        featured: bool,
        dishes: Vec<String>,
    ) -> Wine {
        Wine::new_for_insert(WineDto {
            name: name.into(),
            price: Some(price),
            wine_type: Some(wine_type),
            rating,
            featured,
            recommended_dishes: dishes,
            ..Default::default()
        })
    }

    fn steak_request() -> SommelierRequest {
        SommelierRequest {
            dish: "Steak".into(),
            occasion: None,
            price_range: Some("20-50".into()),
            mood: None,
        }
    }

    #[test]
    fn test_red_featured_wine_outscores_unmatched_white() {
        let red = wine(
            "Spätburgunder Reserve",
            WineType::Red,
            25.0,
            Some(4.5),
            true,
            vec!["Steak".into()],
        );
        let white = wine("Riesling", WineType::White, 25.0, None, false, vec![]);

        let results = rank(vec![white, red], &steak_request());

        assert_eq!(results[0].wine.name, "Spätburgunder Reserve");
        // 50 (блюдо) + 30 (тип) + 20 (бюджет) + 5 (витрина) + floor(4.5*2)
        assert_eq!(results[0].match_score, 114);
        assert!(results[0].match_reasoning.contains("Perfect for Steak"));
        assert!(results[0].match_reasoning.contains("Good type match for Steak"));
        assert!(results[0].match_reasoning.contains("Fits your budget"));
    }

    #[test]
    fn test_results_are_sorted_capped_at_three_and_exclude_zero_scores() {
        let wines = vec![
            wine("A", WineType::Red, 25.0, Some(4.0), false, vec!["Steak".into()]),
            wine("B", WineType::Red, 25.0, None, false, vec![]),
            wine("C", WineType::Red, 80.0, Some(3.0), false, vec![]),
            wine("D", WineType::Red, 30.0, Some(5.0), true, vec!["Steak".into()]),
            // нулевой результат: белое, вне бюджета, без рейтинга
            wine("E", WineType::White, 80.0, None, false, vec![]),
        ];

        let results = rank(wines, &steak_request());

        assert!(results.len() <= 3);
        assert!(results.windows(2).all(|w| w[0].match_score >= w[1].match_score));
        assert!(results.iter().all(|r| r.match_score > 0));
        assert!(!results.iter().any(|r| r.wine.name == "E"));
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let make = || {
            vec![
                wine("A", WineType::Red, 25.0, Some(4.0), false, vec!["Steak".into()]),
                wine("B", WineType::White, 15.0, Some(2.0), true, vec![]),
            ]
        };
        let request = steak_request();

        let first: Vec<(String, i32)> = rank(make(), &request)
            .into_iter()
            .map(|r| (r.wine.name, r.match_score))
            .collect();
        let second: Vec<(String, i32)> = rank(make(), &request)
            .into_iter()
            .map(|r| (r.wine.name, r.match_score))
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_pairing_table_first_match_wins() {
        // "steak" стоит в таблице раньше "pizza"
        assert_eq!(preferred_types_for_dish("Steak Pizza"), &[WineType::Red]);
        assert_eq!(
            preferred_types_for_dish("Pizza Margherita"),
            &[WineType::Red, WineType::Rose]
        );
        assert!(preferred_types_for_dish("Borschtsch").is_empty());
    }

    #[test]
    fn test_unmatched_wine_gets_general_recommendation_text() {
        let plain = wine("Landwein", WineType::Other, 8.0, Some(1.0), false, vec![]);
        let (score, reasoning) = score_wine(&plain, "Steak", None);
        assert_eq!(score, 2);
        assert_eq!(reasoning, "General recommendation");
    }

    #[test]
    fn test_unknown_price_range_gives_no_budget_points() {
        let red = wine("A", WineType::Red, 25.0, None, false, vec![]);
        let request = SommelierRequest {
            dish: "Steak".into(),
            occasion: None,
            price_range: Some("luxury".into()),
            mood: None,
        };
        let results = rank(vec![red], &request);
        // только 30 за тип, без бюджетных баллов
        assert_eq!(results[0].match_score, 30);
    }
}
