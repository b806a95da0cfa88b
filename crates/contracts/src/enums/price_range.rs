use serde::{Deserialize, Serialize};

/// Бюджетные диапазоны для подбора вина
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceRange {
    #[serde(rename = "under-20")]
    Under20,
    #[serde(rename = "20-50")]
    Mid20To50,
    #[serde(rename = "50-plus")]
    Over50,
}

impl PriceRange {
    /// Получить код диапазона
    pub fn code(&self) -> &'static str {
        match self {
            PriceRange::Under20 => "under-20",
            PriceRange::Mid20To50 => "20-50",
            PriceRange::Over50 => "50-plus",
        }
    }

    /// Парсинг из строки; неизвестный диапазон не дает бюджетных баллов
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "under-20" => Some(PriceRange::Under20),
            "20-50" => Some(PriceRange::Mid20To50),
            "50-plus" => Some(PriceRange::Over50),
            _ => None,
        }
    }

    /// Попадает ли цена в диапазон. Границы: under-20 включает 20.00,
    /// 20-50 — полуинтервал (20, 50], 50-plus — строго больше 50.
    pub fn matches(&self, price: f64) -> bool {
        match self {
            PriceRange::Under20 => price <= 20.0,
            PriceRange::Mid20To50 => price > 20.0 && price <= 50.0,
            PriceRange::Over50 => price > 50.0,
        }
    }
}

impl ToString for PriceRange {
    fn to_string(&self) -> String {
        self.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert!(PriceRange::Under20.matches(20.0));
        assert!(!PriceRange::Mid20To50.matches(20.0));
        assert!(PriceRange::Mid20To50.matches(20.01));
        assert!(PriceRange::Mid20To50.matches(50.0));
        assert!(!PriceRange::Over50.matches(50.0));
        assert!(PriceRange::Over50.matches(50.01));
    }

    #[test]
    fn test_from_code_unknown_returns_none() {
        assert_eq!(PriceRange::from_code("cheap"), None);
        assert_eq!(PriceRange::from_code("under-20"), Some(PriceRange::Under20));
    }
}
