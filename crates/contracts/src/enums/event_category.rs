use serde::{Deserialize, Serialize};

/// Категории мероприятий винного магазина
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventCategory {
    Tasting,
    Weinfest,
    Afterwork,
    Pairing,
    Other,
}

impl EventCategory {
    /// Получить код категории
    pub fn code(&self) -> &'static str {
        match self {
            EventCategory::Tasting => "TASTING",
            EventCategory::Weinfest => "WEINFEST",
            EventCategory::Afterwork => "AFTERWORK",
            EventCategory::Pairing => "PAIRING",
            EventCategory::Other => "OTHER",
        }
    }

    /// Получить все категории
    pub fn all() -> Vec<EventCategory> {
        vec![
            EventCategory::Tasting,
            EventCategory::Weinfest,
            EventCategory::Afterwork,
            EventCategory::Pairing,
            EventCategory::Other,
        ]
    }

    /// Парсинг из строки. Неизвестная категория сводится к Other,
    /// ошибкой не является.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "TASTING" => EventCategory::Tasting,
            "WEINFEST" => EventCategory::Weinfest,
            "AFTERWORK" => EventCategory::Afterwork,
            "PAIRING" => EventCategory::Pairing,
            _ => EventCategory::Other,
        }
    }
}

impl ToString for EventCategory {
    fn to_string(&self) -> String {
        self.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_defaults_to_other() {
        assert_eq!(EventCategory::from_code("KARAOKE"), EventCategory::Other);
        assert_eq!(EventCategory::from_code(""), EventCategory::Other);
        assert_eq!(EventCategory::from_code("weinfest"), EventCategory::Weinfest);
    }
}
