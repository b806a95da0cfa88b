use serde::{Deserialize, Serialize};

/// Типы вин
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WineType {
    Red,
    White,
    Rose,
    Sparkling,
    Other,
}

impl WineType {
    /// Получить код типа
    pub fn code(&self) -> &'static str {
        match self {
            WineType::Red => "RED",
            WineType::White => "WHITE",
            WineType::Rose => "ROSE",
            WineType::Sparkling => "SPARKLING",
            WineType::Other => "OTHER",
        }
    }

    /// Получить человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            WineType::Red => "Rotwein",
            WineType::White => "Weißwein",
            WineType::Rose => "Roséwein",
            WineType::Sparkling => "Sekt",
            WineType::Other => "Sonstiges",
        }
    }

    /// Получить все типы вин
    pub fn all() -> Vec<WineType> {
        vec![
            WineType::Red,
            WineType::White,
            WineType::Rose,
            WineType::Sparkling,
            WineType::Other,
        ]
    }

    /// Парсинг из строки (без учета регистра).
    ///
    /// Нераспознанный код возвращает None — фильтры каталога обязаны
    /// молча игнорировать такие значения, а не падать с ошибкой.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "RED" => Some(WineType::Red),
            "WHITE" => Some(WineType::White),
            "ROSE" => Some(WineType::Rose),
            "SPARKLING" => Some(WineType::Sparkling),
            "OTHER" => Some(WineType::Other),
            _ => None,
        }
    }
}

impl ToString for WineType {
    fn to_string(&self) -> String {
        self.code().to_string()
    }
}
