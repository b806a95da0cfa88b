use serde::{Deserialize, Serialize};

/// Вкусовой профиль (немецкая шкала сладости)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WineFlavor {
    Trocken,
    Halbtrocken,
    Feinherb,
    Lieblich,
    Suess,
}

impl WineFlavor {
    /// Получить код вкуса
    pub fn code(&self) -> &'static str {
        match self {
            WineFlavor::Trocken => "TROCKEN",
            WineFlavor::Halbtrocken => "HALBTROCKEN",
            WineFlavor::Feinherb => "FEINHERB",
            WineFlavor::Lieblich => "LIEBLICH",
            WineFlavor::Suess => "SUESS",
        }
    }

    /// Парсинг из строки (без учета регистра, None для неизвестных кодов)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "TROCKEN" => Some(WineFlavor::Trocken),
            "HALBTROCKEN" => Some(WineFlavor::Halbtrocken),
            "FEINHERB" => Some(WineFlavor::Feinherb),
            "LIEBLICH" => Some(WineFlavor::Lieblich),
            "SUESS" => Some(WineFlavor::Suess),
            _ => None,
        }
    }
}

impl ToString for WineFlavor {
    fn to_string(&self) -> String {
        self.code().to_string()
    }
}
