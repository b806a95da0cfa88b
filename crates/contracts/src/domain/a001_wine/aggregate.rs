use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{AggregateId, EntityMetadata};
use crate::enums::{StockStatus, WineFlavor, WineType};

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор вина
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WineId(pub Uuid);

impl WineId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for WineId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(WineId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Вино (позиция каталога)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wine {
    pub id: WineId,

    pub name: String,

    /// URL-дружественный уникальный идентификатор
    pub slug: String,

    /// Цена по прайсу. Отсутствующая цена в хранилище читается как 0.0,
    /// расчеты никогда не падают из-за нее.
    pub price: f64,

    /// Флаг распродажи
    pub sale: bool,

    /// Цена по распродаже; учитывается только при sale == true и значении > 0
    #[serde(rename = "salePrice")]
    pub sale_price: Option<f64>,

    pub description: Option<String>,

    #[serde(rename = "shortDescription")]
    pub short_description: Option<String>,

    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,

    #[serde(rename = "wineType")]
    pub wine_type: WineType,

    #[serde(rename = "stockStatus")]
    pub stock_status: StockStatus,

    #[serde(rename = "stockQuantity")]
    pub stock_quantity: Option<i32>,

    #[serde(rename = "grapeVariety")]
    pub grape_variety: Option<String>,

    #[serde(rename = "productionYear")]
    pub production_year: Option<i32>,

    pub alcohol: Option<String>,

    pub flavor: Option<WineFlavor>,

    #[serde(rename = "qualityLevel")]
    pub quality_level: Option<String>,

    pub edition: Option<String>,

    /// Рейтинг 0.0-5.0
    pub rating: Option<f64>,

    /// Рекомендованные блюда (порядок значим для объяснений сомелье)
    #[serde(rename = "recommendedDishes")]
    pub recommended_dishes: Vec<String>,

    pub tags: Vec<String>,

    pub featured: bool,

    pub metadata: EntityMetadata,
}

impl Wine {
    /// Создать новое вино для вставки в БД
    pub fn new_for_insert(dto: WineDto) -> Self {
        let slug = match dto.slug {
            Some(ref s) if !s.trim().is_empty() => s.clone(),
            _ => generate_slug(&dto.name),
        };

        Self {
            id: WineId::new_v4(),
            name: dto.name,
            slug,
            price: dto.price.unwrap_or(0.0),
            sale: dto.sale,
            sale_price: dto.sale_price,
            description: dto.description,
            short_description: dto.short_description,
            image_url: dto.image_url,
            wine_type: dto.wine_type.unwrap_or(WineType::Other),
            stock_status: dto.stock_status.unwrap_or(StockStatus::OutOfStock),
            stock_quantity: dto.stock_quantity,
            grape_variety: dto.grape_variety,
            production_year: dto.production_year,
            alcohol: dto.alcohol,
            flavor: dto.flavor,
            quality_level: dto.quality_level,
            edition: dto.edition,
            rating: dto.rating,
            recommended_dishes: dto.recommended_dishes,
            tags: dto.tags,
            featured: dto.featured,
            metadata: EntityMetadata::new(),
        }
    }

    /// Эффективная цена за единицу: цена распродажи, если она задана,
    /// положительна и флаг распродажи установлен, иначе цена по прайсу.
    pub fn effective_price(&self) -> f64 {
        match self.sale_price {
            Some(sale_price) if self.sale && sale_price > 0.0 => sale_price,
            _ => self.price,
        }
    }

    /// Доступно ли запрошенное количество. ON_DEMAND и OUT_OF_STOCK
    /// недоступны независимо от складских остатков.
    pub fn is_available_for(&self, quantity: u32) -> bool {
        self.stock_status == StockStatus::InStock
            && self
                .stock_quantity
                .map_or(false, |on_hand| on_hand >= quantity as i32)
    }

    /// Обновить данные из DTO (id и slug не меняются)
    pub fn update(&mut self, dto: &WineDto) {
        self.name = dto.name.clone();
        self.price = dto.price.unwrap_or(0.0);
        self.sale = dto.sale;
        self.sale_price = dto.sale_price;
        self.description = dto.description.clone();
        self.short_description = dto.short_description.clone();
        self.image_url = dto.image_url.clone();
        self.wine_type = dto.wine_type.unwrap_or(WineType::Other);
        self.stock_status = dto.stock_status.unwrap_or(StockStatus::OutOfStock);
        self.stock_quantity = dto.stock_quantity;
        self.grape_variety = dto.grape_variety.clone();
        self.production_year = dto.production_year;
        self.alcohol = dto.alcohol.clone();
        self.flavor = dto.flavor;
        self.quality_level = dto.quality_level.clone();
        self.edition = dto.edition.clone();
        self.rating = dto.rating;
        self.recommended_dishes = dto.recommended_dishes.clone();
        self.tags = dto.tags.clone();
        self.featured = dto.featured;
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Название не может быть пустым".into());
        }
        if self.slug.trim().is_empty() {
            return Err("Slug не может быть пустым".into());
        }
        if self.price < 0.0 {
            return Err("Цена не может быть отрицательной".into());
        }
        if let Some(rating) = self.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err("Рейтинг должен быть в диапазоне 0.0-5.0".into());
            }
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.metadata.touch();
    }
}

/// URL-дружественный slug из названия: строчные буквы, цифры и дефисы
pub fn generate_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut prev_dash = false;
    for ch in name.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
            prev_dash = false;
        } else if !prev_dash && !slug.is_empty() {
            slug.push('-');
            prev_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления вина
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WineDto {
    pub id: Option<String>,
    pub name: String,
    pub slug: Option<String>,
    pub price: Option<f64>,
    #[serde(default)]
    pub sale: bool,
    #[serde(rename = "salePrice")]
    pub sale_price: Option<f64>,
    pub description: Option<String>,
    #[serde(rename = "shortDescription")]
    pub short_description: Option<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(rename = "wineType")]
    pub wine_type: Option<WineType>,
    #[serde(rename = "stockStatus")]
    pub stock_status: Option<StockStatus>,
    #[serde(rename = "stockQuantity")]
    pub stock_quantity: Option<i32>,
    #[serde(rename = "grapeVariety")]
    pub grape_variety: Option<String>,
    #[serde(rename = "productionYear")]
    pub production_year: Option<i32>,
    pub alcohol: Option<String>,
    pub flavor: Option<WineFlavor>,
    #[serde(rename = "qualityLevel")]
    pub quality_level: Option<String>,
    pub edition: Option<String>,
    pub rating: Option<f64>,
    #[serde(rename = "recommendedDishes", default)]
    pub recommended_dishes: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wine_with_pricing(price: f64, sale: bool, sale_price: Option<f64>) -> Wine {
        Wine::new_for_insert(WineDto {
            name: "Testwein".into(),
            price: Some(price),
            sale,
            sale_price,
            ..Default::default()
        })
    }

    #[test]
    fn test_effective_price_prefers_positive_sale_price() {
        assert_eq!(wine_with_pricing(20.0, true, Some(15.0)).effective_price(), 15.0);
    }

    #[test]
    fn test_effective_price_falls_back_to_list_price() {
        // флаг без цены
        assert_eq!(wine_with_pricing(20.0, true, None).effective_price(), 20.0);
        // цена без флага
        assert_eq!(wine_with_pricing(20.0, false, Some(15.0)).effective_price(), 20.0);
        // нулевая цена распродажи не считается
        assert_eq!(wine_with_pricing(20.0, true, Some(0.0)).effective_price(), 20.0);
    }

    #[test]
    fn test_missing_list_price_reads_as_zero() {
        let wine = Wine::new_for_insert(WineDto {
            name: "Ohne Preis".into(),
            ..Default::default()
        });
        assert_eq!(wine.effective_price(), 0.0);
    }

    #[test]
    fn test_availability_requires_in_stock_and_quantity() {
        let mut wine = wine_with_pricing(10.0, false, None);
        wine.stock_status = StockStatus::InStock;
        wine.stock_quantity = Some(3);
        assert!(wine.is_available_for(3));
        assert!(!wine.is_available_for(4));

        wine.stock_quantity = None;
        assert!(!wine.is_available_for(1));

        // ON_DEMAND недоступен даже при ненулевом остатке
        wine.stock_status = StockStatus::OnDemand;
        wine.stock_quantity = Some(100);
        assert!(!wine.is_available_for(1));
    }

    #[test]
    fn test_generate_slug() {
        assert_eq!(generate_slug("Spätburgunder Trocken 2021"), "sp-tburgunder-trocken-2021");
        assert_eq!(generate_slug("Riesling  --  Kabinett"), "riesling-kabinett");
    }
}
