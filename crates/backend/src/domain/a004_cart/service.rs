use std::collections::HashMap;

use contracts::domain::a001_wine::Wine;
use contracts::domain::a004_cart::{
    CartCalculationDto, CartCalculationRequest, CartLineDetailDto, CartLineDto,
};
use contracts::enums::StockStatus;

use crate::domain::a001_wine;
use crate::shared::error::AppError;

/// Расчет корзины: эффективные цены, подитоги, доступность.
///
/// Расчет не прерывается на проблемных строках — клиент получает полную
/// разбивку корзины за один запрос.
pub async fn calculate(request: CartCalculationRequest) -> Result<CartCalculationDto, AppError> {
    if request.items.is_empty() {
        return Err(AppError::Validation("Cart must not be empty".into()));
    }
    if request.items.iter().any(|line| line.quantity == 0) {
        return Err(AppError::Validation(
            "Line quantity must be positive".into(),
        ));
    }

    let ids: Vec<String> = request
        .items
        .iter()
        .filter_map(|line| line.product_id.clone())
        .collect();

    let wines = a001_wine::repository::find_by_ids(&ids).await?;
    let lookup: HashMap<String, Wine> = wines
        .into_iter()
        .map(|wine| (wine.id.value().to_string(), wine))
        .collect();

    Ok(assemble(&request.items, &lookup))
}

/// Чистая сборка ответа по строкам корзины и предзагруженным винам
fn assemble(lines: &[CartLineDto], lookup: &HashMap<String, Wine>) -> CartCalculationDto {
    let mut total_amount = 0.0;
    let mut items = Vec::new();
    let mut all_available = true;

    for line in lines {
        let product_id = match line.product_id.as_deref() {
            Some(id) if !id.trim().is_empty() => id,
            // Строка без идентификатора: корзина недоступна, но расчет
            // остальных строк продолжается
            _ => {
                all_available = false;
                continue;
            }
        };

        let Some(wine) = lookup.get(product_id) else {
            // Неизвестный товар: нулевая строка, недоступен
            items.push(CartLineDetailDto {
                product_id: product_id.to_string(),
                name: "Unknown Product".into(),
                unit_price: 0.0,
                quantity: line.quantity,
                subtotal: 0.0,
                stock_status: StockStatus::OutOfStock,
                available: false,
                image_url: None,
            });
            all_available = false;
            continue;
        };

        let unit_price = wine.effective_price();
        let subtotal = unit_price * line.quantity as f64;
        total_amount += subtotal;

        let available = wine.is_available_for(line.quantity);
        if !available {
            all_available = false;
        }

        items.push(CartLineDetailDto {
            product_id: product_id.to_string(),
            name: wine.name.clone(),
            unit_price,
            quantity: line.quantity,
            subtotal,
            stock_status: wine.stock_status,
            available,
            image_url: wine.image_url.clone(),
        });
    }

    CartCalculationDto {
        total_amount,
        items,
        all_available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_wine::WineDto;
    use contracts::enums::{StockStatus, WineType};

    fn wine(name: &str, price: f64, sale_price: Option<f64>, stock: Option<i32>) -> Wine {
        Wine::new_for_insert(WineDto {
            name: name.into(),
            price: Some(price),
            sale: sale_price.is_some(),
            sale_price,
            wine_type: Some(WineType::Red),
            stock_status: Some(if stock.is_some() {
                StockStatus::InStock
            } else {
                StockStatus::OutOfStock
            }),
            stock_quantity: stock,
            ..Default::default()
        })
    }

    fn lookup_of(wines: Vec<Wine>) -> HashMap<String, Wine> {
        wines
            .into_iter()
            .map(|w| (w.id.value().to_string(), w))
            .collect()
    }

    fn line(id: Option<&str>, quantity: u32) -> CartLineDto {
        CartLineDto {
            product_id: id.map(Into::into),
            quantity,
        }
    }

    #[test]
    fn test_sale_line_plus_unknown_product() {
        // Вино по распродаже: прайс 20.00, распродажа 15.00, 2 шт.
        let on_sale = wine("Riesling Kabinett", 20.0, Some(15.0), Some(10));
        let sale_id = on_sale.id.value().to_string();
        let lookup = lookup_of(vec![on_sale]);

        let result = assemble(
            &[line(Some(&sale_id), 2), line(Some("missing-id"), 1)],
            &lookup,
        );

        assert_eq!(result.total_amount, 30.0);
        assert!(!result.all_available);
        assert_eq!(result.items.len(), 2);

        let unknown = &result.items[1];
        assert_eq!(unknown.name, "Unknown Product");
        assert_eq!(unknown.unit_price, 0.0);
        assert_eq!(unknown.subtotal, 0.0);
        assert_eq!(unknown.stock_status, StockStatus::OutOfStock);
        assert!(!unknown.available);
    }

    #[test]
    fn test_total_is_sum_of_subtotals() {
        let a = wine("A", 10.0, None, Some(5));
        let b = wine("B", 7.5, None, Some(5));
        let (id_a, id_b) = (a.id.value().to_string(), b.id.value().to_string());
        let lookup = lookup_of(vec![a, b]);

        let result = assemble(&[line(Some(&id_a), 2), line(Some(&id_b), 4)], &lookup);

        let sum: f64 = result.items.iter().map(|i| i.subtotal).sum();
        assert_eq!(result.total_amount, sum);
        assert_eq!(result.total_amount, 50.0);
        assert!(result.all_available);
    }

    #[test]
    fn test_missing_product_id_flips_flag_but_processing_continues() {
        let a = wine("A", 10.0, None, Some(5));
        let id_a = a.id.value().to_string();
        let lookup = lookup_of(vec![a]);

        let result = assemble(&[line(None, 1), line(Some(&id_a), 1)], &lookup);

        assert!(!result.all_available);
        // строка без id не попадает в разбивку, остальные считаются
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.total_amount, 10.0);
    }

    #[test]
    fn test_insufficient_stock_is_unavailable_but_still_priced() {
        let a = wine("A", 10.0, None, Some(1));
        let id_a = a.id.value().to_string();
        let lookup = lookup_of(vec![a]);

        let result = assemble(&[line(Some(&id_a), 3)], &lookup);

        assert!(!result.all_available);
        assert!(!result.items[0].available);
        assert_eq!(result.total_amount, 30.0);
    }
}
