//! Daily summary aggregation. Pure over already-fetched rows: scales each
//! entry's per-100g reference values by the consumed amount and accumulates
//! totals, then attaches goal context when the device has one.

use std::collections::HashMap;

use serde::Serialize;
use time::Date;
use uuid::Uuid;

use crate::products::repo::Product;

use super::repo::ConsumptionLog;

#[derive(Debug, Clone, Serialize)]
pub struct ConsumedItem {
    pub id: Uuid,
    pub code: String,
    pub product_name: Option<String>,
    pub amount: f32,
    pub calories: f32,
    pub protein: f32,
    pub fat: f32,
    pub carb: f32,
}

#[derive(Debug, Serialize)]
pub struct DailySummary {
    pub date: Date,
    pub total_calorie: f32,
    pub total_protein: f32,
    pub total_fat: f32,
    pub total_carb: f32,
    pub consumed_items: Vec<ConsumedItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calorie_goal: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calorie_remaining: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calorie_goal_percentage: Option<f32>,
}

/// Entries whose product is missing from `products` are silently dropped
/// from both the totals and the item list; the caller is not told. Absent
/// per-100g values count as zero at this boundary.
pub fn build_summary(
    date: Date,
    logs: &[ConsumptionLog],
    products: &HashMap<String, Product>,
    goal_target: Option<f32>,
) -> DailySummary {
    let mut summary = DailySummary {
        date,
        total_calorie: 0.0,
        total_protein: 0.0,
        total_fat: 0.0,
        total_carb: 0.0,
        consumed_items: Vec::new(),
        calorie_goal: None,
        calorie_remaining: None,
        calorie_goal_percentage: None,
    };

    for log in logs {
        let Some(product) = products.get(&log.code) else {
            continue;
        };

        let ratio = log.amount / 100.0;
        let calories = product.energy_kcal_100g.unwrap_or(0.0) * ratio;
        let protein = product.proteins_100g.unwrap_or(0.0) * ratio;
        let fat = product.fat_100g.unwrap_or(0.0) * ratio;
        let carb = product.carbohydrates_100g.unwrap_or(0.0) * ratio;

        summary.total_calorie += calories;
        summary.total_protein += protein;
        summary.total_fat += fat;
        summary.total_carb += carb;

        summary.consumed_items.push(ConsumedItem {
            id: log.id,
            code: log.code.clone(),
            product_name: product.product_name.clone(),
            amount: log.amount,
            calories,
            protein,
            fat,
            carb,
        });
    }

    if let Some(target) = goal_target.filter(|t| *t > 0.0) {
        summary.calorie_goal = Some(target);
        summary.calorie_remaining = Some(target - summary.total_calorie);
        summary.calorie_goal_percentage = Some(summary.total_calorie / target * 100.0);
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::repo::test_product;
    use time::macros::date;
    use time::OffsetDateTime;

    fn log(code: &str, amount: f32) -> ConsumptionLog {
        ConsumptionLog {
            id: Uuid::new_v4(),
            device_id: "device-1".into(),
            code: code.into(),
            amount,
            log_date: date!(2024 - 01 - 01),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn product(code: &str, energy: f32, fat: f32, protein: f32, carb: f32) -> Product {
        let mut p = test_product(code);
        p.product_name = Some(format!("product {code}"));
        p.energy_kcal_100g = Some(energy);
        p.fat_100g = Some(fat);
        p.proteins_100g = Some(protein);
        p.carbohydrates_100g = Some(carb);
        p
    }

    fn product_map(products: Vec<Product>) -> HashMap<String, Product> {
        products.into_iter().map(|p| (p.code.clone(), p)).collect()
    }

    #[test]
    fn scales_entry_by_consumed_amount() {
        let products = product_map(vec![product("111", 250.0, 5.0, 10.0, 30.0)]);
        let logs = vec![log("111", 150.0)];

        let summary = build_summary(date!(2024 - 01 - 01), &logs, &products, None);
        assert_eq!(summary.total_calorie, 375.0);
        assert_eq!(summary.total_fat, 7.5);
        assert_eq!(summary.total_protein, 15.0);
        assert_eq!(summary.total_carb, 45.0);
        assert_eq!(summary.consumed_items.len(), 1);
        assert_eq!(summary.consumed_items[0].calories, 375.0);
    }

    #[test]
    fn totals_scale_linearly_with_amount() {
        let products = product_map(vec![product("111", 213.0, 7.3, 4.1, 29.0)]);
        let half = build_summary(date!(2024 - 01 - 01), &[log("111", 50.0)], &products, None);
        let full = build_summary(date!(2024 - 01 - 01), &[log("111", 100.0)], &products, None);
        assert!((full.total_calorie - 2.0 * half.total_calorie).abs() < 1e-4);
        assert!((full.total_fat - 2.0 * half.total_fat).abs() < 1e-4);
        assert!((full.total_protein - 2.0 * half.total_protein).abs() < 1e-4);
        assert!((full.total_carb - 2.0 * half.total_carb).abs() < 1e-4);
    }

    #[test]
    fn unresolvable_product_is_skipped_silently() {
        let products = product_map(vec![product("111", 100.0, 1.0, 1.0, 1.0)]);
        let logs = vec![log("111", 100.0), log("gone", 500.0)];

        let summary = build_summary(date!(2024 - 01 - 01), &logs, &products, None);
        assert_eq!(summary.consumed_items.len(), 1);
        assert_eq!(summary.total_calorie, 100.0);
    }

    #[test]
    fn multiple_entries_accumulate() {
        let products = product_map(vec![
            product("111", 100.0, 2.0, 3.0, 10.0),
            product("222", 400.0, 20.0, 8.0, 40.0),
        ]);
        let logs = vec![log("111", 200.0), log("222", 50.0), log("111", 100.0)];

        let summary = build_summary(date!(2024 - 01 - 01), &logs, &products, None);
        assert_eq!(summary.consumed_items.len(), 3);
        assert_eq!(summary.total_calorie, 200.0 + 200.0 + 100.0);
        assert_eq!(summary.total_fat, 4.0 + 10.0 + 2.0);
    }

    #[test]
    fn absent_macros_count_as_zero() {
        let mut p = test_product("111");
        p.energy_kcal_100g = Some(50.0);
        let products = product_map(vec![p]);

        let summary = build_summary(date!(2024 - 01 - 01), &[log("111", 100.0)], &products, None);
        assert_eq!(summary.total_calorie, 50.0);
        assert_eq!(summary.total_fat, 0.0);
        assert_eq!(summary.total_protein, 0.0);
    }

    #[test]
    fn goal_context_attached_when_target_positive() {
        let products = product_map(vec![product("111", 250.0, 5.0, 10.0, 30.0)]);
        let logs = vec![log("111", 150.0)];

        let summary = build_summary(date!(2024 - 01 - 01), &logs, &products, Some(2000.0));
        assert_eq!(summary.calorie_goal, Some(2000.0));
        assert_eq!(summary.calorie_remaining, Some(1625.0));
        assert!((summary.calorie_goal_percentage.unwrap() - 18.75).abs() < 1e-4);
    }

    #[test]
    fn non_positive_goal_is_ignored() {
        let products = product_map(vec![product("111", 250.0, 5.0, 10.0, 30.0)]);
        let logs = vec![log("111", 100.0)];

        let summary = build_summary(date!(2024 - 01 - 01), &logs, &products, Some(0.0));
        assert_eq!(summary.calorie_goal, None);
        assert_eq!(summary.calorie_remaining, None);
    }

    #[test]
    fn empty_day_produces_zeroed_summary() {
        let summary = build_summary(date!(2024 - 01 - 01), &[], &HashMap::new(), Some(1800.0));
        assert_eq!(summary.total_calorie, 0.0);
        assert!(summary.consumed_items.is_empty());
        assert_eq!(summary.calorie_remaining, Some(1800.0));
    }
}
