//! Health score: a weighted blend of the NOVA processing group (40%) and a
//! nutrient quality sub-score (60%). The nutrient side prefers the official
//! letter grade and only falls back to the qualitative low/moderate/high
//! tags when no grade exists.

use crate::products::repo::Product;

pub const HEALTHY_THRESHOLD: i32 = 70;

const NOVA_WEIGHT: f64 = 0.40;
const NUTRIENT_WEIGHT: f64 = 0.60;

pub fn health_score(product: &Product) -> i32 {
    let nova = nova_score(product.nova_group.as_deref());
    let nutrient = match product.nutrition_grades.as_deref() {
        Some(grade) if !grade.is_empty() => grade_score(grade),
        _ => manual_nutrient_score(product),
    };
    (nova * NOVA_WEIGHT + nutrient * NUTRIENT_WEIGHT).round() as i32
}

pub fn is_healthy(score: i32) -> bool {
    score >= HEALTHY_THRESHOLD
}

fn nova_score(group: Option<&str>) -> f64 {
    match group {
        Some("1") => 100.0,
        Some("2") => 70.0,
        Some("3") => 40.0,
        Some("4") => 0.0,
        _ => 50.0,
    }
}

fn grade_score(grade: &str) -> f64 {
    match grade.to_lowercase().as_str() {
        "a" => 100.0,
        "b" => 80.0,
        "c" => 60.0,
        "d" => 40.0,
        "e" => 20.0,
        _ => 0.0,
    }
}

/// Average of the four qualitative tags. A missing tag counts as 50, but a
/// product with no tags at all scores 0 rather than 50; that asymmetry is
/// intentional and matches the shipped behavior.
fn manual_nutrient_score(product: &Product) -> f64 {
    let levels = [
        product.fat_level.as_deref(),
        product.salt_level.as_deref(),
        product.saturated_fat_level.as_deref(),
        product.sugars_level.as_deref(),
    ];
    if levels.iter().all(|l| l.is_none()) {
        return 0.0;
    }
    let total: f64 = levels.iter().map(|l| level_score(*l)).sum();
    total / levels.len() as f64
}

fn level_score(level: Option<&str>) -> f64 {
    match level.map(|l| l.to_lowercase()).as_deref() {
        Some("low") => 100.0,
        Some("moderate") => 50.0,
        Some("high") => 0.0,
        _ => 50.0,
    }
}
