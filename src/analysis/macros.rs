//! Macro-energy breakdown: what share of a product's per-100g energy comes
//! from fat, protein and carbohydrate.

use serde::Serialize;

use crate::products::repo::Product;

/// kcal per gram, Atwater factors.
const KCAL_PER_G_FAT: f64 = 9.0;
const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARB: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroBreakdown {
    pub energy_kcal_100g: f32,
    pub fat_percent: f64,
    pub protein_percent: f64,
    pub carb_percent: f64,
}

/// Missing masses count as zero here (aggregation boundary policy). With no
/// positive energy there is nothing to divide by, so every share is 0; the
/// shares also need not sum to 100 for inconsistent label data.
pub fn breakdown(product: &Product) -> MacroBreakdown {
    let total_kcal = product.energy_kcal_100g.unwrap_or(0.0);
    if total_kcal <= 0.0 {
        return MacroBreakdown {
            energy_kcal_100g: total_kcal,
            fat_percent: 0.0,
            protein_percent: 0.0,
            carb_percent: 0.0,
        };
    }

    let fat_kcal = f64::from(product.fat_100g.unwrap_or(0.0)) * KCAL_PER_G_FAT;
    let protein_kcal = f64::from(product.proteins_100g.unwrap_or(0.0)) * KCAL_PER_G_PROTEIN;
    let carb_kcal = f64::from(product.carbohydrates_100g.unwrap_or(0.0)) * KCAL_PER_G_CARB;
    let total = f64::from(total_kcal);

    MacroBreakdown {
        energy_kcal_100g: total_kcal,
        fat_percent: round1(fat_kcal / total * 100.0),
        protein_percent: round1(protein_kcal / total * 100.0),
        carb_percent: round1(carb_kcal / total * 100.0),
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::repo::test_product;

    #[test]
    fn reference_product_breakdown() {
        let mut p = test_product("1");
        p.energy_kcal_100g = Some(200.0);
        p.fat_100g = Some(10.0);
        p.proteins_100g = Some(5.0);
        p.carbohydrates_100g = Some(20.0);

        let b = breakdown(&p);
        assert_eq!(b.energy_kcal_100g, 200.0);
        assert_eq!(b.fat_percent, 45.0);
        assert_eq!(b.protein_percent, 10.0);
        assert_eq!(b.carb_percent, 40.0);
    }

    #[test]
    fn zero_energy_yields_zero_shares() {
        let mut p = test_product("2");
        p.energy_kcal_100g = Some(0.0);
        p.fat_100g = Some(10.0);

        let b = breakdown(&p);
        assert_eq!(b.energy_kcal_100g, 0.0);
        assert_eq!(b.fat_percent, 0.0);
        assert_eq!(b.protein_percent, 0.0);
        assert_eq!(b.carb_percent, 0.0);
    }

    #[test]
    fn absent_energy_reported_as_zero() {
        let p = test_product("3");
        let b = breakdown(&p);
        assert_eq!(b.energy_kcal_100g, 0.0);
        assert_eq!(b.fat_percent, 0.0);
    }

    #[test]
    fn absent_masses_count_as_zero() {
        let mut p = test_product("4");
        p.energy_kcal_100g = Some(100.0);
        p.proteins_100g = Some(10.0);

        let b = breakdown(&p);
        assert_eq!(b.fat_percent, 0.0);
        assert_eq!(b.protein_percent, 40.0);
        assert_eq!(b.carb_percent, 0.0);
    }

    #[test]
    fn shares_are_rounded_to_one_decimal() {
        let mut p = test_product("5");
        p.energy_kcal_100g = Some(300.0);
        p.fat_100g = Some(11.1);
        // 11.1 * 9 / 300 * 100 = 33.3
        let b = breakdown(&p);
        assert_eq!(b.fat_percent, 33.3);
    }
}
