//! Calorie goal math: Mifflin–St Jeor BMR, activity-scaled TDEE, and a
//! goal-type adjustment, with a hard safety floor on the final target.

use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct GoalInput {
    pub weight: f32,
    pub height: f32,
    pub age: i32,
    pub gender: String,
    pub activity_level: i32,
    pub goal_type: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalComputation {
    pub bmr: f32,
    pub tdee: f32,
    pub daily_calorie_target: f32,
}

pub const GOAL_MAINTAIN: i32 = 0;
pub const GOAL_BULK: i32 = 1;
pub const GOAL_CUT: i32 = 2;

pub fn compute_goal(input: &GoalInput, current_year: i32) -> Result<GoalComputation, ApiError> {
    if input.weight <= 0.0 || input.height <= 0.0 || input.age <= 0 {
        return Err(ApiError::validation(
            "weight, height and age must be greater than zero",
        ));
    }
    if !(1..=5).contains(&input.activity_level) {
        return Err(ApiError::validation("activity level must be between 1 and 5"));
    }
    if !(GOAL_MAINTAIN..=GOAL_CUT).contains(&input.goal_type) {
        return Err(ApiError::validation("goal type must be between 0 and 2"));
    }

    let bmr = calculate_bmr(
        input.weight,
        input.height,
        input.age,
        &input.gender,
        current_year,
    );
    let tdee = bmr * activity_multiplier(input.activity_level);
    let mut daily_calorie_target = tdee + goal_adjustment(input.goal_type);

    // Never hand out a starvation-level target, no matter how extreme the
    // inputs were.
    if daily_calorie_target < 1000.0 {
        daily_calorie_target = 1200.0;
    }

    Ok(GoalComputation {
        bmr,
        tdee,
        daily_calorie_target,
    })
}

/// Mifflin–St Jeor: 10*kg + 6.25*cm − 5*age, +5 for men, −161 for women.
///
/// Some clients historically sent a birth year in the age field; values over
/// 1000 are reinterpreted as one. Legacy quirk, keep as-is.
fn calculate_bmr(weight_kg: f32, height_cm: f32, age: i32, gender: &str, current_year: i32) -> f32 {
    let age = if age > 1000 { current_year - age } else { age };
    let bmr = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age as f32;
    if gender.eq_ignore_ascii_case("female") {
        bmr - 161.0
    } else {
        bmr + 5.0
    }
}

fn activity_multiplier(level: i32) -> f32 {
    match level {
        1 => 1.2,
        2 => 1.375,
        3 => 1.55,
        4 => 1.725,
        5 => 1.9,
        _ => 1.2,
    }
}

fn goal_adjustment(goal_type: i32) -> f32 {
    match goal_type {
        GOAL_BULK => 400.0,
        GOAL_CUT => -400.0,
        _ => 0.0,
    }
}

pub fn activity_label(level: i32) -> &'static str {
    match level {
        1 => "Sedentary (desk job)",
        2 => "Lightly active (1-3 days/week)",
        3 => "Moderately active (3-5 days/week)",
        4 => "Very active (6-7 days/week)",
        5 => "Extra active (twice daily training)",
        _ => "Unknown",
    }
}

pub fn goal_label(goal_type: i32) -> &'static str {
    match goal_type {
        GOAL_BULK => "Muscle gain (bulk, +400 kcal)",
        GOAL_CUT => "Fat loss (cut, -400 kcal)",
        _ => "Maintenance",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(
        weight: f32,
        height: f32,
        age: i32,
        gender: &str,
        activity_level: i32,
        goal_type: i32,
    ) -> GoalInput {
        GoalInput {
            weight,
            height,
            age,
            gender: gender.to_string(),
            activity_level,
            goal_type,
        }
    }

    #[test]
    fn male_maintenance_reference_values() {
        let got =
            compute_goal(&input(80.0, 180.0, 30, "male", 3, GOAL_MAINTAIN), 2026).unwrap();
        // 10*80 + 6.25*180 - 5*30 + 5 = 1780
        assert_eq!(got.bmr, 1780.0);
        assert!((got.tdee - 1780.0 * 1.55).abs() < 1e-3);
        assert_eq!(got.daily_calorie_target, got.tdee);
    }

    #[test]
    fn female_offset_applies() {
        let male = compute_goal(&input(60.0, 165.0, 25, "male", 1, GOAL_MAINTAIN), 2026).unwrap();
        let female =
            compute_goal(&input(60.0, 165.0, 25, "Female", 1, GOAL_MAINTAIN), 2026).unwrap();
        assert!((male.bmr - female.bmr - 166.0).abs() < 1e-3);
    }

    #[test]
    fn bulk_and_cut_shift_the_target() {
        let base = compute_goal(&input(80.0, 180.0, 30, "male", 3, GOAL_MAINTAIN), 2026).unwrap();
        let bulk = compute_goal(&input(80.0, 180.0, 30, "male", 3, GOAL_BULK), 2026).unwrap();
        let cut = compute_goal(&input(80.0, 180.0, 30, "male", 3, GOAL_CUT), 2026).unwrap();
        assert!((bulk.daily_calorie_target - base.daily_calorie_target - 400.0).abs() < 1e-3);
        assert!((base.daily_calorie_target - cut.daily_calorie_target - 400.0).abs() < 1e-3);
    }

    #[test]
    fn deterministic_for_same_inputs() {
        let a = compute_goal(&input(72.5, 171.0, 41, "female", 4, GOAL_CUT), 2026).unwrap();
        let b = compute_goal(&input(72.5, 171.0, 41, "female", 4, GOAL_CUT), 2026).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn extreme_cut_hits_the_safety_floor() {
        let got = compute_goal(&input(40.0, 140.0, 70, "female", 1, GOAL_CUT), 2026).unwrap();
        // BMR = 400 + 875 - 350 - 161 = 764; TDEE = 916.8; cut target = 516.8
        assert!(got.tdee < 1000.0);
        assert_eq!(got.daily_calorie_target, 1200.0);
    }

    #[test]
    fn birth_year_is_reinterpreted_as_age() {
        let by_year = compute_goal(&input(80.0, 180.0, 1990, "male", 2, GOAL_MAINTAIN), 2026)
            .unwrap();
        let by_age = compute_goal(&input(80.0, 180.0, 36, "male", 2, GOAL_MAINTAIN), 2026).unwrap();
        assert_eq!(by_year, by_age);
    }

    #[test]
    fn rejects_non_positive_measurements() {
        assert!(compute_goal(&input(0.0, 180.0, 30, "male", 3, 0), 2026).is_err());
        assert!(compute_goal(&input(80.0, -1.0, 30, "male", 3, 0), 2026).is_err());
        assert!(compute_goal(&input(80.0, 180.0, 0, "male", 3, 0), 2026).is_err());
    }

    #[test]
    fn rejects_out_of_range_activity_and_goal() {
        assert!(compute_goal(&input(80.0, 180.0, 30, "male", 0, 0), 2026).is_err());
        assert!(compute_goal(&input(80.0, 180.0, 30, "male", 6, 0), 2026).is_err());
        assert!(compute_goal(&input(80.0, 180.0, 30, "male", 3, 3), 2026).is_err());
        assert!(compute_goal(&input(80.0, 180.0, 30, "male", 3, -1), 2026).is_err());
    }
}
