use serde::Serialize;

use super::calc::{activity_label, goal_label};
use super::repo::CalorieGoal;

#[derive(Debug, Serialize)]
pub struct GoalDetails {
    pub weight: f32,
    pub height: f32,
    pub age: i32,
    pub gender: String,
    pub activity_level: i32,
    pub activity_level_label: &'static str,
    pub goal_type: i32,
    pub goal_type_label: &'static str,
    pub bmr: f32,
    pub tdee: f32,
    pub daily_calorie_target: f32,
}

impl From<CalorieGoal> for GoalDetails {
    fn from(goal: CalorieGoal) -> Self {
        Self {
            weight: goal.weight,
            height: goal.height,
            age: goal.age,
            gender: goal.gender,
            activity_level: goal.activity_level,
            activity_level_label: activity_label(goal.activity_level),
            goal_type: goal.goal_type,
            goal_type_label: goal_label(goal.goal_type),
            bmr: goal.bmr,
            tdee: goal.tdee,
            daily_calorie_target: goal.daily_calorie_target,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GoalStatusResponse {
    pub has_goal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<GoalDetails>,
}
