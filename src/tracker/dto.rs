use serde::{Deserialize, Serialize};

use crate::domain::progress::ProgressSummary;

#[derive(Debug, Deserialize)]
pub struct LogWaterRequest {
    pub amount_ml: f64,
}

#[derive(Debug, Serialize)]
pub struct WaterResponse {
    pub message: String,
    pub added_ml: f64,
    pub total_ml: f64,
    pub goal_ml: f64,
    pub remaining_ml: f64,
}

#[derive(Debug, Deserialize)]
pub struct LogFoodRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct FoodLookupResponse {
    pub message: String,
    pub name: String,
    pub calories_per_100g: f64,
}

#[derive(Debug, Deserialize)]
pub struct FoodGramsRequest {
    pub grams: f64,
}

#[derive(Debug, Serialize)]
pub struct FoodGramsResponse {
    pub message: String,
    /// `None` — ожидающего продукта не было, ничего не записано.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_kcal: Option<f64>,
    pub total_kcal: f64,
}

#[derive(Debug, Deserialize)]
pub struct LogWorkoutRequest {
    pub workout_type: String,
    pub minutes: f64,
}

#[derive(Debug, Serialize)]
pub struct WorkoutResponse {
    pub message: String,
    pub burned_kcal: f64,
    /// Совет по дополнительной воде; в дневник не попадает.
    pub extra_water_ml: f64,
    pub total_burned_kcal: f64,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub message: String,
    pub progress: ProgressSummary,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub message: String,
    pub calorie_balance_kcal: f64,
    pub foods: Vec<&'static str>,
    pub activity: &'static str,
}
