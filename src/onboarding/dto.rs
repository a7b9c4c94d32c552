use serde::{Deserialize, Serialize};
use time::Date;

use crate::domain::goals::Gender;
use crate::domain::ledger::{DailyLedger, Profile};

#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub text: String,
}

/// Ответ диалога настройки: очередной вопрос либо итог с целями.
#[derive(Debug, Serialize)]
pub struct OnboardingReply {
    pub message: String,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileView>,
}

/// Эхо профиля для /profile и для итога настройки.
#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: f64,
    pub gender: Gender,
    pub activity_min_per_day: f64,
    pub city: String,
    pub current_date: Date,
    pub water_goal_ml: f64,
    pub calorie_goal_kcal: f64,
}

impl ProfileView {
    pub fn from_ledger(profile: &Profile, ledger: &DailyLedger) -> Self {
        Self {
            weight_kg: profile.weight_kg,
            height_cm: profile.height_cm,
            age_years: profile.age_years,
            gender: profile.gender,
            activity_min_per_day: profile.activity_min_per_day,
            city: profile.city.clone(),
            current_date: ledger.current_date(),
            water_goal_ml: ledger.water_goal_ml(),
            calorie_goal_kcal: ledger.calorie_goal_kcal(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub message: String,
    pub profile: ProfileView,
}
