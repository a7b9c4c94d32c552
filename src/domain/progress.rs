use serde::Serialize;
use time::Date;

use crate::domain::ledger::DailyLedger;
use crate::error::TrackerError;

/// Снимок дневного прогресса для ответа пользователю и для графика.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProgressSummary {
    pub water_logged_ml: f64,
    pub water_goal_ml: f64,
    pub water_remaining_ml: f64,
    pub calories_logged_kcal: f64,
    pub calorie_goal_kcal: f64,
    pub calories_burned_kcal: f64,
    /// goal − logged + burned; отрицательный — перебор за вычетом тренировок.
    pub calorie_balance_kcal: f64,
}

/// Reads the ledger into a summary. The only mutation is the day-rollover
/// side effect of `ensure_current`.
pub fn summarize(ledger: &mut DailyLedger, today: Date) -> Result<ProgressSummary, TrackerError> {
    if ledger.profile().is_none() {
        return Err(TrackerError::NoProfile);
    }
    ledger.ensure_current(today);
    let water_goal_ml = ledger.water_goal_ml();
    let water_logged_ml = ledger.logged_water_ml();
    let calorie_goal_kcal = ledger.calorie_goal_kcal();
    let calories_logged_kcal = ledger.logged_calories_kcal();
    let calories_burned_kcal = ledger.burned_calories_kcal();
    Ok(ProgressSummary {
        water_logged_ml,
        water_goal_ml,
        water_remaining_ml: (water_goal_ml - water_logged_ml).max(0.0),
        calories_logged_kcal,
        calorie_goal_kcal,
        calories_burned_kcal,
        calorie_balance_kcal: calorie_goal_kcal - calories_logged_kcal + calories_burned_kcal,
    })
}
