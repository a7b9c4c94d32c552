use serde::Serialize;
use time::Date;

use crate::domain::goals::{self, Gender};
use crate::error::TrackerError;

/// Физиологический профиль. Создаётся один раз по завершении настройки;
/// заменить можно только новым полным прохождением диалога.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: f64,
    pub gender: Gender,
    pub activity_min_per_day: f64,
    pub city: String,
}

impl Profile {
    pub fn validate(&self) -> Result<(), TrackerError> {
        if !(self.weight_kg.is_finite() && self.weight_kg > 0.0) {
            return Err(TrackerError::ProfileIncomplete(
                "вес должен быть положительным числом".into(),
            ));
        }
        if !(self.height_cm.is_finite() && self.height_cm > 0.0) {
            return Err(TrackerError::ProfileIncomplete(
                "рост должен быть положительным числом".into(),
            ));
        }
        if !(self.age_years.is_finite() && self.age_years > 0.0) {
            return Err(TrackerError::ProfileIncomplete(
                "возраст должен быть положительным числом".into(),
            ));
        }
        if !(self.activity_min_per_day.is_finite() && self.activity_min_per_day >= 0.0) {
            return Err(TrackerError::ProfileIncomplete(
                "активность не может быть отрицательной".into(),
            ));
        }
        if self.city.trim().is_empty() {
            return Err(TrackerError::ProfileIncomplete(
                "город не может быть пустым".into(),
            ));
        }
        Ok(())
    }
}

/// MET по типам тренировок, регистронезависимо, русские и английские
/// названия. Неизвестный тип получает 5.0 — осознанный запасной вариант,
/// не ошибка.
const MET_TABLE: &[(&str, f64)] = &[
    ("running", 9.8),
    ("бег", 9.8),
    ("walking", 3.5),
    ("ходьба", 3.5),
    ("swimming", 7.0),
    ("плавание", 7.0),
    ("cycling", 6.0),
    ("велосипед", 6.0),
    ("yoga", 3.0),
    ("йога", 3.0),
];

const DEFAULT_MET: f64 = 5.0;

pub fn met_for(workout_type: &str) -> f64 {
    let key = workout_type.trim().to_lowercase();
    MET_TABLE
        .iter()
        .find(|(name, _)| *name == key)
        .map_or(DEFAULT_MET, |(_, met)| *met)
}

/// Итог записи тренировки: сожжённые калории идут в дневник, совет по
/// дополнительной воде — только в ответ пользователю.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorkoutSummary {
    pub burned_kcal: f64,
    pub extra_water_ml: f64,
}

/// Дневник одного пользователя: профиль, цели и три дневных счётчика.
///
/// Счётчики живут в пределах одной календарной даты. Любая операция,
/// которая их читает или пишет, первым делом вызывает `ensure_current`,
/// так что после смены даты все три обнуляются одновременно.
#[derive(Debug, Clone)]
pub struct DailyLedger {
    profile: Option<Profile>,
    current_date: Date,
    water_goal_ml: f64,
    calorie_goal_kcal: f64,
    logged_water_ml: f64,
    logged_calories_kcal: f64,
    burned_calories_kcal: f64,
}

impl DailyLedger {
    pub fn new(today: Date) -> Self {
        Self {
            profile: None,
            current_date: today,
            water_goal_ml: 0.0,
            calorie_goal_kcal: 0.0,
            logged_water_ml: 0.0,
            logged_calories_kcal: 0.0,
            burned_calories_kcal: 0.0,
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn current_date(&self) -> Date {
        self.current_date
    }

    pub fn water_goal_ml(&self) -> f64 {
        self.water_goal_ml
    }

    pub fn calorie_goal_kcal(&self) -> f64 {
        self.calorie_goal_kcal
    }

    pub fn logged_water_ml(&self) -> f64 {
        self.logged_water_ml
    }

    pub fn logged_calories_kcal(&self) -> f64 {
        self.logged_calories_kcal
    }

    pub fn burned_calories_kcal(&self) -> f64 {
        self.burned_calories_kcal
    }

    /// Day-rollover check. Resets all three accumulators together when the
    /// anchor date is stale; a second call on the same day changes nothing.
    pub fn ensure_current(&mut self, today: Date) {
        if self.current_date != today {
            tracing::debug!(from = %self.current_date, to = %today, "day rollover, resetting counters");
            self.current_date = today;
            self.logged_water_ml = 0.0;
            self.logged_calories_kcal = 0.0;
            self.burned_calories_kcal = 0.0;
        }
    }

    /// Завершение настройки: профиль валидируется, обе цели считаются один
    /// раз по единственному замеру температуры, счётчики обнуляются.
    /// Цели дальше не пересчитываются — погода семплируется только здесь.
    pub fn complete_profile(
        &mut self,
        profile: Profile,
        temperature_c: f64,
        today: Date,
    ) -> Result<(), TrackerError> {
        profile.validate()?;
        self.water_goal_ml = goals::water_goal(
            profile.weight_kg,
            profile.activity_min_per_day,
            temperature_c,
        );
        self.calorie_goal_kcal = goals::calorie_goal(
            profile.weight_kg,
            profile.height_cm,
            profile.age_years,
            profile.activity_min_per_day,
            profile.gender,
        );
        self.profile = Some(profile);
        self.current_date = today;
        self.logged_water_ml = 0.0;
        self.logged_calories_kcal = 0.0;
        self.burned_calories_kcal = 0.0;
        Ok(())
    }

    fn require_profile(&self) -> Result<&Profile, TrackerError> {
        self.profile.as_ref().ok_or(TrackerError::NoProfile)
    }

    pub fn log_water(&mut self, amount_ml: f64, today: Date) -> Result<(), TrackerError> {
        self.require_profile()?;
        if !amount_ml.is_finite() || amount_ml < 0.0 {
            return Err(TrackerError::InvalidAmount(format!(
                "объём воды должен быть неотрицательным числом, получено {amount_ml}"
            )));
        }
        self.ensure_current(today);
        self.logged_water_ml += amount_ml;
        Ok(())
    }

    pub fn log_food(&mut self, calories_kcal: f64, today: Date) -> Result<(), TrackerError> {
        self.require_profile()?;
        if !calories_kcal.is_finite() || calories_kcal < 0.0 {
            return Err(TrackerError::InvalidAmount(format!(
                "калории должны быть неотрицательным числом, получено {calories_kcal}"
            )));
        }
        self.ensure_current(today);
        self.logged_calories_kcal += calories_kcal;
        Ok(())
    }

    pub fn log_workout(
        &mut self,
        workout_type: &str,
        minutes: f64,
        today: Date,
    ) -> Result<WorkoutSummary, TrackerError> {
        let weight_kg = self.require_profile()?.weight_kg;
        if !minutes.is_finite() || minutes <= 0.0 {
            return Err(TrackerError::InvalidAmount(format!(
                "минуты тренировки должны быть положительным числом, получено {minutes}"
            )));
        }
        self.ensure_current(today);
        let met = met_for(workout_type);
        let burned_kcal = met * weight_kg * (minutes / 60.0);
        self.burned_calories_kcal += burned_kcal;
        let extra_water_ml = 200.0 * (minutes / 30.0).floor();
        Ok(WorkoutSummary {
            burned_kcal,
            extra_water_ml,
        })
    }
}
