use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Пол участвует только в формуле калорий (ветка базового метаболизма).
///
/// Parsing is strict: anything other than male/female is rejected and the
/// onboarding step re-asks. There is no silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Gender::Male => "male",
            Gender::Female => "female",
        })
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "м" | "муж" | "мужской" => Ok(Gender::Male),
            "female" | "f" | "ж" | "жен" | "женский" => Ok(Gender::Female),
            other => Err(format!("неизвестный пол: {other}")),
        }
    }
}

/// Daily water goal in millilitres.
///
/// base = weight × 30, plus 500 ml per complete 30-minute activity block,
/// plus a heat surcharge (500 ml above 25 °C, 1000 ml from 30 °C).
/// The total is capped at 2500 ml.
pub fn water_goal(weight_kg: f64, activity_min: f64, temperature_c: f64) -> f64 {
    let base = weight_kg * 30.0;
    let activity_extra = (activity_min / 30.0).floor() * 500.0;
    let temp_extra = if temperature_c >= 30.0 {
        1000.0
    } else if temperature_c > 25.0 {
        500.0
    } else {
        0.0
    };
    (base + activity_extra + temp_extra).min(2500.0)
}

/// Daily calorie goal in kcal: Mifflin-St Jeor resting estimate plus a
/// coarse activity bonus (200 kcal from 30 min/day, 400 from 90). No cap.
pub fn calorie_goal(
    weight_kg: f64,
    height_cm: f64,
    age_years: f64,
    activity_min: f64,
    gender: Gender,
) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years
        + match gender {
            Gender::Male => 5.0,
            Gender::Female => -161.0,
        };
    let bonus = if activity_min >= 90.0 {
        400.0
    } else if activity_min >= 30.0 {
        200.0
    } else {
        0.0
    };
    base + bonus
}
