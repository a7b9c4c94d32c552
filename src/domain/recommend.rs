use serde::Serialize;

/// Справочные списки из оригинального бота; порядок фиксирован,
/// ничего не перемешиваем.
const LOW_CALORIE_FOODS: &[&str] = &["Огурцы", "Яблоки", "Салат", "Творог 0%"];
const HIGH_CALORIE_FOODS: &[&str] = &["Орехи", "Сыры", "Авокадо", "Шоколад"];
const ACTIVITIES: &[&str] = &["Ходьба 30 мин", "Бег 20 мин", "Плавание 15 мин", "Йога 40 мин"];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub foods: Vec<&'static str>,
    pub activity: &'static str,
    pub over_budget: bool,
}

/// Balance below zero means the calorie budget is spent: suggest the
/// low-calorie list and the gentle activity. Exactly zero counts as the
/// non-negative branch.
pub fn recommend(calorie_balance: f64) -> Recommendation {
    if calorie_balance < 0.0 {
        Recommendation {
            foods: LOW_CALORIE_FOODS.to_vec(),
            activity: ACTIVITIES[0],
            over_budget: true,
        }
    } else {
        Recommendation {
            foods: HIGH_CALORIE_FOODS.to_vec(),
            activity: ACTIVITIES[1],
            over_budget: false,
        }
    }
}
