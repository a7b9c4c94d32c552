use time::Date;

use crate::error::TrackerError;
use crate::external::food::{FoodHit, FoodProvider};
use crate::store::{PendingFoodEntry, UserSession};

/// Записанная порция: что съели и сколько это вышло калорий.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodRecord {
    pub name: String,
    pub calories_kcal: f64,
}

/// Первый шаг записи еды: поиск продукта. Успех оставляет в сессии
/// `PendingFoodEntry` (перетирая предыдущий), промах ничего не меняет.
pub async fn lookup_food(
    food: &dyn FoodProvider,
    session: &mut UserSession,
    query: &str,
) -> Result<FoodHit, TrackerError> {
    if session.ledger.profile().is_none() {
        return Err(TrackerError::NoProfile);
    }
    let query = query.trim();
    if query.is_empty() {
        return Err(TrackerError::InvalidAmount(
            "укажите название продукта".into(),
        ));
    }
    let hit = food
        .find_food(query)
        .await
        .ok_or_else(|| TrackerError::FoodNotFound(query.to_string()))?;
    session.pending_food = Some(PendingFoodEntry {
        name: hit.name.clone(),
        calories_per_100g: hit.calories_per_100g,
    });
    Ok(hit)
}

/// Второй шаг: граммовка. Потребляет ожидающий продукт ровно один раз;
/// без ожидающего продукта это no-op (`Ok(None)`). Некорректные граммы
/// не съедают pending — пользователь может повторить ввод.
pub fn consume_grams(
    session: &mut UserSession,
    grams: f64,
    today: Date,
) -> Result<Option<FoodRecord>, TrackerError> {
    // дата должна быть свежей и на no-op пути: вызывающий показывает итог дня
    session.ledger.ensure_current(today);
    if session.pending_food.is_none() {
        return Ok(None);
    }
    if !grams.is_finite() || grams < 0.0 {
        return Err(TrackerError::InvalidAmount(format!(
            "граммы должны быть неотрицательным числом, получено {grams}"
        )));
    }
    // забираем pending только после валидации, чтобы оставить шанс повторить
    let Some(entry) = session.pending_food.take() else {
        return Ok(None);
    };
    let calories_kcal = entry.calories_per_100g / 100.0 * grams;
    session.ledger.log_food(calories_kcal, today)?;
    Ok(Some(FoodRecord {
        name: entry.name,
        calories_kcal,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::goals::Gender;
    use crate::domain::ledger::{DailyLedger, Profile};
    use crate::store::UserSession;
    use axum::async_trait;
    use time::macros::date;

    struct StubFood(Option<FoodHit>);

    #[async_trait]
    impl FoodProvider for StubFood {
        async fn find_food(&self, _query: &str) -> Option<FoodHit> {
            self.0.clone()
        }
    }

    fn session_with_profile(today: Date) -> UserSession {
        let mut ledger = DailyLedger::new(today);
        ledger
            .complete_profile(
                Profile {
                    weight_kg: 70.0,
                    height_cm: 175.0,
                    age_years: 30.0,
                    gender: Gender::Male,
                    activity_min_per_day: 0.0,
                    city: "Тула".into(),
                },
                20.0,
                today,
            )
            .unwrap();
        UserSession {
            ledger,
            onboarding: None,
            pending_food: None,
        }
    }

    fn apple() -> FoodHit {
        FoodHit {
            name: "Яблоко".into(),
            calories_per_100g: 52.0,
        }
    }

    #[tokio::test]
    async fn lookup_requires_profile() {
        let today = date!(2025 - 01 - 15);
        let mut session = UserSession {
            ledger: DailyLedger::new(today),
            onboarding: None,
            pending_food: None,
        };
        let food = StubFood(Some(apple()));
        assert!(matches!(
            lookup_food(&food, &mut session, "яблоко").await,
            Err(TrackerError::NoProfile)
        ));
    }

    #[tokio::test]
    async fn miss_surfaces_not_found_and_keeps_state() {
        let today = date!(2025 - 01 - 15);
        let mut session = session_with_profile(today);
        let food = StubFood(None);
        assert!(matches!(
            lookup_food(&food, &mut session, "борщ").await,
            Err(TrackerError::FoodNotFound(_))
        ));
        assert!(session.pending_food.is_none());
    }

    #[tokio::test]
    async fn grams_consume_pending_exactly_once() {
        let today = date!(2025 - 01 - 15);
        let mut session = session_with_profile(today);
        let food = StubFood(Some(apple()));
        lookup_food(&food, &mut session, "яблоко").await.unwrap();

        let record = consume_grams(&mut session, 150.0, today).unwrap().unwrap();
        assert_eq!(record.calories_kcal, 78.0); // 52/100 * 150
        assert_eq!(session.ledger.logged_calories_kcal(), 78.0);
        assert!(session.pending_food.is_none());

        // второе числовое сообщение без нового поиска — no-op
        assert_eq!(consume_grams(&mut session, 150.0, today).unwrap(), None);
        assert_eq!(session.ledger.logged_calories_kcal(), 78.0);
    }

    #[tokio::test]
    async fn invalid_grams_keep_pending_for_retry() {
        let today = date!(2025 - 01 - 15);
        let mut session = session_with_profile(today);
        let food = StubFood(Some(apple()));
        lookup_food(&food, &mut session, "яблоко").await.unwrap();

        assert!(matches!(
            consume_grams(&mut session, -1.0, today),
            Err(TrackerError::InvalidAmount(_))
        ));
        assert!(session.pending_food.is_some());
        assert!(consume_grams(&mut session, 100.0, today).unwrap().is_some());
    }

    #[tokio::test]
    async fn no_op_grams_still_roll_the_day() {
        let yesterday = date!(2025 - 01 - 14);
        let today = date!(2025 - 01 - 15);
        let mut session = session_with_profile(yesterday);
        lookup_food(&StubFood(Some(apple())), &mut session, "яблоко")
            .await
            .unwrap();
        consume_grams(&mut session, 200.0, yesterday).unwrap();
        assert_eq!(session.ledger.logged_calories_kcal(), 104.0);

        // первое сообщение нового дня без pending: счётчик уже обнулён
        assert_eq!(consume_grams(&mut session, 50.0, today).unwrap(), None);
        assert_eq!(session.ledger.logged_calories_kcal(), 0.0);
        assert_eq!(session.ledger.current_date(), today);
    }

    #[tokio::test]
    async fn newer_lookup_overwrites_pending() {
        let today = date!(2025 - 01 - 15);
        let mut session = session_with_profile(today);
        lookup_food(&StubFood(Some(apple())), &mut session, "яблоко")
            .await
            .unwrap();
        lookup_food(
            &StubFood(Some(FoodHit {
                name: "Творог".into(),
                calories_per_100g: 120.0,
            })),
            &mut session,
            "творог",
        )
        .await
        .unwrap();

        let record = consume_grams(&mut session, 100.0, today).unwrap().unwrap();
        assert_eq!(record.name, "Творог");
        assert_eq!(record.calories_kcal, 120.0);
    }
}
