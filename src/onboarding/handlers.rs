use axum::{
    extract::{Path, State},
    Json,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use crate::error::TrackerError;
use crate::onboarding::dto::{OnboardingReply, ProfileResponse, ProfileView, ReplyRequest};
use crate::onboarding::machine::{Onboarding, StepOutcome};
use crate::state::AppState;

/// POST /users/:id/onboarding — начать (или перезапустить) настройку
/// профиля. Дневник при этом не трогаем: до завершения диалога действует
/// старый профиль, если он был.
#[instrument(skip(state))]
pub async fn start(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Json<OnboardingReply> {
    let today = OffsetDateTime::now_utc().date();
    let session = state.store.get_or_create(user_id, today).await;
    let mut session = session.lock().await;

    let machine = Onboarding::start();
    let prompt = machine.prompt();
    session.onboarding = Some(machine);
    info!(user_id, "onboarding started");
    Json(OnboardingReply {
        message: prompt.to_string(),
        done: false,
        profile: None,
    })
}

/// POST /users/:id/onboarding/reply — один ответ пользователя. Последний
/// шаг семплирует погоду (единственный раз) и фиксирует цели в дневнике.
#[instrument(skip(state, body))]
pub async fn reply(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(body): Json<ReplyRequest>,
) -> Result<Json<OnboardingReply>, TrackerError> {
    let today = OffsetDateTime::now_utc().date();
    let session = state.store.get_or_create(user_id, today).await;
    let mut session = session.lock().await;

    let machine = session.onboarding.take().ok_or(TrackerError::NotOnboarding)?;
    match machine.reply(&body.text) {
        Ok(StepOutcome::Next { machine, prompt }) => {
            session.onboarding = Some(machine);
            Ok(Json(OnboardingReply {
                message: prompt.to_string(),
                done: false,
                profile: None,
            }))
        }
        Ok(StepOutcome::Complete(profile)) => {
            let temperature_c = state.weather.temperature_c(&profile.city).await;
            session
                .ledger
                .complete_profile(profile, temperature_c, today)?;
            // после complete_profile профиль гарантированно есть
            let view = session
                .ledger
                .profile()
                .map(|p| ProfileView::from_ledger(p, &session.ledger))
                .ok_or(TrackerError::NoProfile)?;
            info!(user_id, city = %view.city, temperature_c, "profile completed");
            let message = format!(
                "Профиль сохранён!\n\
                 Вес: {} кг, Рост: {} см, Возраст: {}, Пол: {}\n\
                 Активность: {} мин/день\n\
                 Город: {}, Температура: ~{temperature_c} °C\n\
                 Вода: ~{} мл, Калории: ~{} ккал",
                view.weight_kg,
                view.height_cm,
                view.age_years,
                view.gender,
                view.activity_min_per_day,
                view.city,
                view.water_goal_ml.round() as i64,
                view.calorie_goal_kcal.round() as i64,
            );
            Ok(Json(OnboardingReply {
                message,
                done: true,
                profile: Some(view),
            }))
        }
        Err((machine, err)) => {
            // шаг не пройден: машина возвращается на место, ответ — повтор вопроса
            session.onboarding = Some(machine);
            Err(err)
        }
    }
}

/// DELETE /users/:id/onboarding — отмена из любого шага, идемпотентна.
#[instrument(skip(state))]
pub async fn cancel(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Json<OnboardingReply> {
    let today = OffsetDateTime::now_utc().date();
    let session = state.store.get_or_create(user_id, today).await;
    let mut session = session.lock().await;
    if session.onboarding.take().is_some() {
        info!(user_id, "onboarding cancelled");
    }
    Json(OnboardingReply {
        message: "Операция отменена.".to_string(),
        done: false,
        profile: None,
    })
}

/// GET /users/:id/profile — текущий профиль и цели.
#[instrument(skip(state))]
pub async fn profile(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<ProfileResponse>, TrackerError> {
    let today = OffsetDateTime::now_utc().date();
    let session = state.store.get_or_create(user_id, today).await;
    let session = session.lock().await;

    let profile = session.ledger.profile().ok_or(TrackerError::NoProfile)?;
    let view = ProfileView::from_ledger(profile, &session.ledger);
    let message = format!(
        "Вес: {} кг, Рост: {} см, Возраст: {}, Пол: {}\n\
         Активность: {} мин/д\n\
         Город: {}, Дата: {}\n\
         Вода: {} мл, Калории: {} ккал",
        view.weight_kg,
        view.height_cm,
        view.age_years,
        view.gender,
        view.activity_min_per_day,
        view.city,
        view.current_date,
        view.water_goal_ml,
        view.calorie_goal_kcal,
    );
    Ok(Json(ProfileResponse {
        message,
        profile: view,
    }))
}
