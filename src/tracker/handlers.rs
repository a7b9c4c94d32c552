use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use time::OffsetDateTime;
use tracing::{error, info, instrument};

use crate::chart;
use crate::domain::{progress, recommend};
use crate::error::TrackerError;
use crate::state::AppState;
use crate::tracker::dto::{
    FoodGramsRequest, FoodGramsResponse, FoodLookupResponse, LogFoodRequest, LogWaterRequest,
    LogWorkoutRequest, ProgressResponse, RecommendResponse, WaterResponse, WorkoutResponse,
};
use crate::tracker::services;

/// POST /users/:id/water
#[instrument(skip(state, body))]
pub async fn log_water(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(body): Json<LogWaterRequest>,
) -> Result<Json<WaterResponse>, TrackerError> {
    let today = OffsetDateTime::now_utc().date();
    let session = state.store.get_or_create(user_id, today).await;
    let mut session = session.lock().await;

    session.ledger.log_water(body.amount_ml, today)?;
    let total_ml = session.ledger.logged_water_ml();
    let goal_ml = session.ledger.water_goal_ml();
    let remaining_ml = (goal_ml - total_ml).max(0.0);
    info!(user_id, amount_ml = body.amount_ml, total_ml, "water logged");
    Ok(Json(WaterResponse {
        message: format!(
            "Добавлено: {} мл. Всего: {total_ml:.1}/{goal_ml:.1}. Осталось: {remaining_ml:.1} мл.",
            body.amount_ml
        ),
        added_ml: body.amount_ml,
        total_ml,
        goal_ml,
        remaining_ml,
    }))
}

/// POST /users/:id/food — поиск продукта, первый шаг двухходовки.
#[instrument(skip(state, body))]
pub async fn log_food(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(body): Json<LogFoodRequest>,
) -> Result<Json<FoodLookupResponse>, TrackerError> {
    let today = OffsetDateTime::now_utc().date();
    let session = state.store.get_or_create(user_id, today).await;
    let mut session = session.lock().await;

    let hit = services::lookup_food(state.food.as_ref(), &mut session, &body.query).await?;
    info!(user_id, query = %body.query, name = %hit.name, "food found, awaiting grams");
    Ok(Json(FoodLookupResponse {
        message: format!(
            "Найдено: {}, {} ккал/100г. Сколько грамм съели?",
            hit.name, hit.calories_per_100g
        ),
        name: hit.name,
        calories_per_100g: hit.calories_per_100g,
    }))
}

/// POST /users/:id/food/grams — числовое сообщение с граммовкой.
#[instrument(skip(state, body))]
pub async fn food_grams(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(body): Json<FoodGramsRequest>,
) -> Result<Json<FoodGramsResponse>, TrackerError> {
    let today = OffsetDateTime::now_utc().date();
    let session = state.store.get_or_create(user_id, today).await;
    let mut session = session.lock().await;

    let record = services::consume_grams(&mut session, body.grams, today)?;
    let total_kcal = session.ledger.logged_calories_kcal();
    Ok(Json(match record {
        Some(record) => {
            info!(user_id, kcal = record.calories_kcal, "food recorded");
            FoodGramsResponse {
                message: format!(
                    "Записано: {:.1} ккал.\nВсего: {total_kcal:.1} ккал.",
                    record.calories_kcal
                ),
                recorded_kcal: Some(record.calories_kcal),
                total_kcal,
            }
        }
        None => FoodGramsResponse {
            message: "Нет ожидающего продукта, сначала найдите его поиском.".to_string(),
            recorded_kcal: None,
            total_kcal,
        },
    }))
}

/// POST /users/:id/workout
#[instrument(skip(state, body))]
pub async fn log_workout(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(body): Json<LogWorkoutRequest>,
) -> Result<Json<WorkoutResponse>, TrackerError> {
    let today = OffsetDateTime::now_utc().date();
    let session = state.store.get_or_create(user_id, today).await;
    let mut session = session.lock().await;

    let summary = session
        .ledger
        .log_workout(&body.workout_type, body.minutes, today)?;
    let total_burned_kcal = session.ledger.burned_calories_kcal();
    info!(
        user_id,
        workout_type = %body.workout_type,
        minutes = body.minutes,
        burned_kcal = summary.burned_kcal,
        "workout logged"
    );
    let mut message = format!(
        "{} {} мин. Сожжено ~{} ккал.",
        body.workout_type,
        body.minutes,
        summary.burned_kcal.round() as i64
    );
    if summary.extra_water_ml > 0.0 {
        message.push_str(&format!(
            " Дополнительно выпейте ~{} мл воды.",
            summary.extra_water_ml.round() as i64
        ));
    }
    Ok(Json(WorkoutResponse {
        message,
        burned_kcal: summary.burned_kcal,
        extra_water_ml: summary.extra_water_ml,
        total_burned_kcal,
    }))
}

/// GET /users/:id/progress
#[instrument(skip(state))]
pub async fn progress(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<ProgressResponse>, TrackerError> {
    let today = OffsetDateTime::now_utc().date();
    let session = state.store.get_or_create(user_id, today).await;
    let mut session = session.lock().await;

    let s = progress::summarize(&mut session.ledger, today)?;
    let message = format!(
        "Вода: {:.1}/{:.1} мл, осталось {:.1}\n\
         Калории: съедено {:.1}/{:.1}, сожжено {:.1}, баланс {:.1}",
        s.water_logged_ml,
        s.water_goal_ml,
        s.water_remaining_ml,
        s.calories_logged_kcal,
        s.calorie_goal_kcal,
        s.calories_burned_kcal,
        s.calorie_balance_kcal,
    );
    Ok(Json(ProgressResponse {
        message,
        progress: s,
    }))
}

/// GET /users/:id/progress/chart — PNG с двумя панелями.
#[instrument(skip(state))]
pub async fn progress_chart(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Response {
    let today = OffsetDateTime::now_utc().date();
    let session = state.store.get_or_create(user_id, today).await;
    let mut session = session.lock().await;

    let summary = match progress::summarize(&mut session.ledger, today) {
        Ok(s) => s,
        Err(e) => return e.into_response(),
    };
    match chart::render_progress_chart(&summary) {
        Ok(png) => (
            [(header::CONTENT_TYPE, "image/png")],
            Bytes::from(png),
        )
            .into_response(),
        Err(e) => {
            error!(user_id, error = %e, "chart rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "chart rendering failed").into_response()
        }
    }
}

/// GET /users/:id/recommendation
#[instrument(skip(state))]
pub async fn recommendation(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<RecommendResponse>, TrackerError> {
    let today = OffsetDateTime::now_utc().date();
    let session = state.store.get_or_create(user_id, today).await;
    let mut session = session.lock().await;

    let s = progress::summarize(&mut session.ledger, today)?;
    let r = recommend::recommend(s.calorie_balance_kcal);
    let food_line = if r.over_budget {
        format!("Добавьте больше низкокалорийных продуктов: {:?}", r.foods)
    } else {
        format!("Прибавьте что-то калорийное: {:?}", r.foods)
    };
    let activity_line = if r.over_budget {
        format!("Доп активность: {}", r.activity)
    } else {
        format!("Для формы: {}", r.activity)
    };
    Ok(Json(RecommendResponse {
        message: format!(
            "Баланс: {:.1} ккал\n{food_line}\n{activity_line}",
            s.calorie_balance_kcal
        ),
        calorie_balance_kcal: s.calorie_balance_kcal,
        foods: r.foods,
        activity: r.activity,
    }))
}
