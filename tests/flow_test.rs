use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use hydrocal::app::build_app;
use hydrocal::state::AppState;

fn app() -> Router {
    build_app(AppState::fake())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&v).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn onboard(app: &Router, user: i64) {
    let res = send(app, "POST", &format!("/api/v1/users/{user}/onboarding"), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    for answer in ["70", "175", "30", "male", "45"] {
        let res = send(
            app,
            "POST",
            &format!("/api/v1/users/{user}/onboarding/reply"),
            Some(json!({ "text": answer })),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["done"], json!(false));
    }
    let res = send(
        app,
        "POST",
        &format!("/api/v1/users/{user}/onboarding/reply"),
        Some(json!({ "text": "Москва" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["done"], json!(true));
    // вес 70, активность 45, фейковая погода 20 °C: 2100 + 500 → срез 2500
    assert_eq!(body["profile"]["water_goal_ml"], json!(2500.0));
    assert_eq!(body["profile"]["calorie_goal_kcal"], json!(1873.75));
}

#[tokio::test]
async fn health_works() {
    let app = app();
    let res = send(&app, "GET", "/api/v1/health", None).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn full_day_flow() {
    let app = app();
    onboard(&app, 1).await;

    let res = send(
        &app,
        "POST",
        "/api/v1/users/1/water",
        Some(json!({ "amount_ml": 500.0 })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["total_ml"], json!(500.0));
    assert_eq!(body["remaining_ml"], json!(2000.0));

    // еда в два шага
    let res = send(
        &app,
        "POST",
        "/api/v1/users/1/food",
        Some(json!({ "query": "яблоко" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["calories_per_100g"], json!(52.0));

    let res = send(
        &app,
        "POST",
        "/api/v1/users/1/food/grams",
        Some(json!({ "grams": 150.0 })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["recorded_kcal"], json!(78.0));

    // повторная граммовка без нового поиска ничего не пишет
    let res = send(
        &app,
        "POST",
        "/api/v1/users/1/food/grams",
        Some(json!({ "grams": 150.0 })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert!(body.get("recorded_kcal").is_none());
    assert_eq!(body["total_kcal"], json!(78.0));

    let res = send(
        &app,
        "POST",
        "/api/v1/users/1/workout",
        Some(json!({ "workout_type": "бег", "minutes": 60.0 })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["burned_kcal"], json!(686.0));
    assert_eq!(body["extra_water_ml"], json!(200.0));

    let res = send(&app, "GET", "/api/v1/users/1/progress", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["progress"]["water_logged_ml"], json!(500.0));
    assert_eq!(body["progress"]["calories_logged_kcal"], json!(78.0));
    assert_eq!(body["progress"]["calories_burned_kcal"], json!(686.0));
    assert_eq!(
        body["progress"]["calorie_balance_kcal"],
        json!(1873.75 - 78.0 + 686.0)
    );

    // баланс положительный — ветка калорийных продуктов
    let res = send(&app, "GET", "/api/v1/users/1/recommendation", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["foods"][0], json!("Орехи"));
    assert_eq!(body["activity"], json!("Бег 20 мин"));
}

#[tokio::test]
async fn chart_returns_png() {
    let app = app();
    onboard(&app, 2).await;
    let res = send(&app, "GET", "/api/v1/users/2/progress/chart", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[tokio::test]
async fn commands_without_profile_are_rejected() {
    let app = app();
    let res = send(
        &app,
        "POST",
        "/api/v1/users/9/water",
        Some(json!({ "amount_ml": 100.0 })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = send(&app, "GET", "/api/v1/users/9/progress", None).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = send(&app, "GET", "/api/v1/users/9/profile", None).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn reply_without_onboarding_conflicts() {
    let app = app();
    let res = send(
        &app,
        "POST",
        "/api/v1/users/5/onboarding/reply",
        Some(json!({ "text": "70" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn bad_step_answer_re_prompts_and_keeps_progress() {
    let app = app();
    send(&app, "POST", "/api/v1/users/6/onboarding", None).await;
    let res = send(
        &app,
        "POST",
        "/api/v1/users/6/onboarding/reply",
        Some(json!({ "text": "семьдесят" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // диалог жив, число принимается
    let res = send(
        &app,
        "POST",
        "/api/v1/users/6/onboarding/reply",
        Some(json!({ "text": "70" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["message"], json!("Введите рост (см):"));
}

#[tokio::test]
async fn cancel_aborts_onboarding_without_touching_profile() {
    let app = app();
    onboard(&app, 7).await;

    // перезапускаем диалог и отменяем — старый профиль остаётся
    send(&app, "POST", "/api/v1/users/7/onboarding", None).await;
    let res = send(&app, "DELETE", "/api/v1/users/7/onboarding", None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = send(&app, "GET", "/api/v1/users/7/profile", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["profile"]["city"], json!("Москва"));

    // а ответ после отмены — конфликт
    let res = send(
        &app,
        "POST",
        "/api/v1/users/7/onboarding/reply",
        Some(json!({ "text": "70" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn unknown_food_is_404_and_leaves_no_pending() {
    let app = app();
    onboard(&app, 8).await;

    let res = send(
        &app,
        "POST",
        "/api/v1/users/8/food",
        Some(json!({ "query": "борщ" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send(
        &app,
        "POST",
        "/api/v1/users/8/food/grams",
        Some(json!({ "grams": 100.0 })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert!(body.get("recorded_kcal").is_none());
}

#[tokio::test]
async fn invalid_amounts_are_unprocessable() {
    let app = app();
    onboard(&app, 10).await;

    let res = send(
        &app,
        "POST",
        "/api/v1/users/10/water",
        Some(json!({ "amount_ml": -50.0 })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let res = send(
        &app,
        "POST",
        "/api/v1/users/10/workout",
        Some(json!({ "workout_type": "бег", "minutes": 0.0 })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
