use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Ошибки уровня трекера. Все восстановимые: пользователь получает
/// корректирующий ответ, состояние дневника не меняется.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// A command that needs a completed profile arrived before onboarding.
    #[error("профиль не настроен, сначала пройдите настройку профиля")]
    NoProfile,

    /// Unparseable or out-of-range numeric input; nothing is recorded.
    #[error("некорректное значение: {0}")]
    InvalidAmount(String),

    /// An onboarding answer failed validation; the step is re-asked and
    /// earlier answers are kept.
    #[error("{0}")]
    ProfileIncomplete(String),

    /// A dialogue reply arrived while no onboarding is in progress.
    #[error("настройка профиля не запущена")]
    NotOnboarding,

    /// Food lookup found no product with a positive calorie figure.
    #[error("не найдена калорийность для «{0}»")]
    FoodNotFound(String),

    /// Collaborator failure that could not be degraded to a fallback.
    #[error("внешний сервис недоступен: {0}")]
    ExternalLookup(String),
}

impl TrackerError {
    fn status(&self) -> StatusCode {
        match self {
            TrackerError::NoProfile | TrackerError::NotOnboarding => StatusCode::CONFLICT,
            TrackerError::InvalidAmount(_) | TrackerError::ProfileIncomplete(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            TrackerError::FoodNotFound(_) => StatusCode::NOT_FOUND,
            TrackerError::ExternalLookup(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for TrackerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "tracker error");
        } else {
            tracing::debug!(error = %self, "tracker error");
        }
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
