use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Без ключа погодный клиент честно деградирует в 0.0 °C.
    pub openweather_api_key: Option<String>,
    pub weather_base_url: String,
    pub food_base_url: String,
    pub lookup_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("APP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(8080),
            openweather_api_key: std::env::var("OPENWEATHER_API_KEY").ok(),
            weather_base_url: std::env::var("WEATHER_BASE_URL")
                .unwrap_or_else(|_| "https://api.openweathermap.org".into()),
            food_base_url: std::env::var("FOOD_BASE_URL")
                .unwrap_or_else(|_| "https://world.openfoodfacts.org".into()),
            lookup_timeout_secs: std::env::var("LOOKUP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(5),
        })
    }
}
