use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::external::food::{FoodProvider, OpenFoodFactsClient};
use crate::external::weather::{OpenWeatherClient, WeatherProvider};
use crate::store::UserStore;

#[derive(Clone)]
pub struct AppState {
    pub store: UserStore,
    pub config: Arc<AppConfig>,
    pub weather: Arc<dyn WeatherProvider>,
    pub food: Arc<dyn FoodProvider>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        if config.openweather_api_key.is_none() {
            tracing::warn!("OPENWEATHER_API_KEY is not set; water goals will assume 0.0 °C");
        }
        let timeout = Duration::from_secs(config.lookup_timeout_secs);

        let weather = Arc::new(OpenWeatherClient::new(
            config.weather_base_url.clone(),
            config.openweather_api_key.clone(),
            timeout,
        )?) as Arc<dyn WeatherProvider>;
        let food = Arc::new(OpenFoodFactsClient::new(
            config.food_base_url.clone(),
            timeout,
        )?) as Arc<dyn FoodProvider>;

        Ok(Self {
            store: UserStore::new(),
            config,
            weather,
            food,
        })
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        weather: Arc<dyn WeatherProvider>,
        food: Arc<dyn FoodProvider>,
    ) -> Self {
        Self {
            store: UserStore::new(),
            config,
            weather,
            food,
        }
    }

    /// Состояние со стабильными заглушками вместо внешних сервисов.
    pub fn fake() -> Self {
        use crate::external::food::FoodHit;
        use axum::async_trait;

        struct FakeWeather;
        #[async_trait]
        impl WeatherProvider for FakeWeather {
            async fn temperature_c(&self, _city: &str) -> f64 {
                20.0
            }
        }

        struct FakeFood;
        #[async_trait]
        impl FoodProvider for FakeFood {
            async fn find_food(&self, query: &str) -> Option<FoodHit> {
                let q = query.to_lowercase();
                if q.contains("яблоко") || q.contains("apple") {
                    Some(FoodHit {
                        name: "Яблоко".into(),
                        calories_per_100g: 52.0,
                    })
                } else {
                    None
                }
            }
        }

        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            openweather_api_key: None,
            weather_base_url: "http://fake.local".into(),
            food_base_url: "http://fake.local".into(),
            lookup_timeout_secs: 1,
        });

        Self {
            store: UserStore::new(),
            config,
            weather: Arc::new(FakeWeather),
            food: Arc::new(FakeFood),
        }
    }
}
