use std::time::Duration;

use anyhow::Context;
use axum::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

/// Источник температуры для расчёта водной цели. Контракт: всегда вернуть
/// число; любая проблема (сеть, неизвестный город, кривой ответ,
/// отсутствие ключа) деградирует в 0.0 °C. Ноль и «нет данных» здесь
/// неразличимы — осознанная потеря точности.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn temperature_c(&self, city: &str) -> f64;
}

#[derive(Debug, Deserialize)]
struct OpenWeatherResponse {
    cod: serde_json::Value, // API отдаёт то число, то строку
    main: Option<OpenWeatherMain>,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherMain {
    temp: f64,
}

/// Текущая погода через OpenWeatherMap (units=metric).
pub struct OpenWeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build weather http client")?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    async fn fetch(&self, city: &str) -> Option<f64> {
        let api_key = self.api_key.as_deref()?;
        let response = self
            .client
            .get(format!("{}/data/2.5/weather", self.base_url))
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .ok()?;
        let body: OpenWeatherResponse = response.json().await.ok()?;
        // cod != 200 — город не найден или ключ не принят
        let ok = match &body.cod {
            serde_json::Value::Number(n) => n.as_i64() == Some(200),
            serde_json::Value::String(s) => s == "200",
            _ => false,
        };
        if !ok {
            return None;
        }
        Some(body.main?.temp)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn temperature_c(&self, city: &str) -> f64 {
        match self.fetch(city).await {
            Some(temp) => {
                debug!(city, temp, "weather lookup ok");
                temp
            }
            None => {
                warn!(city, "weather lookup failed, falling back to 0.0 °C");
                0.0
            }
        }
    }
}
