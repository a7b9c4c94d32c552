use std::time::Duration;

use anyhow::Context;
use axum::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

/// Результат поиска продукта: имя и калорийность на 100 г.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodHit {
    pub name: String,
    pub calories_per_100g: f64,
}

/// Справочник калорийности. `None` — ничего подходящего не нашли либо
/// сервис недоступен; вызывающий показывает «не найдено», а не ошибку.
#[async_trait]
pub trait FoodProvider: Send + Sync {
    async fn find_food(&self, query: &str) -> Option<FoodHit>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct Product {
    product_name: Option<String>,
    #[serde(default)]
    nutriments: Nutriments,
}

#[derive(Debug, Default, Deserialize)]
struct Nutriments {
    #[serde(rename = "energy-kcal_100g")]
    energy_kcal_100g: Option<f64>,
}

/// Поиск по OpenFoodFacts: берём первый из пяти верхних результатов
/// со строго положительной калорийностью.
pub struct OpenFoodFactsClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenFoodFactsClient {
    pub fn new(base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build food http client")?;
        Ok(Self { client, base_url })
    }

    async fn search(&self, query: &str) -> Option<FoodHit> {
        let response = self
            .client
            .get(format!("{}/cgi/search.pl", self.base_url))
            .query(&[
                ("action", "process"),
                ("search_terms", query),
                ("json", "true"),
            ])
            .send()
            .await
            .ok()?;
        let body: SearchResponse = response.json().await.ok()?;
        body.products.into_iter().take(5).find_map(|p| {
            let calories = p.nutriments.energy_kcal_100g?;
            if calories > 0.0 {
                Some(FoodHit {
                    name: p.product_name.unwrap_or_else(|| "Неизвестно".to_string()),
                    calories_per_100g: calories,
                })
            } else {
                None
            }
        })
    }
}

#[async_trait]
impl FoodProvider for OpenFoodFactsClient {
    async fn find_food(&self, query: &str) -> Option<FoodHit> {
        match self.search(query).await {
            Some(hit) => {
                debug!(query, name = %hit.name, kcal = hit.calories_per_100g, "food lookup ok");
                Some(hit)
            }
            None => {
                warn!(query, "food lookup returned nothing usable");
                None
            }
        }
    }
}
