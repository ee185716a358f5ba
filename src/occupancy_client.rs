//! occupancy_client.rs
//!
//! Клиент внешнего сервиса занятости мест. Один GET-запрос с ключом сеанса
//! (cinemaId, screenId, date, time) возвращает список занятых мест и,
//! опционально, авторитетные размеры сетки зала.
//!
//! Политика отказов фиксирована: любой неуспешный статус и любая транспортная
//! ошибка трактуются выше по стеку как "занятых мест не известно" (fail-open),
//! без повторов.

use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::OccupancyConfig;
use crate::models::ShowingKey;

/// Ответ сервиса занятости. Все поля опциональны: отсутствующий
/// `takenSeats` означает пустой список, отсутствующие размеры — что
/// авторитетными остаются локально известные rows/cols.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OccupancyResponse {
    #[serde(rename = "takenSeats")]
    pub taken_seats: Option<Vec<String>>,
    #[serde(rename = "rowsCount")]
    pub rows_count: Option<u32>,
    #[serde(rename = "colsCount")]
    pub cols_count: Option<u32>,
}

#[derive(Debug, thiserror::Error)]
pub enum OccupancyError {
    #[error("occupancy request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("occupancy service returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Клиент для запросов занятости мест.
#[derive(Clone)]
pub struct OccupancyClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl OccupancyClient {
    pub fn from_config(config: &OccupancyConfig) -> Self {
        Self {
            base_url: config.seat_api_url.clone(),
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_seconds))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Запрашивает занятые места по полному ключу сеанса.
    /// Ключ уезжает query-параметрами в camelCase, дата — ISO `YYYY-MM-DD`.
    pub async fn fetch_taken(&self, key: &ShowingKey) -> Result<OccupancyResponse, OccupancyError> {
        debug!(
            "fetching occupancy: cinema={}, screen={}, date={}, time={}",
            key.cinema_id, key.screen_id, key.date, key.time
        );

        let response = self
            .http_client
            .get(&self.base_url)
            .query(key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(OccupancyError::Status(response.status()));
        }

        Ok(response.json::<OccupancyResponse>().await?)
    }
}
