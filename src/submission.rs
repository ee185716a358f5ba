//! Финальный шаг бронирования: проверка, что выбрано хотя бы одно место,
//! и отправка формы на эндпоинт создания брони. Сам эндпоинт — чёрный ящик:
//! любой неуспешный статус отдаётся наверх как есть, без интерпретации.

use chrono::NaiveDate;
use serde::Serialize;
use std::time::Duration;
use tracing::info;

use crate::config::BookingConfig;

/// Текст, который видит пользователь при попытке отправить пустой выбор.
pub const EMPTY_SELECTION_MESSAGE: &str = "Please select at least one seat from the grid.";

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Please select at least one seat from the grid.")]
    EmptySelection,
    #[error("booking request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("booking endpoint returned status {0}")]
    Rejected(reqwest::StatusCode),
}

/// Поля формы бронирования; seatLabels — сериализованный список мест
/// из SelectionState, остальное — ключ сеанса.
#[derive(Debug, Clone, Serialize)]
pub struct BookingForm {
    #[serde(rename = "cinemaId")]
    pub cinema_id: i64,
    #[serde(rename = "screenId")]
    pub screen_id: i64,
    pub date: NaiveDate,
    pub time: String,
    #[serde(rename = "seatLabels")]
    pub seat_labels: String,
}

/// Блокирующая валидация перед отправкой: пустой (после трима) список
/// мест отменяет отправку, сетевой вызов не делается.
pub fn ensure_selection(serialized: &str) -> Result<(), SubmissionError> {
    if serialized.trim().is_empty() {
        return Err(SubmissionError::EmptySelection);
    }
    Ok(())
}

#[derive(Clone)]
pub struct BookingSubmitter {
    endpoint: String,
    http_client: reqwest::Client,
}

impl BookingSubmitter {
    pub fn from_config(config: &BookingConfig) -> Self {
        Self {
            endpoint: config.booking_url.clone(),
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_seconds))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Отправляет форму form-urlencoded POST-ом. Гард выполняется первым.
    pub async fn submit(&self, form: &BookingForm) -> Result<(), SubmissionError> {
        ensure_selection(&form.seat_labels)?;

        let response = self
            .http_client
            .post(&self.endpoint)
            .form(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SubmissionError::Rejected(response.status()));
        }

        info!("booking submitted: seats=[{}]", form.seat_labels);
        Ok(())
    }
}
