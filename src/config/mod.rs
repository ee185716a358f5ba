use serde::Deserialize;
use std::env;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub occupancy: OccupancyConfig,
    pub booking: BookingConfig,
    pub catalog: CatalogConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub rust_log: String,
}

// Настройки сервиса занятости мест
#[derive(Debug, Clone, Deserialize)]
pub struct OccupancyConfig {
    pub seat_api_url: String,
    pub timeout_seconds: u64,
}

// Настройки эндпоинта бронирования
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    pub booking_url: String,
    pub timeout_seconds: u64,
}

// Откуда брать каталог кинотеатров/залов/сеансов; без пути
// используется встроенный демо-каталог
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub path: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            app: AppConfig {
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "booking_client=debug".to_string()),
            },
            occupancy: OccupancyConfig {
                seat_api_url: env::var("SEAT_API_URL")
                    .unwrap_or_else(|_| "http://localhost:8080/book/seats".to_string()),
                timeout_seconds: env::var("HTTP_TIMEOUT_SECONDS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .expect("HTTP_TIMEOUT_SECONDS must be a valid number"),
            },
            booking: BookingConfig {
                booking_url: env::var("BOOKING_URL")
                    .unwrap_or_else(|_| "http://localhost:8080/book".to_string()),
                timeout_seconds: env::var("HTTP_TIMEOUT_SECONDS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .expect("HTTP_TIMEOUT_SECONDS must be a valid number"),
            },
            catalog: CatalogConfig {
                path: env::var("CATALOG_PATH").ok(),
            },
        }
    }
}
