use serde::Deserialize;
use std::env;
use std::str::FromStr;

use crate::error::ConfigError;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub hall: HallConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
    pub static_dir: String,
}

// Размеры зала, задаются один раз при старте
#[derive(Debug, Clone, Deserialize)]
pub struct HallConfig {
    pub rows: usize,
    pub seats_per_row: usize,
}

impl Default for HallConfig {
    fn default() -> Self {
        Self { rows: 8, seats_per_row: 12 }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = HallConfig::default();

        Ok(Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_var("PORT", 8080)?,
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "cinema_booking=debug,tower_http=debug".to_string()),
                static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "web".to_string()),
            },
            hall: HallConfig {
                rows: parse_var("HALL_ROWS", defaults.rows)?,
                seats_per_row: parse_var("HALL_SEATS_PER_ROW", defaults.seats_per_row)?,
            },
        })
    }
}

// Читает переменную окружения, если её нет - возвращает значение по умолчанию
fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}
