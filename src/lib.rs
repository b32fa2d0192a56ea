pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod controllers;
pub mod middleware;

use axum::{routing::get, Router};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tower_http::{services::ServeDir, trace::TraceLayer};

use services::booking::BookingService;

// Shared state для всего приложения
pub struct AppState {
    booking: Mutex<BookingService>,
    pub config: config::Config,
}

impl AppState {
    pub fn new(config: config::Config) -> Result<Arc<Self>, error::BookingError> {
        let service = BookingService::new(config.hall.rows, config.hall.seats_per_row)?;
        tracing::info!(
            "Cinema hall ready: {} rows x {} seats",
            config.hall.rows,
            config.hall.seats_per_row
        );

        Ok(Arc::new(Self {
            booking: Mutex::new(service),
            config,
        }))
    }

    /// Единственная точка доступа к залу и журналу. Вся бронь (проверка и
    /// фиксация) и сброс выполняются под этой блокировкой целиком.
    ///
    /// Отравленный мьютекс восстанавливается: каждая операция сервиса либо
    /// применяется полностью, либо не меняет состояние.
    pub fn booking(&self) -> MutexGuard<'_, BookingService> {
        self.booking.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Роутер приложения: API, health-check и статика фронтенда.
pub fn app(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.config.app.static_dir);

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .fallback_service(static_files)
        .with_state(state)
        .layer(middleware::cors_layer())
        .layer(TraceLayer::new_for_http())
}
