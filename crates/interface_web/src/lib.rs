//! Doctor Records Web Front End
//!
//! A server-rendered front end over the CRM's "doctors" custom object.
//!
//! # Architecture
//!
//! - **Handlers**: one per route, each making at most one CRM call
//! - **Views**: Tera templates compiled into the binary
//! - **Middleware**: request ids, tracing, access log
//! - **Error Handling**: generic plain-text 500s, full detail in the log
//!
//! # Routes
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/` | list records |
//! | GET | `/update-cobj` | create form |
//! | POST | `/update-cobj` | create, then 302 to `/` |
//! | GET | `/view-doctor/:id` | one record, always 200 |
//! | GET | `/health` | liveness |
//!
//! Any other path is served from the static directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_web::{create_router, AppState};
//!
//! let state = AppState::new(Arc::new(adapter), config)?;
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod views;

use axum::{
    middleware as axum_middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use domain_doctor::DoctorPort;

use crate::config::AppConfig;
use crate::handlers::{doctors, health};
use crate::middleware::access_log_middleware;
use crate::views::Views;

/// Application state shared across handlers
///
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub doctors: Arc<dyn DoctorPort>,
    pub views: Arc<Views>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Builds the state, compiling the page templates
    pub fn new(doctors: Arc<dyn DoctorPort>, config: AppConfig) -> Result<Self, tera::Error> {
        Ok(Self {
            doctors,
            views: Arc::new(Views::new()?),
            config: Arc::new(config),
        })
    }
}

/// Creates the web router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(doctors::list_doctors))
        .route(
            "/update-cobj",
            get(doctors::show_create_form).post(doctors::create_doctor),
        )
        .route("/view-doctor/:id", get(doctors::view_doctor))
        .route("/health", get(health::health_check))
        .fallback_service(static_files)
        .layer(axum_middleware::from_fn(access_log_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
