//! HTTP inbound adapter (axum).

mod dto;
mod handlers;
mod routes;

pub use handlers::AppState;
pub use routes::app_router;
