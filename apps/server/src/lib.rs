//! tubesum HTTP API.
//!
//! Thin axum layer over [`tubesum_core::Pipeline`]: every endpoint validates
//! its input, delegates to the pipeline and maps failures onto status codes.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
