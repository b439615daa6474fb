//! HTTP Command Surface
//!
//! Exposes the five zero-argument commands and the two observable outputs (node collection
//! and event log) over HTTP, so any presentation layer can render the simulation.
//!
//! ## Submodules
//! - **`handlers`**: Axum request handlers backed by the shared `ScalingService`.
//! - **`protocol`**: endpoint paths and JSON DTOs.

pub mod handlers;
pub mod protocol;

use axum::{
    Router,
    extract::Extension,
    routing::{get, post},
};
use std::sync::Arc;

use crate::simulation::ScalingService;
use handlers::*;
use protocol::*;

pub fn router(service: Arc<ScalingService>) -> Router {
    Router::new()
        .route(ENDPOINT_CLUSTER, get(handle_get_cluster))
        .route(ENDPOINT_LOG, get(handle_get_log))
        .route(ENDPOINT_SCALE_OUT_STORAGE, post(handle_scale_out_storage))
        .route(ENDPOINT_SCALE_IN_STORAGE, post(handle_scale_in_storage))
        .route(ENDPOINT_SCALE_OUT_COMPUTE, post(handle_scale_out_compute))
        .route(ENDPOINT_SCALE_IN_COMPUTE, post(handle_scale_in_compute))
        .route(ENDPOINT_RESET, post(handle_reset))
        .layer(Extension(service))
}
