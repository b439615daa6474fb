use axum::{
    Json,
    extract::{Extension, Query},
    http::StatusCode,
};
use std::sync::Arc;

use super::protocol::{ClusterResponse, CommandResponse, LogQuery, LogResponse};
use crate::orchestrator::{Command, CommandOutcome};
use crate::simulation::ScalingService;

pub async fn handle_get_cluster(
    Extension(service): Extension<Arc<ScalingService>>,
) -> (StatusCode, Json<ClusterResponse>) {
    let snapshot = service.snapshot();
    let control = service.control_state().await;

    (
        StatusCode::OK,
        Json(ClusterResponse {
            version: snapshot.version(),
            nodes: snapshot.nodes().to_vec(),
            control,
        }),
    )
}

pub async fn handle_get_log(
    Extension(service): Extension<Arc<ScalingService>>,
    Query(query): Query<LogQuery>,
) -> (StatusCode, Json<LogResponse>) {
    let entries = service.log_after(query.after).await;
    (StatusCode::OK, Json(LogResponse { entries }))
}

pub async fn handle_scale_out_storage(
    service: Extension<Arc<ScalingService>>,
) -> (StatusCode, Json<CommandResponse>) {
    handle_command(service, Command::ScaleOutStorage).await
}

pub async fn handle_scale_in_storage(
    service: Extension<Arc<ScalingService>>,
) -> (StatusCode, Json<CommandResponse>) {
    handle_command(service, Command::ScaleInStorage).await
}

pub async fn handle_scale_out_compute(
    service: Extension<Arc<ScalingService>>,
) -> (StatusCode, Json<CommandResponse>) {
    handle_command(service, Command::ScaleOutCompute).await
}

pub async fn handle_scale_in_compute(
    service: Extension<Arc<ScalingService>>,
) -> (StatusCode, Json<CommandResponse>) {
    handle_command(service, Command::ScaleInCompute).await
}

pub async fn handle_reset(
    service: Extension<Arc<ScalingService>>,
) -> (StatusCode, Json<CommandResponse>) {
    handle_command(service, Command::Reset).await
}

async fn handle_command(
    Extension(service): Extension<Arc<ScalingService>>,
    command: Command,
) -> (StatusCode, Json<CommandResponse>) {
    let outcome = service.dispatch(command).await;

    let status = match &outcome {
        CommandOutcome::Started(_) => StatusCode::ACCEPTED,
        CommandOutcome::Completed => StatusCode::OK,
        CommandOutcome::Rejected(rejection) => {
            tracing::info!("Rejected {:?}: {}", command, rejection);
            StatusCode::UNPROCESSABLE_ENTITY
        }
        CommandOutcome::Busy => StatusCode::CONFLICT,
    };

    (status, Json(CommandResponse::from(&outcome)))
}
