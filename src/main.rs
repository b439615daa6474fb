use elastic_scaling::api;
use elastic_scaling::config::ServerConfig;
use elastic_scaling::simulation::ScalingService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = ServerConfig::from_env()?;

    // 1. Simulation core + driver:
    let service = ScalingService::new();
    let _driver = service.clone().start();

    // 2. Cluster stats reporter:
    let stats_service = service.clone();
    let mut updates = stats_service.subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            let control = stats_service.control_state().await;
            tracing::info!(
                "Cluster v{}: storage {}/{} active, compute {}/{} active, {} partitions",
                snapshot.version(),
                control.active_storage_nodes,
                control.storage_nodes,
                control.active_compute_nodes,
                control.compute_nodes,
                snapshot.partition_count()
            );
        }
    });

    // 3. HTTP server:
    let app = api::router(service);

    tracing::info!("HTTP server listening on {}", config.bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
