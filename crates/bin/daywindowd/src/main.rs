//! # daywindowd — daywindow daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Construct the in-memory repository, virtual device gateway, and update bus
//! - Construct the schedule service, injecting ports via traits
//! - Create and start the schedules declared in the config file
//! - Build the axum router, bind to a TCP port, and serve
//! - Handle graceful shutdown (SIGINT), releasing every schedule's timers
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use daywindow_adapter_http_axum::state::AppState;
use daywindow_adapter_virtual::VirtualDeviceGateway;
use daywindow_app::repository::InMemoryScheduleRepository;
use daywindow_app::services::schedule_service::ScheduleService;
use daywindow_app::update_bus::InProcessUpdateBus;

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    let filter = tracing_subscriber::EnvFilter::try_new(&config.logging.filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Ports: in-memory options store, simulated devices, broadcast updates.
    let gateway = Arc::new(VirtualDeviceGateway::new());
    let update_bus = Arc::new(InProcessUpdateBus::new(256));

    let service = Arc::new(ScheduleService::new(
        InMemoryScheduleRepository::new(),
        Arc::clone(&gateway),
        Arc::clone(&update_bus),
    ));

    // Seed and start the schedules declared in the config file.
    for entry in config.schedules.clone() {
        let schedule = entry.into_schedule()?;
        gateway.provision(&schedule.targets);
        let created = service.create_schedule(schedule).await?;
        tracing::info!(schedule = %created.name, id = %created.id, "schedule running");
    }

    // HTTP
    let state = AppState::from_arcs(Arc::clone(&service), Arc::clone(&update_bus));
    let app = daywindow_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    tracing::info!(%bind_addr, "daywindowd listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    service.stop_all().await;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}
