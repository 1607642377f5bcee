use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryLeadSink, InMemorySessionStore};
use crate::routes::with_simulation_routes;
use axum::Extension;
use chrono::Duration;
use axum_prometheus::PrometheusMetricLayer;
use infonavit_sim::config::AppConfig;
use infonavit_sim::error::AppError;
use infonavit_sim::simulator::SimulationService;
use infonavit_sim::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemorySessionStore::with_limits(
        config.simulator.session_capacity,
        Duration::minutes(i64::from(config.simulator.session_idle_minutes)),
    ));
    let leads = Arc::new(InMemoryLeadSink::default());
    let simulation_service = Arc::new(SimulationService::with_property_type(
        store,
        leads,
        config.simulator.default_property_type,
    ));

    let app = with_simulation_routes(simulation_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        property_type = %config.simulator.default_property_type,
        session_capacity = config.simulator.session_capacity,
        "credit simulator ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
