use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryPredictionRepository};
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use homescore::auth::StaticSessionAuthenticator;
use homescore::config::AppConfig;
use homescore::error::AppError;
use homescore::predictions::scoring::noise_from_seed;
use homescore::predictions::PredictionService;
use homescore::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let authenticator = StaticSessionAuthenticator::from_config(&config.auth);
    if authenticator.is_empty() {
        warn!("no session tokens configured; every prediction request will be rejected");
    }

    if let Some(seed) = config.pricing.noise_seed {
        info!(seed, "market noise seeded");
    }
    let service = Arc::new(PredictionService::new(
        Arc::new(InMemoryPredictionRepository::default()),
        noise_from_seed(config.pricing.noise_seed),
    ));

    let app = with_operational_routes(service, Arc::new(authenticator))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "prediction service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
