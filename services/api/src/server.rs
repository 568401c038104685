use crate::cli::ServeArgs;
use crate::infra::{load_seed, seeded_service, AppState};
use crate::routes::with_matching_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use peer_match::config::AppConfig;
use peer_match::error::AppError;
use peer_match::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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

    let seed = match args.seed.take() {
        Some(path) => {
            let records = load_seed(&path)?;
            info!(path = %path.display(), profiles = records.len(), "loaded profile seed");
            records
        }
        None => Vec::new(),
    };

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let ranking = config.matching.ranking;
    let matching_service = seeded_service(config.matching.clone(), seed)?;

    let app = with_matching_routes(matching_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        min_score = ranking.min_score,
        max_results = ranking.max_results,
        "peer matching service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
