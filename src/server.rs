use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::site_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use ihic::config::AppConfig;
use ihic::error::AppError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut config: AppConfig, mut args: ServeArgs) -> Result<(), AppError> {
    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    let site_dir = args.dir.take().unwrap_or_else(|| config.site.output_dir.clone());

    if !site_dir.is_dir() {
        warn!(dir = %site_dir.display(), "site directory missing, run `generate` first");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        site_dir: Arc::new(site_dir),
    };

    let app = site_router()
        .layer(Extension(app_state.clone()))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        dir = %app_state.site_dir.display(),
        "i-HIC preview server ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
