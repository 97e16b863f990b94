use crate::cli::ServeArgs;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::infra::AppState;
use crate::routes;
use crate::telemetry;
use crate::workflows::advisor::{CloudAdvisor, OpenAiChatClient};
use axum_prometheus::PrometheusMetricLayer;
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

    let gateway = OpenAiChatClient::from_config(&config.model)?;
    let advisor = CloudAdvisor::new(Box::new(gateway));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let state = AppState::new(advisor, prometheus_handle);

    let app = routes::router(state.clone()).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    state.mark_ready();

    info!(?config.environment, %addr, model = %config.model.model, "cloud compass advisor ready");

    axum::serve(listener, app).await?;
    Ok(())
}
