use std::str::FromStr;
use std::sync::Arc;

use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace as sdktrace;
use opentelemetry_sdk::Resource;
use sheets_gateway::adapters::config::app_config::AppConfig;
use sheets_gateway::adapters::config::telemetry_config::TelemetryConfig;
use sheets_gateway::adapters::http::{router::build_router, state::AppState};
use sheets_gateway::adapters::sheets::spreadsheet_manager::SpreadsheetManager;
use sheets_gateway::application::{auth::AuthService, transactions::TransactionService};
use sheets_gateway::prettyprint::prettyprint::PrettyFormatter;
use tracing::{error, info};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

const SERVICE_NAME: &str = "sheets_gateway";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|report| format!("{report:?}"))?;

    setup_tracing(&config.telemetry)?;
    setup_panic_hook();

    info!("Starting sheets-gateway");
    tracing::debug!("Configuration: {:?}", config);

    let auth = AuthService::new(&config.auth)?;
    let spreadsheet_id: Arc<str> = Arc::from(config.sheets.spreadsheet_id.as_ref());
    let sheets = Arc::new(SpreadsheetManager::new(config.sheets));

    let state = AppState {
        transactions: Arc::new(TransactionService::new(sheets)),
        auth: Arc::new(auth),
        spreadsheet_id,
    };

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    let served = axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    opentelemetry::global::shutdown_tracer_provider();

    match served {
        Ok(()) => {
            info!("Server stopped");
            Ok(())
        }
        Err(e) => {
            error!("Server failed: {:?}", e);
            Err(e.into())
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn setup_tracing(config: &TelemetryConfig) -> Result<(), Box<dyn std::error::Error>> {
    let level = tracing::Level::from_str(&config.level)?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(std::io::stderr);

    let log_file_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(false))
        .with_writer(std::fs::File::create(config.log_file.as_ref())?)
        .with_ansi(false);

    let otel_layer = match &config.otlp_endpoint {
        Some(endpoint) => {
            let exporter = opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(endpoint.clone());

            let tracer = opentelemetry_otlp::new_pipeline()
                .tracing()
                .with_exporter(exporter)
                .with_trace_config(sdktrace::config().with_resource(Resource::new(vec![
                    KeyValue::new("service.name", SERVICE_NAME),
                ])))
                .install_batch(opentelemetry_sdk::runtime::Tokio)?;

            Some(OpenTelemetryLayer::new(tracer))
        }
        None => None,
    };

    Registry::default()
        .with(
            tracing_subscriber::filter::Targets::new()
                .with_target(SERVICE_NAME, level)
                .with_target("tower_http", level),
        )
        .with(otel_layer)
        .with(log_file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
        opentelemetry::global::shutdown_tracer_provider();
    }));
}
