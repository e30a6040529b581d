use medibot::api::{self, app_state::AppState};
use medibot::config::loader::ConfigLoader;
use medibot::engine::selector::NextSymptomSelector;
use medibot::ingest::{load_master_data, load_model_bundle};
use medibot::observability::{create_observability_router, AppMetrics, ObservabilityState};
use medibot::services::{
    create_diagnosis_service, create_history_service, create_reference_service,
};
use medibot::storage::memory::{InMemoryHistoryRepository, InMemoryReferenceRepository};
use medibot::storage::repository::{HistoryRepository, ReferenceRepository};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    if config.logging.structured {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("Starting Medibot...");
    info!("Configuration loaded successfully");

    let reference_repository: Arc<dyn ReferenceRepository> =
        Arc::new(InMemoryReferenceRepository::new());
    let history_repository: Arc<dyn HistoryRepository> =
        Arc::new(InMemoryHistoryRepository::new());
    info!("Repositories initialized");

    let report = load_master_data(&config.data, reference_repository.as_ref()).await?;
    info!(
        "Master data loaded ({} severity / {} description / {} precaution rows)",
        report.severity_rows, report.description_rows, report.precaution_rows
    );

    // 目录与模型只在启动时构建一次，此后只读共享
    let bundle = load_model_bundle(&config.data)?;
    info!(
        "Catalog loaded with {} symptoms; initial model accuracy: {:.5}",
        bundle.catalog.len(),
        bundle.accuracy
    );

    let reference_service: Arc<dyn medibot::services::reference::ReferenceDataService> =
        Arc::from(create_reference_service(reference_repository.clone()));
    let history_service: Arc<dyn medibot::services::history::HistoryService> = Arc::from(
        create_history_service(history_repository.clone(), reference_repository.clone()),
    );
    info!("Reference and history services initialized");

    let selector = NextSymptomSelector::from_seed_option(config.engine.selector_seed);
    let diagnosis_service = create_diagnosis_service(
        bundle.catalog.clone(),
        bundle.model.clone(),
        selector,
        reference_service.clone(),
        history_service.clone(),
        config.engine.max_confirmed_symptoms,
        bundle.accuracy,
    );
    info!("Diagnosis service initialized");

    // 指标实例在 API 路由与 /metrics 端点之间共享
    let metrics = Arc::new(AppMetrics::default());
    let observability_state = Arc::new(ObservabilityState::with_metrics(
        env!("CARGO_PKG_VERSION").to_string(),
        metrics.clone(),
    ));

    let app_state = AppState {
        diagnosis_service: Arc::from(diagnosis_service),
        reference_service,
        history_service,
        metrics,
    };
    info!("Application state created");

    let api_router = api::create_router(app_state);
    let router = create_observability_router(observability_state).merge(api_router);
    info!("API router created with observability endpoints");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
