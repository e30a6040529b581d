use crate::observability::AppMetrics;
use crate::services::diagnosis::DiagnosisService;
use crate::services::history::HistoryService;
use crate::services::reference::ReferenceDataService;
use std::sync::Arc;

/// Application state containing all shared services
#[derive(Clone)]
pub struct AppState {
    /// Diagnosis service driving the question/prediction loop
    pub diagnosis_service: Arc<dyn DiagnosisService>,
    /// Reference data service for severity/description/precaution lookups
    pub reference_service: Arc<dyn ReferenceDataService>,
    /// History service for the append-only interaction log
    pub history_service: Arc<dyn HistoryService>,
    /// Shared application metrics
    pub metrics: Arc<AppMetrics>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("diagnosis_service", &"Arc<dyn DiagnosisService>")
            .field("reference_service", &"Arc<dyn ReferenceDataService>")
            .field("history_service", &"Arc<dyn HistoryService>")
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(
        diagnosis_service: Box<dyn DiagnosisService>,
        reference_service: Box<dyn ReferenceDataService>,
        history_service: Box<dyn HistoryService>,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        Self {
            diagnosis_service: Arc::from(diagnosis_service),
            reference_service: Arc::from(reference_service),
            history_service: Arc::from(history_service),
            metrics,
        }
    }
}
