//! 服务模块

pub mod diagnosis;
pub mod history;
pub mod reference;

pub use diagnosis::{
    create_diagnosis_service, DiagnosisReport, DiagnosisService, StepInput, StepOutcome,
};
pub use history::{create_history_service, HistoryService, HistoryView};
pub use reference::{create_reference_service, ReferenceDataService};
