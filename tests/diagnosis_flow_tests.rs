// Integration tests for the diagnosis flow
//
// Tests cover:
// - Fitting the tree from training CSV and building the catalog
// - The full question/prediction loop with a seeded selector
// - Termination on both the symptom-count cap and the exhausted pool
// - Severity scoring scenarios end to end

use std::sync::Arc;

use medibot::engine::selector::NextSymptomSelector;
use medibot::engine::{SymptomCatalog, SymptomEncoder};
use medibot::ingest::{DecisionTreeTrainer, LabeledDataset};
use medibot::models::{Disease, Symptom};
use medibot::services::diagnosis::{
    DiagnosisService, StepInput, StepOutcome, FALLBACK_DESCRIPTION, FALLBACK_PRECAUTION,
};
use medibot::services::history::HistoryService;
use medibot::services::{
    create_diagnosis_service, create_history_service, create_reference_service,
};
use medibot::storage::memory::{InMemoryHistoryRepository, InMemoryReferenceRepository};
use medibot::storage::repository::{HistoryRepository, ReferenceRepository};

const TRAINING_CSV: &str = "\
fever,cough,fatigue,headache,nausea,prognosis
1,1,0,0,0,Flu
1,1,1,0,0,Flu
1,1,0,1,0,Flu
0,1,0,0,0,Common Cold
0,1,1,0,0,Common Cold
0,1,0,1,0,Common Cold
0,0,0,1,1,Migraine
0,0,1,1,1,Migraine
0,0,0,0,0,Healthy
0,0,1,0,0,Healthy
";

struct TestStack {
    service: Box<dyn DiagnosisService>,
    history: Arc<dyn HistoryService>,
    catalog: Arc<SymptomCatalog>,
}

async fn build_stack(max_confirmed: usize, seed: u64) -> TestStack {
    let dataset = LabeledDataset::from_csv_str(TRAINING_CSV, "training").unwrap();
    let catalog = Arc::new(SymptomCatalog::from_names(dataset.feature_names.clone()).unwrap());
    let model = Arc::new(DecisionTreeTrainer::new().fit(&dataset).unwrap());

    let reference_repository: Arc<dyn ReferenceRepository> =
        Arc::new(InMemoryReferenceRepository::new());
    for (name, severity) in [
        ("fever", 3),
        ("cough", 2),
        ("fatigue", 1),
        ("headache", 2),
        ("nausea", 3),
    ] {
        reference_repository
            .upsert_symptom(&Symptom::new(name, severity))
            .await
            .unwrap();
    }
    reference_repository
        .set_description("Flu", "A contagious respiratory illness")
        .await
        .unwrap();
    reference_repository
        .upsert_disease(&Disease::new(
            "Flu",
            vec!["rest".into(), "drink fluids".into(), "consult doctor".into()],
        ))
        .await
        .unwrap();

    let history_repository: Arc<dyn HistoryRepository> =
        Arc::new(InMemoryHistoryRepository::new());
    let reference_service = Arc::from(create_reference_service(reference_repository.clone()));
    let history: Arc<dyn HistoryService> = Arc::from(create_history_service(
        history_repository,
        reference_repository,
    ));

    let service = create_diagnosis_service(
        catalog.clone(),
        model,
        NextSymptomSelector::with_seed(seed),
        reference_service,
        history.clone(),
        max_confirmed,
        0.95,
    );

    TestStack {
        service,
        history,
        catalog,
    }
}

/// 模拟客户端：从一个初始症状出发，把会话推进到诊断产出
async fn run_to_completion(
    stack: &TestStack,
    initial: &str,
    days: u32,
    confirm_all: bool,
) -> medibot::services::diagnosis::DiagnosisReport {
    let mut symptoms_present: Vec<String> = Vec::new();
    let mut current: Option<String> = Some(initial.to_string());

    for _ in 0..64 {
        let outcome = stack
            .service
            .step(StepInput {
                current_symptom: current.clone(),
                symptoms_present: symptoms_present.clone(),
                duration_days: days,
            })
            .await
            .unwrap();

        match outcome {
            StepOutcome::Prediction(report) => return report,
            StepOutcome::Question { next_symptom } => {
                if let Some(c) = current.take() {
                    if !symptoms_present.contains(&c) {
                        symptoms_present.push(c);
                    }
                }
                // confirm_all: 用户对每个提问都回答“是”
                current = if confirm_all { next_symptom } else { None };
            }
        }
    }
    panic!("session did not terminate");
}

#[tokio::test]
async fn test_session_terminates_within_symptom_cap() {
    let stack = build_stack(3, 42).await;
    let report = run_to_completion(&stack, "fever", 2, true).await;
    // 任何训练标签都是合法产出
    assert!(!report.disease.is_empty());
}

#[tokio::test]
async fn test_exhausted_catalog_terminates_before_cap() {
    // 目录只有 5 个症状，上限 10：候选必然先耗尽
    let stack = build_stack(10, 7).await;
    let report = run_to_completion(&stack, "fever", 2, true).await;
    assert!(!report.disease.is_empty());

    // 全部症状都被确认过
    let view = stack.history.history(100).await.unwrap();
    assert_eq!(view.symptoms.len(), stack.catalog.len());
}

#[tokio::test]
async fn test_flu_path_with_reference_data() {
    let stack = build_stack(10, 42).await;
    let outcome = stack
        .service
        .step(StepInput {
            current_symptom: None,
            symptoms_present: vec!["fever".into(), "cough".into()],
            duration_days: 10,
        })
        .await
        .unwrap();

    let StepOutcome::Prediction(report) = outcome else {
        panic!("expected prediction");
    };
    assert_eq!(report.disease, "Flu");
    assert_eq!(report.description, "A contagious respiratory illness");
    assert_eq!(report.precautions.len(), 3);
    // raw = 3 + 2 = 5, factor = 5*10/3 = 16.67 > 13
    assert!(report.severity_factor > 13.0);
}

#[tokio::test]
async fn test_unknown_disease_reference_falls_back() {
    let stack = build_stack(10, 42).await;
    let outcome = stack
        .service
        .step(StepInput {
            current_symptom: None,
            symptoms_present: vec!["headache".into(), "nausea".into()],
            duration_days: 1,
        })
        .await
        .unwrap();

    let StepOutcome::Prediction(report) = outcome else {
        panic!("expected prediction");
    };
    assert_eq!(report.disease, "Migraine");
    assert_eq!(report.description, FALLBACK_DESCRIPTION);
    assert_eq!(report.precautions, vec![FALLBACK_PRECAUTION.to_string()]);
}

#[tokio::test]
async fn test_severity_scenarios_through_service() {
    let stack = build_stack(10, 42).await;

    // fever(3)+cough(2), 5 天: factor = 25/3 = 8.33 -> 预防建议
    let outcome = stack
        .service
        .step(StepInput {
            current_symptom: None,
            symptoms_present: vec!["fever".into(), "cough".into()],
            duration_days: 5,
        })
        .await
        .unwrap();
    let StepOutcome::Prediction(report) = outcome else {
        panic!("expected prediction");
    };
    assert!((report.severity_factor - 25.0 / 3.0).abs() < 1e-9);
    assert_eq!(
        report.assessment.message(),
        "It might not be that bad but you should take precautions."
    );

    // 20 天同样的症状组合则超过阈值
    let outcome = stack
        .service
        .step(StepInput {
            current_symptom: None,
            symptoms_present: vec!["fever".into(), "cough".into(), "fatigue".into()],
            duration_days: 20,
        })
        .await
        .unwrap();
    let StepOutcome::Prediction(report) = outcome else {
        panic!("expected prediction");
    };
    // raw = 3+2+1 = 6, factor = 6*20/4 = 30 > 13
    assert!((report.severity_factor - 30.0).abs() < 1e-9);
    assert_eq!(
        report.assessment.message(),
        "You should take the consultation from doctor."
    );
}

#[tokio::test]
async fn test_prediction_determinism_for_fixed_vector() {
    let stack = build_stack(10, 42).await;
    let encoder = SymptomEncoder::new(stack.catalog.clone());
    let dataset = LabeledDataset::from_csv_str(TRAINING_CSV, "training").unwrap();
    let model = DecisionTreeTrainer::new().fit(&dataset).unwrap();

    let vector = encoder.encode(&["fever".to_string(), "cough".to_string()]);
    let first = model.predict(&vector).unwrap().to_string();
    for _ in 0..5 {
        assert_eq!(model.predict(&vector).unwrap(), first);
    }
}

#[tokio::test]
async fn test_history_records_diagnoses() {
    let stack = build_stack(10, 42).await;
    let _ = run_to_completion(&stack, "fever", 2, false).await;

    let view = stack.history.history(10).await.unwrap();
    assert_eq!(view.symptoms.len(), 1);
    assert_eq!(view.symptoms[0].symptom, "fever");
    assert_eq!(view.diseases.len(), 1);
}
