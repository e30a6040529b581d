//! 诊断编排服务
//!
//! 单次交互的状态机：收集确认症状、判定终止条件，
//! 终止后串联编码 → 预测 → 评分并联结参考数据产出最终诊断。
//! 历史记录为 fire-and-forget，其失败不影响返回结果。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::engine::catalog::SymptomCatalog;
use crate::engine::encoder::SymptomEncoder;
use crate::engine::selector::NextSymptomSelector;
use crate::engine::severity::{SeverityAssessment, SeverityScorer};
use crate::engine::tree::DecisionTreeModel;
use crate::error::Result;
use crate::models::session::{ConfirmOutcome, DiagnosisSession};
use crate::services::history::HistoryService;
use crate::services::reference::ReferenceDataService;

/// 描述缺失时的回退文案
pub const FALLBACK_DESCRIPTION: &str = "No description available.";
/// 预防建议缺失时的回退文案
pub const FALLBACK_PRECAUTION: &str = "No specific precautions available.";

/// 一轮交互的输入
#[derive(Debug, Clone, Default)]
pub struct StepInput {
    /// 本轮被确认的症状（None 表示问题池已耗尽，无症状可确认）
    pub current_symptom: Option<String>,
    /// 此前已确认的症状集合
    pub symptoms_present: Vec<String>,
    /// 症状持续天数
    pub duration_days: u32,
}

/// 最终诊断报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisReport {
    /// 预测的疾病
    pub disease: String,
    /// 疾病描述
    pub description: String,
    /// 预防建议
    pub precautions: Vec<String>,
    /// 严重度因子
    pub severity_factor: f64,
    /// 严重程度评估结论
    pub assessment: SeverityAssessment,
}

/// 一轮交互的结果
#[derive(Debug, Clone)]
pub enum StepOutcome {
    /// 继续收集：询问下一个症状（None 表示无症状可问）
    Question { next_symptom: Option<String> },
    /// 已终止：产出诊断
    Prediction(DiagnosisReport),
}

/// 诊断服务 trait
#[async_trait]
pub trait DiagnosisService: Send + Sync {
    /// 推进一轮交互
    async fn step(&self, input: StepInput) -> Result<StepOutcome>;

    /// 症状目录名称（目录顺序）
    fn catalog_names(&self) -> Vec<String>;

    /// 留出集准确率
    fn model_accuracy(&self) -> f64;
}

/// 诊断服务实现
///
/// 目录与模型载入后只读共享；会话对象为每次请求临时构建，
/// 不存在跨会话的可变状态。
pub struct DiagnosisServiceImpl {
    catalog: Arc<SymptomCatalog>,
    model: Arc<DecisionTreeModel>,
    encoder: SymptomEncoder,
    selector: NextSymptomSelector,
    reference: Arc<dyn ReferenceDataService>,
    history: Arc<dyn HistoryService>,
    max_confirmed: usize,
    accuracy: f64,
}

impl DiagnosisServiceImpl {
    /// 创建新的服务实例
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        catalog: Arc<SymptomCatalog>,
        model: Arc<DecisionTreeModel>,
        selector: NextSymptomSelector,
        reference: Arc<dyn ReferenceDataService>,
        history: Arc<dyn HistoryService>,
        max_confirmed: usize,
        accuracy: f64,
    ) -> Self {
        let encoder = SymptomEncoder::new(catalog.clone());
        Self {
            catalog,
            model,
            encoder,
            selector,
            reference,
            history,
            max_confirmed,
            accuracy,
        }
    }

    /// 终止后的诊断产出
    async fn finalize(&self, session: &DiagnosisSession) -> Result<DiagnosisReport> {
        let vector = self.encoder.encode(session.confirmed());
        let disease = self.model.predict(&vector)?.to_string();

        let weights = self
            .reference
            .severity_weights(session.confirmed())
            .await?;
        let severity_factor =
            SeverityScorer::score(session.confirmed(), &weights, session.duration_days);
        let assessment = SeverityScorer::assess(severity_factor);

        // 描述与建议缺失时降级为回退文案，不让会话半途失败
        let description = self
            .reference
            .description(&disease)
            .await?
            .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string());
        let precautions = self
            .reference
            .precautions(&disease)
            .await?
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| vec![FALLBACK_PRECAUTION.to_string()]);

        if let Err(e) = self.history.record_diagnosis(&disease).await {
            warn!("Failed to record diagnosis in history: {}", e);
        }

        info!(
            "Diagnosis emitted: {} (severity factor {:.2}, {} symptoms)",
            disease,
            severity_factor,
            session.confirmed_len()
        );

        Ok(DiagnosisReport {
            disease,
            description,
            precautions,
            severity_factor,
            assessment,
        })
    }
}

#[async_trait]
impl DiagnosisService for DiagnosisServiceImpl {
    async fn step(&self, input: StepInput) -> Result<StepOutcome> {
        let mut session = DiagnosisSession::new(input.duration_days);

        for name in &input.symptoms_present {
            if session.confirm(name, &self.catalog) == ConfirmOutcome::Unknown {
                debug!("Ignoring unknown symptom from client state: {}", name);
            }
        }

        // 空字符串与缺失同等对待：本轮没有可确认的症状
        let offered = input
            .current_symptom
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        if let Some(current) = offered {
            match session.confirm(current, &self.catalog) {
                ConfirmOutcome::Added => {
                    if let Err(e) = self.history.record_symptom(current).await {
                        warn!("Failed to record symptom in history: {}", e);
                    }
                }
                ConfirmOutcome::Duplicate => {
                    debug!("Duplicate confirmation absorbed: {}", current);
                }
                ConfirmOutcome::Unknown => {
                    debug!("Rejecting unknown current symptom: {}", current);
                }
            }
        }

        session.evaluate_termination(offered.is_some(), self.max_confirmed);

        if session.is_done() {
            let report = self.finalize(&session).await?;
            Ok(StepOutcome::Prediction(report))
        } else {
            let next_symptom = self
                .selector
                .select_next(session.confirmed(), &self.catalog);
            debug!(
                "Collecting: {} confirmed, next question {:?}",
                session.confirmed_len(),
                next_symptom
            );
            Ok(StepOutcome::Question { next_symptom })
        }
    }

    fn catalog_names(&self) -> Vec<String> {
        self.catalog.names().to_vec()
    }

    fn model_accuracy(&self) -> f64 {
        self.accuracy
    }
}

/// 创建诊断服务
pub fn create_diagnosis_service(
    catalog: Arc<SymptomCatalog>,
    model: Arc<DecisionTreeModel>,
    selector: NextSymptomSelector,
    reference: Arc<dyn ReferenceDataService>,
    history: Arc<dyn HistoryService>,
    max_confirmed: usize,
    accuracy: f64,
) -> Box<dyn DiagnosisService> {
    Box::new(DiagnosisServiceImpl::new(
        catalog,
        model,
        selector,
        reference,
        history,
        max_confirmed,
        accuracy,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tree::TreeNode;
    use crate::models::{Disease, Symptom};
    use crate::services::history::HistoryServiceImpl;
    use crate::services::reference::ReferenceDataServiceImpl;
    use crate::storage::memory::{InMemoryHistoryRepository, InMemoryReferenceRepository};
    use crate::storage::repository::{MockHistoryRepository, ReferenceRepository};

    const MAX_CONFIRMED: usize = 10;

    fn catalog() -> Arc<SymptomCatalog> {
        let names: Vec<String> = (0..12).map(|i| format!("symptom_{:02}", i)).collect();
        Arc::new(SymptomCatalog::from_names(names).unwrap())
    }

    /// symptom_00 -> Flu，否则 Healthy
    fn model() -> Arc<DecisionTreeModel> {
        Arc::new(
            DecisionTreeModel::new(
                vec![
                    TreeNode::Internal {
                        feature: 0,
                        threshold: 0.5,
                        left: 1,
                        right: 2,
                    },
                    TreeNode::Leaf {
                        label: "Healthy".into(),
                    },
                    TreeNode::Leaf {
                        label: "Flu".into(),
                    },
                ],
                12,
            )
            .unwrap(),
        )
    }

    async fn reference_repository() -> Arc<InMemoryReferenceRepository> {
        let repository = Arc::new(InMemoryReferenceRepository::new());
        repository
            .upsert_symptom(&Symptom::new("symptom_00", 6))
            .await
            .unwrap();
        repository
            .set_description("Flu", "A viral infection")
            .await
            .unwrap();
        repository
            .upsert_disease(&Disease::new("Flu", vec!["rest".into(), "drink fluids".into()]))
            .await
            .unwrap();
        repository
    }

    async fn service_with_history(
        history_repository: Arc<dyn crate::storage::repository::HistoryRepository>,
    ) -> DiagnosisServiceImpl {
        let reference_repository = reference_repository().await;
        let reference = Arc::new(ReferenceDataServiceImpl::new(reference_repository.clone()));
        let history = Arc::new(HistoryServiceImpl::new(
            history_repository,
            reference_repository,
        ));
        DiagnosisServiceImpl::new(
            catalog(),
            model(),
            NextSymptomSelector::with_seed(42),
            reference,
            history,
            MAX_CONFIRMED,
            0.97,
        )
    }

    async fn service() -> DiagnosisServiceImpl {
        service_with_history(Arc::new(InMemoryHistoryRepository::new())).await
    }

    fn symptoms(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("symptom_{:02}", i)).collect()
    }

    #[tokio::test]
    async fn test_collecting_returns_next_symptom_outside_confirmed() {
        let service = service().await;
        let outcome = service
            .step(StepInput {
                current_symptom: Some("symptom_00".into()),
                symptoms_present: symptoms(3),
                duration_days: 2,
            })
            .await
            .unwrap();

        match outcome {
            StepOutcome::Question { next_symptom } => {
                let next = next_symptom.expect("candidates remain");
                assert!(!symptoms(3).contains(&next));
            }
            StepOutcome::Prediction(_) => panic!("expected question below threshold"),
        }
    }

    #[tokio::test]
    async fn test_ten_confirmed_symptoms_terminate() {
        let service = service().await;
        let outcome = service
            .step(StepInput {
                current_symptom: Some("symptom_09".into()),
                symptoms_present: symptoms(9),
                duration_days: 1,
            })
            .await
            .unwrap();
        assert!(matches!(outcome, StepOutcome::Prediction(_)));
    }

    #[tokio::test]
    async fn test_absent_current_symptom_terminates() {
        let service = service().await;
        let outcome = service
            .step(StepInput {
                current_symptom: None,
                symptoms_present: symptoms(2),
                duration_days: 1,
            })
            .await
            .unwrap();
        assert!(matches!(outcome, StepOutcome::Prediction(_)));
    }

    #[tokio::test]
    async fn test_empty_current_symptom_equals_absent() {
        let service = service().await;
        let outcome = service
            .step(StepInput {
                current_symptom: Some("  ".into()),
                symptoms_present: symptoms(2),
                duration_days: 1,
            })
            .await
            .unwrap();
        assert!(matches!(outcome, StepOutcome::Prediction(_)));
    }

    #[tokio::test]
    async fn test_exhausted_pool_signals_none_then_terminates() {
        // 小目录：4 个症状在达到 10 个之前就耗尽候选
        let small_catalog = Arc::new(
            SymptomCatalog::from_names(
                (0..4).map(|i| format!("symptom_{:02}", i)).collect(),
            )
            .unwrap(),
        );
        let small_model = Arc::new(
            DecisionTreeModel::new(
                vec![TreeNode::Leaf {
                    label: "Flu".into(),
                }],
                4,
            )
            .unwrap(),
        );
        let reference_repository = reference_repository().await;
        let reference = Arc::new(ReferenceDataServiceImpl::new(reference_repository.clone()));
        let history = Arc::new(HistoryServiceImpl::new(
            Arc::new(InMemoryHistoryRepository::new()),
            reference_repository,
        ));
        let service = DiagnosisServiceImpl::new(
            small_catalog,
            small_model,
            NextSymptomSelector::with_seed(42),
            reference,
            history,
            MAX_CONFIRMED,
            0.97,
        );

        // 全部目录已确认：仍在收集，但已无候选可问
        let outcome = service
            .step(StepInput {
                current_symptom: Some("symptom_03".into()),
                symptoms_present: symptoms(3),
                duration_days: 1,
            })
            .await
            .unwrap();
        let StepOutcome::Question { next_symptom } = outcome else {
            panic!("expected question");
        };
        assert_eq!(next_symptom, None);

        // 客户端下一步不再提供当前症状：必须终止，不得循环
        let outcome = service
            .step(StepInput {
                current_symptom: None,
                symptoms_present: symptoms(4),
                duration_days: 1,
            })
            .await
            .unwrap();
        assert!(matches!(outcome, StepOutcome::Prediction(_)));
    }

    #[tokio::test]
    async fn test_prediction_uses_fallbacks_for_missing_reference_data() {
        let service = service().await;
        // symptom_01 不触发 Flu 分支 -> Healthy，参考数据中无 Healthy 条目
        let outcome = service
            .step(StepInput {
                current_symptom: None,
                symptoms_present: vec!["symptom_01".into()],
                duration_days: 3,
            })
            .await
            .unwrap();

        let StepOutcome::Prediction(report) = outcome else {
            panic!("expected prediction");
        };
        assert_eq!(report.disease, "Healthy");
        assert_eq!(report.description, FALLBACK_DESCRIPTION);
        assert_eq!(report.precautions, vec![FALLBACK_PRECAUTION.to_string()]);
    }

    #[tokio::test]
    async fn test_prediction_joins_reference_data() {
        let service = service().await;
        let outcome = service
            .step(StepInput {
                current_symptom: None,
                symptoms_present: vec!["symptom_00".into()],
                duration_days: 7,
            })
            .await
            .unwrap();

        let StepOutcome::Prediction(report) = outcome else {
            panic!("expected prediction");
        };
        assert_eq!(report.disease, "Flu");
        assert_eq!(report.description, "A viral infection");
        assert_eq!(report.precautions.len(), 2);
        // raw=6, days=7, |confirmed|=1 -> factor=21 > 13
        assert!((report.severity_factor - 21.0).abs() < 1e-9);
        assert_eq!(report.assessment, SeverityAssessment::SeekConsultation);
    }

    #[tokio::test]
    async fn test_unknown_symptoms_do_not_change_outcome() {
        let service = service().await;
        let with_unknown = service
            .step(StepInput {
                current_symptom: None,
                symptoms_present: vec!["symptom_00".into(), "telepathy".into()],
                duration_days: 7,
            })
            .await
            .unwrap();
        let without = service
            .step(StepInput {
                current_symptom: None,
                symptoms_present: vec!["symptom_00".into()],
                duration_days: 7,
            })
            .await
            .unwrap();

        let (StepOutcome::Prediction(a), StepOutcome::Prediction(b)) = (with_unknown, without)
        else {
            panic!("expected predictions");
        };
        assert_eq!(a.disease, b.disease);
        assert!((a.severity_factor - b.severity_factor).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_history_failure_does_not_affect_result() {
        let mut history_repository = MockHistoryRepository::new();
        history_repository
            .expect_append_symptom()
            .returning(|_| Err(crate::error::AppError::Storage("log down".into())));
        history_repository
            .expect_append_disease()
            .returning(|_| Err(crate::error::AppError::Storage("log down".into())));

        let service = service_with_history(Arc::new(history_repository)).await;
        let outcome = service
            .step(StepInput {
                current_symptom: Some("symptom_00".into()),
                symptoms_present: symptoms(9),
                duration_days: 2,
            })
            .await
            .unwrap();
        assert!(matches!(outcome, StepOutcome::Prediction(_)));
    }
}
