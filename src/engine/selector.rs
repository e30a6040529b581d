use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::catalog::SymptomCatalog;

/// 下一个症状选择器
///
/// 在目录减去已确认集合的候选中均匀随机选取，避免按原始特征顺序
/// 提问带来的系统性偏差。候选耗尽时返回 None，表示无症状可问。
///
/// 随机源可注入种子，便于测试固定提问序列；生产环境使用系统熵。
pub struct NextSymptomSelector {
    rng: Mutex<StdRng>,
}

impl NextSymptomSelector {
    /// 使用系统熵创建选择器
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// 使用固定种子创建选择器（可复现）
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// 从可选种子构建，None 时退回系统熵
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }

    /// 选择下一个要询问的症状
    pub fn select_next(&self, confirmed: &[String], catalog: &SymptomCatalog) -> Option<String> {
        let candidates = catalog.remaining(confirmed);
        if candidates.is_empty() {
            return None;
        }
        let pick = self.rng.lock().gen_range(0..candidates.len());
        Some(candidates[pick].to_string())
    }
}

impl Default for NextSymptomSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SymptomCatalog {
        SymptomCatalog::from_names(vec![
            "fever".into(),
            "cough".into(),
            "fatigue".into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_selection_drawn_from_remaining_candidates() {
        let catalog = catalog();
        let selector = NextSymptomSelector::with_seed(7);
        let confirmed = vec!["cough".to_string()];
        for _ in 0..20 {
            let pick = selector.select_next(&confirmed, &catalog).unwrap();
            assert!(pick == "fever" || pick == "fatigue");
        }
    }

    #[test]
    fn test_exhausted_pool_returns_none() {
        let catalog = catalog();
        let selector = NextSymptomSelector::with_seed(7);
        let confirmed = vec![
            "fever".to_string(),
            "cough".to_string(),
            "fatigue".to_string(),
        ];
        assert_eq!(selector.select_next(&confirmed, &catalog), None);
    }

    #[test]
    fn test_seeded_selection_is_reproducible() {
        let catalog = catalog();
        let confirmed: Vec<String> = vec![];

        let first: Vec<String> = {
            let selector = NextSymptomSelector::with_seed(42);
            (0..10)
                .map(|_| selector.select_next(&confirmed, &catalog).unwrap())
                .collect()
        };
        let second: Vec<String> = {
            let selector = NextSymptomSelector::with_seed(42);
            (0..10)
                .map(|_| selector.select_next(&confirmed, &catalog).unwrap())
                .collect()
        };
        assert_eq!(first, second);
    }
}
