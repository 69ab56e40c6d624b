use crate::domain::model::FEATURE_NAMES;
use crate::domain::ports::ModelMetadata;

/// 依 feature 名稱顯示；數量不符時改用 index
fn feature_label(index: usize, total: usize) -> String {
    if total == FEATURE_NAMES.len() {
        FEATURE_NAMES[index].to_string()
    } else {
        format!("[{}]", index)
    }
}

/// 人類可讀的 artifact 摘要
pub fn summarize(metadata: &dyn ModelMetadata) -> Vec<String> {
    let mut lines = vec![format!("kind: {}", metadata.kind())];

    let params = metadata.params();
    if !params.is_empty() {
        lines.push("params:".to_string());
        for (key, value) in &params {
            lines.push(format!("  {}: {}", key, value));
        }
    }

    if let Some(coef) = metadata.coefficients() {
        lines.push(format!("coefficients ({}):", coef.len()));
        for (index, value) in coef.iter().enumerate() {
            lines.push(format!("  {}: {}", feature_label(index, coef.len()), value));
        }
    }

    if let Some(importances) = metadata.feature_importances() {
        let mut ranked: Vec<(usize, f64)> = importances.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        lines.push(format!("feature importances ({}):", importances.len()));
        for (index, value) in ranked.into_iter().take(10) {
            lines.push(format!(
                "  {}: {:.4}",
                feature_label(index, importances.len()),
                value
            ));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::estimator::{LinearRegressor, RandomForestRegressor, RegressionTree, TreeNode};
    use crate::adapters::scaler::StandardScaler;

    #[test]
    fn test_linear_summary_lists_coefficients_by_feature() {
        let model = LinearRegressor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0], 10.0);

        let lines = summarize(&model);

        assert_eq!(lines[0], "kind: linear_regression");
        assert!(lines.contains(&"  intercept: 10.0".to_string()));
        assert!(lines.contains(&"  livingArea: 3".to_string()));
    }

    #[test]
    fn test_forest_summary_ranks_importances() {
        let mut forest = RandomForestRegressor::new(
            5,
            vec![RegressionTree {
                nodes: vec![TreeNode::Leaf { value: 1.0 }],
            }],
        );
        forest.feature_importances = Some(vec![0.1, 0.05, 0.6, 0.15, 0.1]);

        let lines = summarize(&forest);
        let header = lines
            .iter()
            .position(|line| line.starts_with("feature importances"))
            .unwrap();

        assert_eq!(lines[header + 1], "  livingArea: 0.6000");
        assert_eq!(lines[header + 2], "  condition: 0.1500");
    }

    #[test]
    fn test_scaler_summary_has_no_coefficients() {
        let lines = summarize(&StandardScaler::identity(4));

        assert_eq!(lines[0], "kind: standard_scaler");
        assert!(lines.iter().all(|line| !line.starts_with("coefficients")));
        assert!(lines.contains(&"  n_features_in: 4".to_string()));
    }
}
