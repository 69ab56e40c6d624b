use crate::domain::ports::{ModelMetadata, RegressionEstimator};
use crate::utils::error::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `y = intercept + coef · x`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub coef: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

impl LinearRegressor {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Self {
        Self { coef, intercept }
    }

    pub fn check(&self) -> Result<(), String> {
        if self.coef.is_empty() {
            return Err("linear model has no coefficients".to_string());
        }
        if self.coef.iter().any(|c| !c.is_finite()) || !self.intercept.is_finite() {
            return Err("linear model parameters must be finite".to_string());
        }
        Ok(())
    }
}

impl ModelMetadata for LinearRegressor {
    fn kind(&self) -> &str {
        "linear_regression"
    }

    fn coefficients(&self) -> Option<Vec<f64>> {
        Some(self.coef.clone())
    }

    fn params(&self) -> BTreeMap<String, serde_json::Value> {
        let mut params = BTreeMap::new();
        params.insert("n_features_in".to_string(), self.coef.len().into());
        params.insert("intercept".to_string(), self.intercept.into());
        params
    }
}

impl RegressionEstimator for LinearRegressor {
    fn n_features_in(&self) -> usize {
        self.coef.len()
    }

    fn predict(&self, scaled: &[f64]) -> Result<f64, ModelError> {
        if scaled.len() != self.coef.len() {
            return Err(ModelError::FeatureCountMismatch {
                expected: self.coef.len(),
                actual: scaled.len(),
            });
        }

        Ok(self.intercept
            + self
                .coef
                .iter()
                .zip(scaled)
                .map(|(c, x)| c * x)
                .sum::<f64>())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// 扁平節點陣列，根節點在 index 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    fn check(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!(
                            "node {} splits on feature {} of {}",
                            index, feature, n_features
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {} has a non-finite threshold", index));
                    }
                    if *left >= self.nodes.len() || *right >= self.nodes.len() {
                        return Err(format!("node {} points outside the tree", index));
                    }
                }
                TreeNode::Leaf { value } if !value.is_finite() => {
                    return Err(format!("leaf {} is not finite", index));
                }
                TreeNode::Leaf { .. } => {}
            }
        }
        Ok(())
    }

    /// scikit-learn 規則：`x[feature] <= threshold` 往左
    fn evaluate(&self, tree_index: usize, x: &[f64]) -> Result<f64, ModelError> {
        let malformed = |reason: String| ModelError::MalformedTree {
            tree: tree_index,
            reason,
        };

        let mut cursor = 0;
        // 每一步都往下走，步數超過節點數代表有環
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(cursor) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = x.get(*feature).ok_or_else(|| {
                        malformed(format!("feature {} out of range", feature))
                    })?;
                    cursor = if *value <= *threshold { *left } else { *right };
                }
                None => return Err(malformed(format!("node {} does not exist", cursor))),
            }
        }

        Err(malformed("cycle detected".to_string()))
    }
}

/// 隨機森林回歸：所有樹輸出的平均
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    pub n_features_in: usize,
    pub trees: Vec<RegressionTree>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_importances: Option<Vec<f64>>,
    #[serde(default)]
    pub params: BTreeMap<String, serde_json::Value>,
}

impl RandomForestRegressor {
    pub fn new(n_features_in: usize, trees: Vec<RegressionTree>) -> Self {
        Self {
            n_features_in,
            trees,
            feature_importances: None,
            params: BTreeMap::new(),
        }
    }

    pub fn check(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (index, tree) in self.trees.iter().enumerate() {
            tree.check(self.n_features_in)
                .map_err(|reason| format!("tree {}: {}", index, reason))?;
        }
        if let Some(importances) = &self.feature_importances {
            if importances.len() != self.n_features_in {
                return Err(format!(
                    "feature_importances has {} entries, expected {}",
                    importances.len(),
                    self.n_features_in
                ));
            }
        }
        Ok(())
    }
}

impl ModelMetadata for RandomForestRegressor {
    fn kind(&self) -> &str {
        "random_forest_regressor"
    }

    fn feature_importances(&self) -> Option<Vec<f64>> {
        self.feature_importances.clone()
    }

    fn params(&self) -> BTreeMap<String, serde_json::Value> {
        let mut params = self.params.clone();
        params.insert("n_features_in".to_string(), self.n_features_in.into());
        params.insert("n_estimators".to_string(), self.trees.len().into());
        params
    }
}

impl RegressionEstimator for RandomForestRegressor {
    fn n_features_in(&self) -> usize {
        self.n_features_in
    }

    fn predict(&self, scaled: &[f64]) -> Result<f64, ModelError> {
        if scaled.len() != self.n_features_in {
            return Err(ModelError::FeatureCountMismatch {
                expected: self.n_features_in,
                actual: scaled.len(),
            });
        }
        if self.trees.is_empty() {
            return Err(ModelError::EmptyEnsemble);
        }

        let mut total = 0.0;
        for (index, tree) in self.trees.iter().enumerate() {
            total += tree.evaluate(index, scaled)?;
        }
        Ok(total / self.trees.len() as f64)
    }
}
