use crate::domain::ports::{ModelMetadata, ScalingTransform};
use crate::utils::error::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_true() -> bool {
    true
}

/// 標準化轉換：`(x - mean) / scale`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    #[serde(default = "default_true")]
    pub with_mean: bool,
    #[serde(default = "default_true")]
    pub with_std: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub var: Option<Vec<f64>>,
    /// 訓練時的欄位名稱 (若訓練端有匯出)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self {
            mean,
            scale,
            with_mean: true,
            with_std: true,
            var: None,
            feature_names: None,
        }
    }

    /// mean = 0, scale = 1
    pub fn identity(n_features: usize) -> Self {
        Self::new(vec![0.0; n_features], vec![1.0; n_features])
    }

    /// 檢查參數是否自洽，回傳不合法的原因
    pub fn check(&self) -> Result<(), String> {
        if self.mean.is_empty() {
            return Err("scaler has no features".to_string());
        }
        if self.mean.len() != self.scale.len() {
            return Err(format!(
                "mean has {} entries but scale has {}",
                self.mean.len(),
                self.scale.len()
            ));
        }
        if let Some(var) = &self.var {
            if var.len() != self.mean.len() {
                return Err(format!(
                    "var has {} entries, expected {}",
                    var.len(),
                    self.mean.len()
                ));
            }
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.mean.len() {
                return Err(format!(
                    "feature_names has {} entries, expected {}",
                    names.len(),
                    self.mean.len()
                ));
            }
        }
        if let Some(index) = self.mean.iter().position(|m| !m.is_finite()) {
            return Err(format!("mean[{}] is not finite", index));
        }
        if let Some(index) = self
            .scale
            .iter()
            .position(|s| !s.is_finite() || *s == 0.0)
        {
            return Err(format!("scale[{}] must be finite and non-zero", index));
        }
        Ok(())
    }
}

impl ModelMetadata for StandardScaler {
    fn kind(&self) -> &str {
        "standard_scaler"
    }

    fn params(&self) -> BTreeMap<String, serde_json::Value> {
        let mut params = BTreeMap::new();
        params.insert("n_features_in".to_string(), self.mean.len().into());
        params.insert("with_mean".to_string(), self.with_mean.into());
        params.insert("with_std".to_string(), self.with_std.into());
        params.insert("mean".to_string(), self.mean.clone().into());
        params.insert("scale".to_string(), self.scale.clone().into());
        if let Some(var) = &self.var {
            params.insert("var".to_string(), var.clone().into());
        }
        if let Some(names) = &self.feature_names {
            params.insert("feature_names".to_string(), names.clone().into());
        }
        params
    }
}

impl ScalingTransform for StandardScaler {
    fn n_features_in(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        if features.len() != self.mean.len() {
            return Err(ModelError::FeatureCountMismatch {
                expected: self.mean.len(),
                actual: features.len(),
            });
        }

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| {
                let centered = if self.with_mean { x - mean } else { *x };
                if self.with_std {
                    centered / scale
                } else {
                    centered
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_standardizes_each_column() {
        let scaler = StandardScaler::new(vec![2.0, 1000.0], vec![0.5, 250.0]);

        let scaled = scaler.transform(&[3.0, 1500.0]).unwrap();

        assert_eq!(scaled, vec![2.0, 2.0]);
    }

    #[test]
    fn test_identity_leaves_values_untouched() {
        let scaler = StandardScaler::identity(5);

        let scaled = scaler.transform(&[3.0, 2.0, 1500.0, 4.0, 5.0]).unwrap();

        assert_eq!(scaled, vec![3.0, 2.0, 1500.0, 4.0, 5.0]);
    }

    #[test]
    fn test_without_mean_only_scales() {
        let mut scaler = StandardScaler::new(vec![10.0], vec![2.0]);
        scaler.with_mean = false;

        assert_eq!(scaler.transform(&[8.0]).unwrap(), vec![4.0]);
    }

    #[test]
    fn test_transform_rejects_wrong_width() {
        let scaler = StandardScaler::identity(4);

        let err = scaler.transform(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap_err();

        assert_eq!(
            err,
            ModelError::FeatureCountMismatch {
                expected: 4,
                actual: 5
            }
        );
    }

    #[test]
    fn test_check_rejects_inconsistent_parameters() {
        assert!(StandardScaler::identity(5).check().is_ok());
        assert!(StandardScaler::new(vec![0.0; 5], vec![1.0; 4]).check().is_err());
        assert!(StandardScaler::new(vec![0.0], vec![0.0]).check().is_err());
        assert!(StandardScaler::new(vec![], vec![]).check().is_err());
    }

    #[test]
    fn test_params_expose_fitted_statistics() {
        let scaler = StandardScaler::new(vec![3.0, 2.0], vec![1.0, 0.5]);
        let params = scaler.params();

        assert_eq!(params["n_features_in"], serde_json::json!(2));
        assert_eq!(params["mean"], serde_json::json!([3.0, 2.0]));
        assert!(!params.contains_key("var"));
    }
}
