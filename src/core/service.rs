use crate::core::artifacts::ArtifactStore;
use crate::core::features::build_feature_vector;
use crate::domain::model::{FeatureVector, PredictionResult, FEATURE_COUNT};
use crate::utils::error::{ModelError, Result, ServeError};
use std::sync::Arc;

/// scale -> estimate -> × PRICE_CORRECTION_FACTOR
///
/// 無狀態；同樣的輸入與 artifact 一定得到相同結果。
#[derive(Debug, Clone)]
pub struct PredictionService {
    store: Arc<ArtifactStore>,
}

impl PredictionService {
    pub fn new(store: Arc<ArtifactStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<PredictionResult> {
        let scaler = self.store.scaler();
        if scaler.n_features_in() != FEATURE_COUNT {
            return Err(ServeError::ScalingDimensionMismatch {
                expected: scaler.n_features_in(),
                actual: FEATURE_COUNT,
            });
        }

        let scaled = scaler
            .transform(features.as_slice())
            .map_err(ServeError::prediction_failed)?;
        if scaled.len() != FEATURE_COUNT {
            return Err(ServeError::ScalingDimensionMismatch {
                expected: FEATURE_COUNT,
                actual: scaled.len(),
            });
        }

        let raw_estimate = self
            .store
            .estimator()
            .predict(&scaled)
            .map_err(ServeError::prediction_failed)?;
        if !raw_estimate.is_finite() {
            return Err(ServeError::prediction_failed(ModelError::NonFiniteOutput {
                value: raw_estimate,
            }));
        }

        // 有限的原始值乘上係數後仍可能溢位
        let result = PredictionResult::from_raw_estimate(raw_estimate);
        if !result.predicted_price.is_finite() {
            return Err(ServeError::prediction_failed(ModelError::NonFiniteOutput {
                value: result.predicted_price,
            }));
        }
        tracing::debug!(
            raw_estimate = result.raw_estimate,
            predicted_price = result.predicted_price,
            "prediction computed"
        );
        Ok(result)
    }

    pub fn predict_payload(&self, payload: &serde_json::Value) -> Result<PredictionResult> {
        let features = build_feature_vector(payload)?;
        self.predict(&features)
    }
}
