use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const FEATURE_COUNT: usize = 5;

/// 特徵欄位順序。scaler 與 estimator 都是依這個欄位順序 fit 的，
/// 順序錯了不會報錯，只會得到錯的價格。
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "bedrooms",
    "bathrooms",
    "livingArea",
    "condition",
    "schoolsNearby",
];

/// 部署端的價格校正係數：最終價格 = 模型原始輸出 × 9。
///
/// 這是上線時加上的業務規則，不是模型參數；來源未記錄，照原樣保留。
/// 每次預測只乘一次。
pub const PRICE_CORRECTION_FACTOR: f64 = 9.0;

/// 固定順序的 5 維特徵向量
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|candidate| *candidate == name)
            .map(|index| self.values[index])
    }
}

/// 單筆房屋特徵，欄位名稱與 HTTP / CSV 介面一致
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseFeatures {
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub living_area: f64,
    pub condition: f64,
    pub schools_nearby: f64,
}

impl From<&HouseFeatures> for FeatureVector {
    fn from(house: &HouseFeatures) -> Self {
        FeatureVector::new([
            house.bedrooms,
            house.bathrooms,
            house.living_area,
            house.condition,
            house.schools_nearby,
        ])
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    /// estimator 的原始輸出 (未乘係數)
    pub raw_estimate: f64,
    pub predicted_price: f64,
}

impl PredictionResult {
    pub fn from_raw_estimate(raw_estimate: f64) -> Self {
        Self {
            raw_estimate,
            predicted_price: raw_estimate * PRICE_CORRECTION_FACTOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predicted_price: f64,
}

impl From<PredictionResult> for PredictionResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            predicted_price: result.predicted_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub estimator: String,
    pub loaded_at: DateTime<Utc>,
}
