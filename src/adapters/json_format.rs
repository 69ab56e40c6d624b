//! Versioned JSON export of the fitted scaler and estimator.
//!
//! Every artifact is a JSON object with a `format_version` and a `kind` tag:
//!
//! ```json
//! {"format_version": 1, "kind": "standard_scaler", "mean": [...], "scale": [...]}
//! {"format_version": 1, "kind": "linear_regression", "coef": [...], "intercept": 0.0}
//! ```

use crate::adapters::estimator::{LinearRegressor, RandomForestRegressor};
use crate::adapters::scaler::StandardScaler;
use crate::domain::ports::{ModelMetadata, RegressionEstimator, ScalingTransform};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const FORMAT_VERSION: u64 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerArtifact {
    StandardScaler(StandardScaler),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimatorArtifact {
    LinearRegression(LinearRegressor),
    RandomForestRegressor(RandomForestRegressor),
}

impl ScalerArtifact {
    pub fn into_transform(self) -> Box<dyn ScalingTransform> {
        match self {
            ScalerArtifact::StandardScaler(scaler) => Box::new(scaler),
        }
    }

    fn check(&self) -> Result<(), String> {
        match self {
            ScalerArtifact::StandardScaler(scaler) => scaler.check(),
        }
    }
}

impl EstimatorArtifact {
    pub fn into_estimator(self) -> Box<dyn RegressionEstimator> {
        match self {
            EstimatorArtifact::LinearRegression(model) => Box::new(model),
            EstimatorArtifact::RandomForestRegressor(model) => Box::new(model),
        }
    }

    fn check(&self) -> Result<(), String> {
        match self {
            EstimatorArtifact::LinearRegression(model) => model.check(),
            EstimatorArtifact::RandomForestRegressor(model) => model.check(),
        }
    }
}

/// 解析 JSON 並檢查 format_version，錯誤以字串描述原因
fn parse_versioned(bytes: &[u8]) -> Result<Value, String> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| format!("malformed JSON: {}", e))?;

    let version = match value.get("format_version") {
        Some(raw) => raw.as_u64().ok_or_else(|| {
            format!(
                "format_version must be an unsigned integer, got {} (expected {})",
                raw, FORMAT_VERSION
            )
        })?,
        None => return Err("missing format_version".to_string()),
    };

    if version != FORMAT_VERSION {
        return Err(format!(
            "unsupported format_version {} (expected {})",
            version, FORMAT_VERSION
        ));
    }
    Ok(value)
}

pub fn decode_scaler(bytes: &[u8]) -> Result<ScalerArtifact, String> {
    let value = parse_versioned(bytes)?;
    let artifact: ScalerArtifact =
        serde_json::from_value(value).map_err(|e| format!("invalid scaler: {}", e))?;
    artifact.check()?;
    Ok(artifact)
}

pub fn decode_estimator(bytes: &[u8]) -> Result<EstimatorArtifact, String> {
    let value = parse_versioned(bytes)?;
    let artifact: EstimatorArtifact =
        serde_json::from_value(value).map_err(|e| format!("invalid estimator: {}", e))?;
    artifact.check()?;
    Ok(artifact)
}

/// 不分種類載入任一 artifact，給檢查工具用
pub fn decode_any(bytes: &[u8]) -> Result<Box<dyn ModelMetadata>, String> {
    let value = parse_versioned(bytes)?;
    let kind = value
        .get("kind")
        .and_then(Value::as_str)
        .ok_or_else(|| "missing kind".to_string())?
        .to_string();

    if kind == "standard_scaler" {
        let ScalerArtifact::StandardScaler(scaler) = decode_scaler(bytes)?;
        return Ok(Box::new(scaler));
    }

    match decode_estimator(bytes)? {
        EstimatorArtifact::LinearRegression(model) => Ok(Box::new(model)),
        EstimatorArtifact::RandomForestRegressor(model) => Ok(Box::new(model)),
    }
}

pub fn encode<T: Serialize>(artifact: &T) -> serde_json::Result<Vec<u8>> {
    let mut value = serde_json::to_value(artifact)?;
    if let Value::Object(map) = &mut value {
        map.insert("format_version".to_string(), FORMAT_VERSION.into());
    }
    serde_json::to_vec_pretty(&value)
}
