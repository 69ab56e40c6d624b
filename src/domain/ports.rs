use crate::utils::error::{ModelError, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// 對已 fit 模型物件的型別化查詢，取代執行期的屬性探測。
/// 只給離線檢查工具使用，不在預測路徑上。
pub trait ModelMetadata {
    fn kind(&self) -> &str;

    fn feature_importances(&self) -> Option<Vec<f64>> {
        None
    }

    fn coefficients(&self) -> Option<Vec<f64>> {
        None
    }

    fn params(&self) -> BTreeMap<String, serde_json::Value> {
        BTreeMap::new()
    }
}

/// 已 fit 的特徵縮放轉換，載入後不可變
pub trait ScalingTransform: ModelMetadata + Send + Sync {
    fn n_features_in(&self) -> usize;

    fn transform(&self, features: &[f64]) -> std::result::Result<Vec<f64>, ModelError>;
}

/// 已 fit 的回歸模型：縮放後的特徵向量 -> 單一數值
pub trait RegressionEstimator: ModelMetadata + Send + Sync {
    fn n_features_in(&self) -> usize;

    fn predict(&self, scaled: &[f64]) -> std::result::Result<f64, ModelError>;
}

/// 讀取 artifact 原始位元組的來源
#[async_trait]
pub trait ArtifactSource: Send + Sync {
    /// artifact 的位置描述，用於錯誤訊息與 log
    fn locate(&self, name: &str) -> String;

    /// 檔案不存在時回傳 `ServeError::ArtifactNotFound`
    async fn read_artifact(&self, name: &str) -> Result<Vec<u8>>;
}
