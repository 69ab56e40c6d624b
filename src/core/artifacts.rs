use crate::adapters::fs::LocalArtifactSource;
use crate::adapters::json_format::{decode_estimator, decode_scaler, ScalerArtifact};
use crate::domain::model::{FEATURE_COUNT, FEATURE_NAMES};
use crate::domain::ports::{ArtifactSource, ModelMetadata, RegressionEstimator, ScalingTransform};
use crate::utils::error::{Result, ServeError};
use chrono::{DateTime, Utc};
use std::path::Path;

pub const DEFAULT_SCALER_FILE: &str = "scaler.json";
pub const DEFAULT_MODEL_FILE: &str = "house_price_model.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    pub scaler: String,
    pub estimator: String,
}

impl Default for ArtifactNames {
    fn default() -> Self {
        Self {
            scaler: DEFAULT_SCALER_FILE.to_string(),
            estimator: DEFAULT_MODEL_FILE.to_string(),
        }
    }
}

/// 啟動時載入一次的 scaler 與 estimator，之後只讀
pub struct ArtifactStore {
    scaler: Box<dyn ScalingTransform>,
    estimator: Box<dyn RegressionEstimator>,
    loaded_at: DateTime<Utc>,
}

impl ArtifactStore {
    pub fn new(
        scaler: impl ScalingTransform + 'static,
        estimator: impl RegressionEstimator + 'static,
    ) -> Self {
        Self::from_boxed(Box::new(scaler), Box::new(estimator))
    }

    pub fn from_boxed(
        scaler: Box<dyn ScalingTransform>,
        estimator: Box<dyn RegressionEstimator>,
    ) -> Self {
        Self {
            scaler,
            estimator,
            loaded_at: Utc::now(),
        }
    }

    pub fn scaler(&self) -> &dyn ScalingTransform {
        self.scaler.as_ref()
    }

    pub fn estimator(&self) -> &dyn RegressionEstimator {
        self.estimator.as_ref()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

impl std::fmt::Debug for ArtifactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactStore")
            .field("scaler", &self.scaler.kind())
            .field("estimator", &self.estimator.kind())
            .field("loaded_at", &self.loaded_at)
            .finish()
    }
}

/// 從目錄載入預設檔名的 artifact
pub async fn load_artifacts(directory: impl AsRef<Path>) -> Result<ArtifactStore> {
    let source = LocalArtifactSource::new(directory.as_ref());
    load_from_source(&source, &ArtifactNames::default()).await
}

pub async fn load_from_source<S>(source: &S, names: &ArtifactNames) -> Result<ArtifactStore>
where
    S: ArtifactSource + ?Sized,
{
    // 先確認兩個檔案都存在，再解析
    let scaler_bytes = source.read_artifact(&names.scaler).await?;
    let estimator_bytes = source.read_artifact(&names.estimator).await?;

    let scaler = decode_scaler(&scaler_bytes).map_err(|reason| ServeError::ArtifactCorrupt {
        path: source.locate(&names.scaler),
        reason,
    })?;
    check_feature_names(&scaler, &source.locate(&names.scaler))?;
    let scaler = scaler.into_transform();

    let estimator = decode_estimator(&estimator_bytes)
        .map_err(|reason| ServeError::ArtifactCorrupt {
            path: source.locate(&names.estimator),
            reason,
        })?
        .into_estimator();

    // 維度不符在 predict 時才報錯，這裡只提醒
    if scaler.n_features_in() != FEATURE_COUNT {
        tracing::warn!(
            "⚠️ Scaler expects {} features, requests carry {}",
            scaler.n_features_in(),
            FEATURE_COUNT
        );
    }
    if estimator.n_features_in() != scaler.n_features_in() {
        tracing::warn!(
            "⚠️ Estimator expects {} features but scaler produces {}",
            estimator.n_features_in(),
            scaler.n_features_in()
        );
    }

    tracing::info!(
        "✅ Loaded {} ({}) and {} ({})",
        names.scaler,
        scaler.kind(),
        names.estimator,
        estimator.kind()
    );

    Ok(ArtifactStore::from_boxed(scaler, estimator))
}

/// 若 scaler 帶有訓練時的欄位名稱，順序必須與請求欄位一致
fn check_feature_names(scaler: &ScalerArtifact, path: &str) -> Result<()> {
    let ScalerArtifact::StandardScaler(standard) = scaler;
    let Some(names) = &standard.feature_names else {
        return Ok(());
    };

    if names.len() == FEATURE_COUNT && names.iter().zip(FEATURE_NAMES).any(|(a, b)| a != b) {
        return Err(ServeError::ArtifactCorrupt {
            path: path.to_string(),
            reason: format!(
                "scaler was fit on columns {:?}, expected {:?}",
                names, FEATURE_NAMES
            ),
        });
    }

    Ok(())
}
