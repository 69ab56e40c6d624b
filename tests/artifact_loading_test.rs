use house_price_serve::adapters::estimator::LinearRegressor;
use house_price_serve::adapters::json_format::{encode, EstimatorArtifact, ScalerArtifact};
use house_price_serve::adapters::scaler::StandardScaler;
use house_price_serve::core::artifacts::{DEFAULT_MODEL_FILE, DEFAULT_SCALER_FILE};
use house_price_serve::{
    load_artifacts, load_from_source, ArtifactNames, FeatureVector, LocalArtifactSource,
    PredictionService, ServeError,
};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn write_scaler(dir: &Path, name: &str, scaler: StandardScaler) {
    let bytes = encode(&ScalerArtifact::StandardScaler(scaler)).unwrap();
    std::fs::write(dir.join(name), bytes).unwrap();
}

fn write_linear(dir: &Path, name: &str, model: LinearRegressor) {
    let bytes = encode(&EstimatorArtifact::LinearRegression(model)).unwrap();
    std::fs::write(dir.join(name), bytes).unwrap();
}

/// 完整流程：從目錄載入 -> 預測
#[tokio::test]
async fn test_load_and_predict_from_directory() {
    let temp_dir = TempDir::new().unwrap();
    write_scaler(temp_dir.path(), DEFAULT_SCALER_FILE, StandardScaler::identity(5));
    write_linear(
        temp_dir.path(),
        DEFAULT_MODEL_FILE,
        LinearRegressor::new(vec![1.0; 5], 0.0),
    );

    let store = load_artifacts(temp_dir.path()).await.unwrap();
    let service = PredictionService::new(Arc::new(store));

    let result = service
        .predict(&FeatureVector::new([3.0, 2.0, 1500.0, 4.0, 5.0]))
        .unwrap();

    assert_eq!(result.raw_estimate, 1514.0);
    assert_eq!(result.predicted_price, 13626.0);
}

#[tokio::test]
async fn test_missing_estimator_file_fails_startup() {
    let temp_dir = TempDir::new().unwrap();
    write_scaler(temp_dir.path(), DEFAULT_SCALER_FILE, StandardScaler::identity(5));

    let err = load_artifacts(temp_dir.path()).await.unwrap_err();

    match err {
        ServeError::ArtifactNotFound { path } => assert!(path.ends_with(DEFAULT_MODEL_FILE)),
        other => panic!("expected ArtifactNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_directory_fails_startup() {
    let temp_dir = TempDir::new().unwrap();

    let err = load_artifacts(temp_dir.path().join("does-not-exist"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServeError::ArtifactNotFound { .. }));
    assert_eq!(err.exit_code(), 3);
}

#[tokio::test]
async fn test_truncated_estimator_is_corrupt() {
    let temp_dir = TempDir::new().unwrap();
    write_scaler(temp_dir.path(), DEFAULT_SCALER_FILE, StandardScaler::identity(5));
    write_linear(
        temp_dir.path(),
        DEFAULT_MODEL_FILE,
        LinearRegressor::new(vec![1.0; 5], 0.0),
    );

    let model_path = temp_dir.path().join(DEFAULT_MODEL_FILE);
    let bytes = std::fs::read(&model_path).unwrap();
    std::fs::write(&model_path, &bytes[..bytes.len() / 2]).unwrap();

    let err = load_artifacts(temp_dir.path()).await.unwrap_err();

    match err {
        ServeError::ArtifactCorrupt { path, reason } => {
            assert!(path.ends_with(DEFAULT_MODEL_FILE));
            assert!(reason.starts_with("malformed JSON"));
        }
        other => panic!("expected ArtifactCorrupt, got {other:?}"),
    }
}

#[tokio::test]
async fn test_pickle_bytes_are_corrupt() {
    let temp_dir = TempDir::new().unwrap();
    // pickle protocol 4 header
    std::fs::write(
        temp_dir.path().join(DEFAULT_SCALER_FILE),
        [0x80u8, 0x04, 0x95, 0x00, 0x01],
    )
    .unwrap();
    write_linear(
        temp_dir.path(),
        DEFAULT_MODEL_FILE,
        LinearRegressor::new(vec![1.0; 5], 0.0),
    );

    let err = load_artifacts(temp_dir.path()).await.unwrap_err();

    assert!(matches!(err, ServeError::ArtifactCorrupt { .. }));
}

#[test]
fn test_configured_file_names_are_used() {
    let temp_dir = TempDir::new().unwrap();
    write_scaler(temp_dir.path(), "scaler-v2.json", StandardScaler::identity(5));
    write_linear(
        temp_dir.path(),
        "model-v2.json",
        LinearRegressor::new(vec![2.0; 5], 1.0),
    );
    let source = LocalArtifactSource::new(temp_dir.path());
    let names = ArtifactNames {
        scaler: "scaler-v2.json".to_string(),
        estimator: "model-v2.json".to_string(),
    };

    let store = tokio_test::block_on(load_from_source(&source, &names)).unwrap();
    let service = PredictionService::new(Arc::new(store));
    let result = service
        .predict(&FeatureVector::new([1.0, 1.0, 1.0, 1.0, 1.0]))
        .unwrap();

    assert_eq!(result.raw_estimate, 11.0);
    assert_eq!(result.predicted_price, 99.0);
}

#[tokio::test]
async fn test_stale_four_feature_scaler_loads_but_cannot_predict() {
    let temp_dir = TempDir::new().unwrap();
    write_scaler(temp_dir.path(), DEFAULT_SCALER_FILE, StandardScaler::identity(4));
    write_linear(
        temp_dir.path(),
        DEFAULT_MODEL_FILE,
        LinearRegressor::new(vec![1.0; 4], 0.0),
    );

    let store = load_artifacts(temp_dir.path()).await.unwrap();
    let service = PredictionService::new(Arc::new(store));

    let err = service
        .predict(&FeatureVector::new([3.0, 2.0, 1500.0, 4.0, 5.0]))
        .unwrap_err();

    assert!(matches!(
        err,
        ServeError::ScalingDimensionMismatch {
            expected: 4,
            actual: 5
        }
    ));
}
