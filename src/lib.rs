pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::ServeConfig;

pub use adapters::fs::LocalArtifactSource;
pub use crate::core::{
    artifacts::{load_artifacts, load_from_source, ArtifactNames, ArtifactStore},
    features::build_feature_vector,
    service::PredictionService,
};
pub use domain::model::{
    FeatureVector, HouseFeatures, PredictionResult, FEATURE_NAMES, PRICE_CORRECTION_FACTOR,
};
pub use utils::error::{ModelError, Result, ServeError};
