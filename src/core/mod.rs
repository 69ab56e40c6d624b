pub mod artifacts;
pub mod batch;
pub mod features;
pub mod inspect;
pub mod service;

pub use crate::domain::model::{FeatureVector, PredictionResult};
pub use crate::domain::ports::{ArtifactSource, ModelMetadata, RegressionEstimator, ScalingTransform};
pub use crate::utils::error::Result;
