// Adapters layer: concrete artifact formats, artifact sources and the HTTP client.

pub mod estimator;
pub mod fs;
pub mod http_client;
pub mod json_format;
pub mod scaler;
