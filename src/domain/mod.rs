// Domain layer: feature / prediction models and the ports the artifact adapters implement.

pub mod model;
pub mod ports;
