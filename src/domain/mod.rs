// Domain layer: puzzle models and ports (interfaces) to external collaborators.

pub mod model;
pub mod ports;
