// Domain layer: emotion models and the classifier port. No HTTP or config types in here.

pub mod model;
pub mod ports;
