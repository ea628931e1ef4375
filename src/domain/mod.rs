// Domain layer: record/rule types and the traits the pipeline is assembled from.

pub mod model;
pub mod ports;
