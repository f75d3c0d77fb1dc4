// Domain layer: launch records, control values and ports.

pub mod model;
pub mod ports;
