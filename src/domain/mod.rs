// Domain layer: variable model and the ports a vars plugin talks through.

pub mod model;
pub mod ports;
