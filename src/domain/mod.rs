// Domain layer: calendar models and the ports the engine depends on.

pub mod model;
pub mod ports;
