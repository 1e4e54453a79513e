// Domain layer: records served by the API and the ports the engine depends on.

pub mod model;
pub mod ports;
