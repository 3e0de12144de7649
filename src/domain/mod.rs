// Domain layer: quote models, selection snapshots and ports (interfaces).

pub mod model;
pub mod ports;
pub mod selection;
