// Domain layer: per-cycle values and the ports the watcher drives.

pub mod model;
pub mod ports;
