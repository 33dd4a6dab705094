// Domain layer: plain models and ports shared by the detector and the replayer.

pub mod model;
pub mod ports;
