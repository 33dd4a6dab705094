#[cfg(feature = "cli")]
pub mod cli;
pub mod detector_config;
pub mod replay_config;

#[cfg(feature = "cli")]
pub use cli::{DetectArgs, ReplayArgs};
pub use detector_config::DetectorConfig;
pub use replay_config::ReplayConfig;
