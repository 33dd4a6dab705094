pub mod config;
pub mod core;
pub mod domain;
pub mod present;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{DetectArgs, ReplayArgs};
pub use config::{DetectorConfig, ReplayConfig};

pub use crate::core::flat_area::{load_image, FlatAreaDetector};
pub use crate::core::replay::{ColorparkClient, ReplaySequence};
pub use domain::ports::Presenter;
pub use present::DirectoryPresenter;
pub use utils::error::{KitError, Result};
