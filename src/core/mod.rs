pub mod flat_area;
pub mod replay;

pub use crate::domain::model::{FlatAreaRenders, ReplayContext, StepOutcome};
pub use crate::domain::ports::{Presenter, ReplayStep};
pub use crate::utils::error::Result;
