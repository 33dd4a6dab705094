pub mod contour;
pub mod edges;
pub mod pipeline;

pub use pipeline::{apply_mask, load_image, FlatAreaDetector};
