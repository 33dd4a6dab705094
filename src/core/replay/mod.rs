pub mod client;
pub mod payloads;
pub mod sequence;
pub mod steps;

pub use client::ColorparkClient;
pub use sequence::ReplaySequence;
pub use steps::extract_works_id;
