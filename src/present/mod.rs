pub mod directory;
#[cfg(feature = "gui")]
pub mod window;

pub use directory::DirectoryPresenter;
#[cfg(feature = "gui")]
pub use window::WindowPresenter;
