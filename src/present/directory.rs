use crate::domain::model::FlatAreaRenders;
use crate::domain::ports::Presenter;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub const ORIGINAL_FILE: &str = "original.png";
pub const EDGES_FILE: &str = "edges.png";
pub const MASK_FILE: &str = "mask.png";
pub const RESULT_FILE: &str = "result.png";

/// 把四張影像寫成 PNG 到指定目錄
#[derive(Debug, Clone)]
pub struct DirectoryPresenter {
    base_path: PathBuf,
}

impl DirectoryPresenter {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Presenter for DirectoryPresenter {
    fn present(&self, renders: &FlatAreaRenders) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;

        renders.original.save(self.base_path.join(ORIGINAL_FILE))?;
        renders.edges.save(self.base_path.join(EDGES_FILE))?;
        renders.mask.save(self.base_path.join(MASK_FILE))?;
        renders.result.save(self.base_path.join(RESULT_FILE))?;

        tracing::info!("💾 Renders written to: {}", self.base_path.display());
        Ok(())
    }
}
