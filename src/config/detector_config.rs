use crate::utils::error::{KitError, Result};
use crate::utils::validation::{validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 平面區域偵測的固定參數
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub target_width: u32,
    pub target_height: u32,
    /// 5x5 kernel、sigma 0 對應的 sigma
    pub blur_sigma: f32,
    pub canny_low: f32,
    pub canny_high: f32,
    /// 3x3 結構元素的膨脹次數
    pub dilate_iterations: u8,
    /// 小於此面積（px²）的輪廓視為凸起物
    pub min_flat_area: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            target_width: 500,
            target_height: 1000,
            blur_sigma: 1.1,
            canny_low: 50.0,
            canny_high: 150.0,
            dilate_iterations: 2,
            min_flat_area: 30_000.0,
        }
    }
}

impl DetectorConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| KitError::ConfigValidationError {
            field: "detector_toml_parsing".to_string(),
            message: format!("Detector TOML parsing error: {}", e),
        })
    }
}

impl Validate for DetectorConfig {
    fn validate(&self) -> Result<()> {
        validate_range("target_width", self.target_width, 1..=8192)?;
        validate_range("target_height", self.target_height, 1..=8192)?;
        validate_range("blur_sigma", self.blur_sigma, 0.1..=50.0)?;
        // |gx| + |gy| 的上限為 2 * 4 * 255
        validate_range("canny_low", self.canny_low, 1.0..=2040.0)?;
        validate_range("canny_high", self.canny_high, 1.0..=2040.0)?;

        if self.canny_low > self.canny_high {
            return Err(KitError::ConfigValidationError {
                field: "canny_low".to_string(),
                message: format!(
                    "canny_low ({}) must not exceed canny_high ({})",
                    self.canny_low, self.canny_high
                ),
            });
        }

        validate_range("dilate_iterations", self.dilate_iterations, 0..=20)?;

        if !self.min_flat_area.is_finite() || self.min_flat_area < 0.0 {
            return Err(KitError::InvalidConfigValueError {
                field: "min_flat_area".to_string(),
                value: self.min_flat_area.to_string(),
                reason: "Area threshold must be a non-negative number".to_string(),
            });
        }

        Ok(())
    }
}
