use crate::config::detector_config::DetectorConfig;
use crate::core::flat_area::contour::{build_mask, external_contours};
use crate::core::flat_area::edges::canny_l1;
use crate::domain::model::FlatAreaRenders;
use crate::utils::error::{KitError, Result};
use crate::utils::monitor::SystemMonitor;
use crate::utils::validation::Validate;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::dilate_mut;
use std::path::Path;
use tracing::{debug, info, instrument};

/// 載入影像；找不到檔案或無法解碼時回傳錯誤
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(KitError::ImageNotFound {
            path: path.display().to_string(),
        });
    }

    let image = image::open(path)?;
    info!(
        width = image.width(),
        height = image.height(),
        "Image loaded"
    );
    Ok(image)
}

/// 以遮罩合成：遮罩為 0 的像素塗黑
pub fn apply_mask(image: &RgbImage, mask: &GrayImage) -> Result<RgbImage> {
    if image.dimensions() != mask.dimensions() {
        return Err(KitError::DimensionMismatch {
            expected: image.dimensions(),
            actual: mask.dimensions(),
        });
    }

    let mut result = image.clone();
    for (pixel, mask_pixel) in result.pixels_mut().zip(mask.pixels()) {
        if mask_pixel[0] == 0 {
            pixel.0 = [0, 0, 0];
        }
    }
    Ok(result)
}

/// 平面區域偵測：灰階 → 模糊 → Canny → 膨脹 → 外部輪廓 → 面積門檻遮罩
pub struct FlatAreaDetector {
    config: DetectorConfig,
    monitor: SystemMonitor,
}

impl FlatAreaDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            monitor: SystemMonitor::default(),
        }
    }

    pub fn with_monitoring(mut self, enabled: bool) -> Self {
        self.monitor = SystemMonitor::new(enabled);
        self
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// 設定不合法時回傳錯誤，不進入影像處理
    #[instrument(skip_all)]
    pub fn detect(&mut self, image: &DynamicImage) -> Result<FlatAreaRenders> {
        self.config.validate()?;
        let (width, height) = (self.config.target_width, self.config.target_height);

        let original = imageops::resize(&image.to_rgb8(), width, height, FilterType::Triangle);
        debug!(width, height, "Resized input");

        let gray = imageops::grayscale(&original);
        let blurred = gaussian_blur_f32(&gray, self.config.blur_sigma);
        debug!(sigma = self.config.blur_sigma, "Applied Gaussian blur");
        self.monitor.log_stage("Preprocessing");

        let edges = canny_l1(&blurred, self.config.canny_low, self.config.canny_high);
        let edge_pixels = edges.as_raw().iter().filter(|&&v| v > 0).count();
        debug!(edge_pixels, "Canny edge detection complete");

        let mut dilated = edges.clone();
        for _ in 0..self.config.dilate_iterations {
            dilate_mut(&mut dilated, Norm::LInf, 1);
        }
        self.monitor.log_stage("Edge detection");

        let contours = external_contours(&dilated);
        let (mask, summaries) = build_mask(width, height, &contours, self.config.min_flat_area);
        let result = apply_mask(&original, &mask)?;
        self.monitor.log_stage("Masking");

        let renders = FlatAreaRenders {
            original,
            edges,
            mask,
            result,
            contours: summaries,
        };

        info!(
            contours = renders.contours.len(),
            blocked = renders.blocked_count(),
            flat_ratio = renders.flat_ratio(),
            "Flat area mask built"
        );

        Ok(renders)
    }
}

impl Default for FlatAreaDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb};

    #[test]
    fn test_apply_mask_blacks_out_blocked_pixels() {
        let image = RgbImage::from_pixel(4, 4, Rgb([10, 20, 30]));
        let mut mask = GrayImage::from_pixel(4, 4, Luma([255]));
        mask.put_pixel(1, 2, Luma([0]));

        let result = apply_mask(&image, &mask).unwrap();
        assert_eq!(result.get_pixel(1, 2), &Rgb([0, 0, 0]));
        assert_eq!(result.get_pixel(0, 0), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_apply_mask_dimension_mismatch() {
        let image = RgbImage::new(4, 4);
        let mask = GrayImage::new(4, 5);
        assert!(matches!(
            apply_mask(&image, &mask),
            Err(KitError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_load_image_missing_file() {
        let err = load_image("definitely_missing_phone_case.jpg").unwrap_err();
        assert!(matches!(err, KitError::ImageNotFound { .. }));
    }

    #[test]
    fn test_load_image_undecodable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phone_case.jpg");
        std::fs::write(&path, b"not really a jpeg").unwrap();

        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, KitError::ImageError(_)));
    }

    #[test]
    fn test_resizes_to_target_resolution() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 32, Rgb([200, 200, 200])));
        let renders = FlatAreaDetector::default().detect(&image).unwrap();

        assert_eq!(renders.original.dimensions(), (500, 1000));
        assert_eq!(renders.edges.dimensions(), (500, 1000));
        assert_eq!(renders.mask.dimensions(), (500, 1000));
        assert_eq!(renders.result.dimensions(), (500, 1000));
    }

    #[test]
    fn test_invalid_config_is_error_not_panic() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(50, 100, Rgb([255, 255, 255])));

        let inverted = DetectorConfig {
            canny_low: 200.0,
            canny_high: 100.0,
            ..Default::default()
        };
        assert!(matches!(
            FlatAreaDetector::new(inverted).detect(&image),
            Err(KitError::ConfigValidationError { .. })
        ));

        let no_blur = DetectorConfig {
            blur_sigma: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            FlatAreaDetector::new(no_blur).detect(&image),
            Err(KitError::InvalidConfigValueError { .. })
        ));
    }
}
