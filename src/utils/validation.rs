use crate::utils::error::{KitError, Result};
use image::ImageFormat;
use reqwest::header::HeaderValue;
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl Display, reason: impl Into<String>) -> KitError {
    KitError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// API 端點與 Origin/Referer：必須是有主機名稱的 http(s) URL
pub fn validate_endpoint(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| invalid(field, value, format!("Invalid URL: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field,
            value,
            format!("Unsupported URL scheme: {}", url.scheme()),
        ));
    }
    if url.host_str().is_none() {
        return Err(invalid(field, value, "URL has no host"));
    }
    Ok(())
}

/// 直接放進 request header 的值（例如 token）
pub fn validate_header_value(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "Header value cannot be empty"));
    }
    HeaderValue::from_str(value)
        .map_err(|_| invalid(field, "<redacted>", "Header value contains invalid characters"))?;
    Ok(())
}

/// 機台、商品等編號：非空的純數字字串
pub fn validate_numeric_id(field: &str, value: &str) -> Result<()> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(field, value, "Expected a non-empty string of digits"));
    }
    Ok(())
}

/// 影像路徑：副檔名必須是 image crate 支援的格式
pub fn validate_image_path(field: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(invalid(field, "", "Path cannot be empty"));
    }
    ImageFormat::from_path(path).map_err(|_| {
        invalid(
            field,
            path.display(),
            "Unsupported or missing image extension (expected jpg, png, bmp, ...)",
        )
    })?;
    Ok(())
}

/// NaN 一律不在範圍內
pub fn validate_range<T: PartialOrd + Display + Copy>(
    field: &str,
    value: T,
    range: RangeInclusive<T>,
) -> Result<()> {
    if !range.contains(&value) {
        return Err(invalid(
            field,
            value,
            format!("Value must be between {} and {}", range.start(), range.end()),
        ));
    }
    Ok(())
}
