use crate::config::replay_config::ReplayConfig;
use crate::utils::error::{KitError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, ORIGIN, REFERER};
use reqwest::Client;
use std::time::Duration;

pub const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

fn header_value(field: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| KitError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: format!("Not a valid header value: {}", e),
    })
}

/// ColorPark API 客戶端：單一端點、固定標頭的 JSON POST
#[derive(Debug, Clone)]
pub struct ColorparkClient {
    client: Client,
    endpoint: String,
}

impl ColorparkClient {
    pub fn new(config: &ReplayConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("token"), header_value("token", &config.token)?);
        headers.insert(ORIGIN, header_value("origin", &config.origin)?);
        headers.insert(REFERER, header_value("referer", &config.referer)?);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 送出 JSON 並解析回應；HTTP 狀態碼不檢查，非 JSON 內容視為失敗
    pub async fn post_json(&self, payload: &serde_json::Value) -> Result<serde_json::Value> {
        tracing::debug!("Making API request to: {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(serde_json::to_vec(payload)?)
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());

        let body = response.text().await?;
        let json_data: serde_json::Value = serde_json::from_str(&body)?;
        Ok(json_data)
    }
}
