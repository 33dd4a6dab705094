use image::{GrayImage, RgbImage};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// 單一外部輪廓的摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourSummary {
    pub area: f64,
    pub point_count: usize,
    /// (min_x, min_y, max_x, max_y)
    pub bounding_box: (i32, i32, i32, i32),
    /// 面積低於門檻，遮罩中被塗黑
    pub blocked: bool,
}

/// 平面區域偵測的四張輸出影像
#[derive(Debug, Clone)]
pub struct FlatAreaRenders {
    pub original: RgbImage,
    pub edges: GrayImage,
    pub mask: GrayImage,
    pub result: RgbImage,
    pub contours: Vec<ContourSummary>,
}

impl FlatAreaRenders {
    pub fn blocked_count(&self) -> usize {
        self.contours.iter().filter(|c| c.blocked).count()
    }

    /// 遮罩中保留（255）的像素比例
    pub fn flat_ratio(&self) -> f64 {
        let total = self.mask.as_raw().len();
        if total == 0 {
            return 0.0;
        }
        let open = self.mask.as_raw().iter().filter(|&&v| v == 255).count();
        open as f64 / total as f64
    }
}

/// 步驟失敗時的處理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// 印出錯誤並中止整個序列
    Abort,
    /// 印出錯誤後繼續下一步
    Continue,
}

/// 單一 API 步驟的執行結果
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub step_name: String,
    pub response: Option<serde_json::Value>,
    pub error: Option<String>,
    pub duration: Duration,
}

impl StepOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// 重放執行上下文，用於在步驟間傳遞數據
#[derive(Debug, Clone)]
pub struct ReplayContext {
    pub execution_id: String,
    pub outcomes: Vec<StepOutcome>,
    shared_data: HashMap<String, serde_json::Value>,
}

impl ReplayContext {
    pub fn new(execution_id: String) -> Self {
        Self {
            execution_id,
            outcomes: Vec::new(),
            shared_data: HashMap::new(),
        }
    }

    pub fn add_shared_data(&mut self, key: String, value: serde_json::Value) {
        self.shared_data.insert(key, value);
    }

    pub fn get_shared_data(&self, key: &str) -> Option<&serde_json::Value> {
        self.shared_data.get(key)
    }

    pub fn get_outcome_by_name(&self, name: &str) -> Option<&StepOutcome> {
        self.outcomes.iter().find(|o| o.step_name == name)
    }
}
