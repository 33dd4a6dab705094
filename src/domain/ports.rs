use crate::domain::model::{FailurePolicy, FlatAreaRenders, ReplayContext};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 呈現偵測結果（視窗或輸出檔案）
pub trait Presenter {
    fn present(&self, renders: &FlatAreaRenders) -> Result<()>;
}

/// 重放序列中的單一 API 呼叫
#[async_trait]
pub trait ReplayStep: Send + Sync {
    /// 服務名稱，也是 payload 的 `s` 欄位
    fn name(&self) -> &str;

    fn build_payload(&self, context: &ReplayContext) -> Result<serde_json::Value>;

    /// 回應成功解析後呼叫；可把欄位寫入共享數據
    async fn handle_response(
        &self,
        _response: &serde_json::Value,
        _context: &mut ReplayContext,
    ) -> Result<()> {
        Ok(())
    }

    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Continue
    }
}
