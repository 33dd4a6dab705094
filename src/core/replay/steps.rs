use crate::config::replay_config::ReplayConfig;
use crate::core::replay::payloads::{
    MachineWaitPayload, OrderCreatePayload, WorksSavePayload, SERVICE_MACHINE_WAIT,
    SERVICE_ORDER_CREATE, SERVICE_WORKS_SAVE,
};
use crate::domain::model::{FailurePolicy, ReplayContext};
use crate::domain::ports::ReplayStep;
use crate::utils::error::{KitError, Result};
use async_trait::async_trait;
use serde_json::Value;

/// 共享數據中 works_id 的 key
pub const WORKS_ID_KEY: &str = "works_id";

/// 讀取回應的 `data.id`；缺少、null、0、false、空字串、空陣列或空物件都視為沒有
pub fn extract_works_id(response: &Value) -> Option<String> {
    match response.get("data").and_then(|data| data.get("id"))? {
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        // 舊版客戶端送出的字面值
        Value::Bool(true) => Some("True".to_string()),
        Value::Array(items) if !items.is_empty() => Some(Value::Array(items.clone()).to_string()),
        Value::Object(fields) if !fields.is_empty() => {
            Some(Value::Object(fields.clone()).to_string())
        }
        _ => None,
    }
}

/// SAVE：送出設計稿，失敗即中止
pub struct WorksSaveStep {
    config: ReplayConfig,
}

impl WorksSaveStep {
    pub fn new(config: ReplayConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ReplayStep for WorksSaveStep {
    fn name(&self) -> &str {
        SERVICE_WORKS_SAVE
    }

    fn build_payload(&self, _context: &ReplayContext) -> Result<Value> {
        Ok(serde_json::to_value(WorksSavePayload::fixed(&self.config))?)
    }

    async fn handle_response(&self, response: &Value, context: &mut ReplayContext) -> Result<()> {
        let works_id = extract_works_id(response).ok_or_else(|| KitError::MissingWorksId {
            step: SERVICE_WORKS_SAVE.to_string(),
        })?;

        tracing::info!("🆔 works_id: {}", works_id);
        context.add_shared_data(WORKS_ID_KEY.to_string(), Value::String(works_id));
        Ok(())
    }

    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Abort
    }
}

/// ORDER：以 works_id 建立訂單，失敗不影響後續步驟
pub struct OrderCreateStep {
    config: ReplayConfig,
}

impl OrderCreateStep {
    pub fn new(config: ReplayConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ReplayStep for OrderCreateStep {
    fn name(&self) -> &str {
        SERVICE_ORDER_CREATE
    }

    fn build_payload(&self, context: &ReplayContext) -> Result<Value> {
        let works_id = context
            .get_shared_data(WORKS_ID_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| KitError::MissingWorksId {
                step: SERVICE_WORKS_SAVE.to_string(),
            })?;

        let create_time = chrono::Utc::now().timestamp();
        Ok(serde_json::to_value(OrderCreatePayload::for_works(
            &self.config,
            works_id,
            create_time,
        ))?)
    }
}

/// WAIT：查詢機台佇列第一頁，只呼叫一次
pub struct MachineWaitStep {
    config: ReplayConfig,
}

impl MachineWaitStep {
    pub fn new(config: ReplayConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ReplayStep for MachineWaitStep {
    fn name(&self) -> &str {
        SERVICE_MACHINE_WAIT
    }

    fn build_payload(&self, _context: &ReplayContext) -> Result<Value> {
        Ok(serde_json::to_value(MachineWaitPayload::first_page(&self.config))?)
    }
}
