use crate::config::replay_config::ReplayConfig;
use crate::core::replay::client::ColorparkClient;
use crate::core::replay::steps::{MachineWaitStep, OrderCreateStep, WorksSaveStep, WORKS_ID_KEY};
use crate::domain::model::{FailurePolicy, ReplayContext, StepOutcome};
use crate::domain::ports::ReplayStep;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// 依序執行 API 步驟，步驟之間固定延遲
pub struct ReplaySequence {
    client: ColorparkClient,
    steps: Vec<Box<dyn ReplayStep>>,
    delay: Duration,
    execution_id: String,
}

impl ReplaySequence {
    pub fn new(client: ColorparkClient, execution_id: String) -> Self {
        Self {
            client,
            steps: Vec::new(),
            delay: Duration::ZERO,
            execution_id,
        }
    }

    /// Works.save → Order.create → Machine.wait
    pub fn colorpark(config: &ReplayConfig) -> Result<Self> {
        let client = ColorparkClient::new(config)?;
        let execution_id = format!("replay_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"));

        let mut sequence =
            Self::new(client, execution_id).with_delay(Duration::from_millis(config.delay_ms));
        sequence.add_step(Box::new(WorksSaveStep::new(config.clone())));
        sequence.add_step(Box::new(OrderCreateStep::new(config.clone())));
        sequence.add_step(Box::new(MachineWaitStep::new(config.clone())));
        Ok(sequence)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn add_step(&mut self, step: Box<dyn ReplayStep>) {
        self.steps.push(step);
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// 執行所有步驟；`Abort` 步驟失敗時回傳錯誤，其餘失敗只記錄
    pub async fn execute_all(&self) -> Result<ReplayContext> {
        let mut context = ReplayContext::new(self.execution_id.clone());

        for (index, step) in self.steps.iter().enumerate() {
            if index > 0 {
                if !self.delay.is_zero() {
                    tokio::time::sleep(self.delay).await;
                }
                println!();
            }

            let name = step.name().to_string();
            println!("📤 Sending {}...", name);
            let start_time = Instant::now();

            let outcome = match self.call_step(step.as_ref(), &context).await {
                Ok(response) => {
                    let pretty = serde_json::to_string_pretty(&response)?;
                    println!("✅ {} response: {}", name, pretty);

                    let handled = step.handle_response(&response, &mut context).await;
                    let outcome = StepOutcome {
                        step_name: name.clone(),
                        response: Some(response),
                        error: handled.as_ref().err().map(|e| e.to_string()),
                        duration: start_time.elapsed(),
                    };

                    if let Err(e) = handled {
                        println!("❌ {}", e.user_friendly_message());
                        context.outcomes.push(outcome);
                        if step.failure_policy() == FailurePolicy::Abort {
                            return Err(e);
                        }
                        continue;
                    }
                    outcome
                }
                Err(e) => {
                    println!("❌ Error during {}: {}", name, e);
                    tracing::error!("❌ Step {} failed: {}", name, e);
                    context.outcomes.push(StepOutcome {
                        step_name: name.clone(),
                        response: None,
                        error: Some(e.to_string()),
                        duration: start_time.elapsed(),
                    });

                    match step.failure_policy() {
                        FailurePolicy::Abort => return Err(e),
                        FailurePolicy::Continue => continue,
                    }
                }
            };

            tracing::info!(
                "✅ Step executed: {} (duration: {:?})",
                outcome.step_name,
                outcome.duration
            );
            context.outcomes.push(outcome);
        }

        Ok(context)
    }

    async fn call_step(
        &self,
        step: &dyn ReplayStep,
        context: &ReplayContext,
    ) -> Result<serde_json::Value> {
        let payload = step.build_payload(context)?;
        tracing::debug!("📦 {} payload: {}", step.name(), payload);
        self.client.post_json(&payload).await
    }

    /// 獲取執行摘要
    pub fn get_execution_summary(context: &ReplayContext) -> HashMap<String, serde_json::Value> {
        let mut summary = HashMap::new();

        let attempted = context.outcomes.len();
        let succeeded = context.outcomes.iter().filter(|o| o.succeeded()).count();
        let total_duration: Duration = context.outcomes.iter().map(|o| o.duration).sum();

        summary.insert(
            "execution_id".to_string(),
            serde_json::Value::String(context.execution_id.clone()),
        );
        summary.insert("attempted_steps".to_string(), attempted.into());
        summary.insert("succeeded_steps".to_string(), succeeded.into());
        summary.insert(
            "total_duration_ms".to_string(),
            (total_duration.as_millis() as u64).into(),
        );
        summary.insert(
            WORKS_ID_KEY.to_string(),
            context
                .get_shared_data(WORKS_ID_KEY)
                .cloned()
                .unwrap_or(serde_json::Value::Null),
        );

        let failed: Vec<serde_json::Value> = context
            .outcomes
            .iter()
            .filter(|o| !o.succeeded())
            .map(|o| serde_json::Value::String(o.step_name.clone()))
            .collect();
        summary.insert("failed_steps".to_string(), serde_json::Value::Array(failed));

        summary
    }
}

impl std::fmt::Debug for ReplaySequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplaySequence")
            .field("endpoint", &self.client.endpoint())
            .field("steps", &self.step_names())
            .field("delay", &self.delay)
            .field("execution_id", &self.execution_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::KitError;
    use async_trait::async_trait;
    use httpmock::prelude::*;
    use serde_json::json;

    struct MockStep {
        name: String,
        policy: FailurePolicy,
        fail_build: bool,
    }

    impl MockStep {
        fn new(name: &str, policy: FailurePolicy) -> Self {
            Self {
                name: name.to_string(),
                policy,
                fail_build: false,
            }
        }

        fn failing(mut self) -> Self {
            self.fail_build = true;
            self
        }
    }

    #[async_trait]
    impl ReplayStep for MockStep {
        fn name(&self) -> &str {
            &self.name
        }

        fn build_payload(&self, _context: &ReplayContext) -> Result<serde_json::Value> {
            if self.fail_build {
                return Err(KitError::StepFailed {
                    step: self.name.clone(),
                    details: "payload unavailable".to_string(),
                });
            }
            Ok(json!({"s": self.name}))
        }

        fn failure_policy(&self) -> FailurePolicy {
            self.policy
        }
    }

    fn client_for(server: &MockServer) -> ColorparkClient {
        let config = ReplayConfig {
            endpoint: server.url("/api"),
            ..Default::default()
        };
        ColorparkClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_continue_policy_keeps_going() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/api");
            then.status(200).json_body(json!({"ret": 200}));
        });

        let mut sequence = ReplaySequence::new(client_for(&server), "test".to_string());
        sequence.add_step(Box::new(MockStep::new("first", FailurePolicy::Continue).failing()));
        sequence.add_step(Box::new(MockStep::new("second", FailurePolicy::Continue)));

        let context = sequence.execute_all().await.unwrap();

        api_mock.assert_hits(1);
        assert_eq!(context.outcomes.len(), 2);
        assert!(!context.outcomes[0].succeeded());
        assert!(context.outcomes[1].succeeded());
    }

    #[tokio::test]
    async fn test_abort_policy_stops_sequence() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/api");
            then.status(200).json_body(json!({"ret": 200}));
        });

        let mut sequence = ReplaySequence::new(client_for(&server), "test".to_string());
        sequence.add_step(Box::new(MockStep::new("first", FailurePolicy::Abort).failing()));
        sequence.add_step(Box::new(MockStep::new("second", FailurePolicy::Continue)));

        let err = sequence.execute_all().await.unwrap_err();

        assert!(matches!(err, KitError::StepFailed { .. }));
        api_mock.assert_hits(0);
    }

    #[tokio::test]
    async fn test_delay_between_steps() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api");
            then.status(200).json_body(json!({}));
        });

        let mut sequence = ReplaySequence::new(client_for(&server), "test".to_string())
            .with_delay(Duration::from_millis(50));
        sequence.add_step(Box::new(MockStep::new("a", FailurePolicy::Continue)));
        sequence.add_step(Box::new(MockStep::new("b", FailurePolicy::Continue)));
        sequence.add_step(Box::new(MockStep::new("c", FailurePolicy::Continue)));

        let start = Instant::now();
        sequence.execute_all().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[test]
    fn test_execution_summary() {
        let mut context = ReplayContext::new("replay_test".to_string());
        context.add_shared_data(WORKS_ID_KEY.to_string(), json!("987"));
        context.outcomes.push(StepOutcome {
            step_name: "Works.save".to_string(),
            response: Some(json!({"data": {"id": 987}})),
            error: None,
            duration: Duration::from_millis(100),
        });
        context.outcomes.push(StepOutcome {
            step_name: "Order.create".to_string(),
            response: None,
            error: Some("timeout".to_string()),
            duration: Duration::from_millis(200),
        });

        let summary = ReplaySequence::get_execution_summary(&context);

        assert_eq!(summary.get("attempted_steps").unwrap(), &json!(2));
        assert_eq!(summary.get("succeeded_steps").unwrap(), &json!(1));
        assert_eq!(summary.get("total_duration_ms").unwrap(), &json!(300));
        assert_eq!(summary.get("works_id").unwrap(), &json!("987"));
        assert_eq!(summary.get("failed_steps").unwrap(), &json!(["Order.create"]));
    }

    #[test]
    fn test_colorpark_sequence_order() {
        let sequence = ReplaySequence::colorpark(&ReplayConfig::default()).unwrap();
        assert_eq!(
            sequence.step_names(),
            vec!["Works.save", "Order.create", "Machine.wait"]
        );
    }
}
