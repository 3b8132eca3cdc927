use process_event_domain::batch::{EventBatch, ProcessInstanceEventBatch};
use process_event_domain::eventing::EventPublisher;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::EventsConfig;
use crate::error::{AppError, AppResult};

/// 事件管理器
///
/// - 为每个事务创建配置好的批次（`new_batch`）；
/// - 事务提交时折叠批次，按种类开关过滤后交给全部发布器（`publish`）。
///
/// 不做重试：发布失败会在尝试完所有发布器后以 `AppError::Publish` 返回。
pub struct EventManager {
    config: EventsConfig,
    publishers: Vec<Arc<dyn EventPublisher>>,
}

impl EventManager {
    pub fn new(config: EventsConfig) -> Self {
        Self {
            config,
            publishers: Vec::new(),
        }
    }

    pub fn with_publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.add_publisher(publisher);
        self
    }

    pub fn add_publisher(&mut self, publisher: Arc<dyn EventPublisher>) {
        debug!(publisher = publisher.publisher_name(), "register event publisher");
        self.publishers.push(publisher);
    }

    pub fn config(&self) -> &EventsConfig {
        &self.config
    }

    pub fn new_batch(&self) -> ProcessInstanceEventBatch {
        ProcessInstanceEventBatch::new(&self.config.batch_config())
    }

    /// 折叠并发布批次，返回交给发布器的信封数量
    pub async fn publish<B>(&self, batch: B) -> AppResult<usize>
    where
        B: EventBatch,
    {
        let mut events = batch.flush();
        events.retain(|e| self.config.is_enabled(e.kind()));

        if events.is_empty() {
            return Ok(0);
        }
        if self.publishers.is_empty() {
            debug!(events = events.len(), "no event publisher registered, drop batch");
            return Ok(0);
        }

        let mut failed = Vec::new();
        let mut reasons = Vec::new();
        for publisher in &self.publishers {
            if let Err(err) = publisher.publish_batch(&events).await {
                warn!(
                    publisher = publisher.publisher_name(),
                    error = %err,
                    "publish batch failed"
                );
                failed.push(publisher.publisher_name().to_string());
                reasons.push(err.to_string());
            }
        }

        if !failed.is_empty() {
            return Err(AppError::Publish {
                publishers: failed,
                reason: reasons.join("; "),
            });
        }

        debug!(
            events = events.len(),
            publishers = self.publishers.len(),
            "batch published"
        );
        Ok(events.len())
    }
}
