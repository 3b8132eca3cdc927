//! 内存版事件发布器（InMemoryEventPublisher）
//!
//! 基于 `tokio::sync::broadcast` 的轻量发布器：
//! - `publish`：克隆并广播信封；
//! - `subscribe`：返回 `'static` 生命周期信封流，便于在 `tokio::spawn` 中消费；
//! - 典型用途：测试环境、示例与本地开发。
//!
//! 注意：无订阅者时发送的信封会被丢弃。

use crate::domain_event::EventEnvelope;
use crate::error::{DomainError, DomainResult as Result};
use crate::eventing::EventPublisher;
use async_trait::async_trait;
use futures_core::stream::BoxStream;
use futures_util::StreamExt;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

const PUBLISHER_NAME: &str = "in-memory";

/// 简单的内存发布器实现
#[derive(Clone)]
pub struct InMemoryEventPublisher {
    tx: broadcast::Sender<EventEnvelope>,
}

impl InMemoryEventPublisher {
    /// 创建内存发布器，`capacity` 为广播缓冲区容量
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> BoxStream<'static, Result<EventEnvelope>> {
        let rx = self.tx.subscribe();
        let stream = BroadcastStream::new(rx)
            .map(|r| r.map_err(|e| DomainError::publisher(PUBLISHER_NAME, e.to_string())));
        Box::pin(stream)
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    fn publisher_name(&self) -> &str {
        PUBLISHER_NAME
    }

    async fn publish(&self, event: &EventEnvelope) -> Result<()> {
        // 无订阅者时 send 返回错误，这里视为非致命并忽略
        let _ = self.tx.send(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_event::{EnvelopeEmitter, EventPayload};
    use crate::projection::VariableChangeRecord;
    use chrono::Utc;

    fn envelope(name: &str) -> EventEnvelope {
        EnvelopeEmitter::new("svc", "").emit(EventPayload::Variable(VariableChangeRecord {
            process_id: "orders".into(),
            process_instance_id: "p-1".into(),
            root_process_id: None,
            root_process_instance_id: None,
            variable_name: name.into(),
            variable_value: serde_json::json!(2),
            variable_previous_value: serde_json::json!(1),
            change_date: Utc::now(),
            changed_by_node_id: None,
            changed_by_node_name: None,
            changed_by_node_type: None,
        }))
    }

    #[tokio::test]
    async fn subscribers_receive_published_envelopes() {
        let publisher = InMemoryEventPublisher::new(16);
        let mut stream = publisher.subscribe();

        publisher
            .publish_batch(&[envelope("a"), envelope("b")])
            .await
            .unwrap();

        let first = stream.next().await.unwrap().unwrap();
        let second = stream.next().await.unwrap().unwrap();
        assert_eq!(first.payload.as_variable().unwrap().variable_name, "a");
        assert_eq!(second.payload.as_variable().unwrap().variable_name, "b");
        assert_eq!(first.source.as_deref(), Some("svc/orders"));
    }

    #[tokio::test]
    async fn publishing_without_subscribers_is_not_an_error() {
        let publisher = InMemoryEventPublisher::new(4);
        assert!(publisher.publish(&envelope("x")).await.is_ok());
    }
}
