//! 事件发布（EventPublisher）协议
//!
//! 批次输出的信封交给外部发布通道（消息总线、审计日志、追踪汇聚等），
//! 投递保证与重试由具体实现自行决定。
//!
use crate::{domain_event::EventEnvelope, error::DomainResult as Result};
use async_trait::async_trait;

/// 事件发布器：把信封交给外部传输
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// 发布器名称（用于日志与错误标记）
    fn publisher_name(&self) -> &str;

    async fn publish(&self, event: &EventEnvelope) -> Result<()>;

    async fn publish_batch(&self, events: &[EventEnvelope]) -> Result<()> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}
