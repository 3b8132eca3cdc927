use process_event_domain::batch::{EventBatch, ProcessInstanceEventBatch};
use process_event_domain::engine_event::EngineEvent;
use std::sync::Arc;
use tracing::debug;

use crate::error::AppResult;
use crate::event_manager::EventManager;

/// 工作单元（Unit of Work）
///
/// 一个事务拥有一个批次：引擎在事务内 `append` 原始事件，
/// `commit` 时折叠并发布，`abort`（如事务回滚）时直接丢弃、不做折叠。
/// 两者都消费 `self`，同一工作单元不可能提交两次。
pub struct UnitOfWork {
    manager: Arc<EventManager>,
    batch: ProcessInstanceEventBatch,
}

impl UnitOfWork {
    pub fn start(manager: Arc<EventManager>) -> Self {
        let batch = manager.new_batch();
        Self { manager, batch }
    }

    pub fn append(&mut self, event: impl Into<EngineEvent>) {
        self.batch.append(event.into());
    }

    /// 已暂存的流程事件数量
    pub fn pending(&self) -> usize {
        self.batch.len()
    }

    pub async fn commit(self) -> AppResult<usize> {
        let UnitOfWork { manager, batch } = self;
        manager.publish(batch).await
    }

    pub fn abort(self) {
        debug!(discarded = self.batch.len(), "unit of work aborted");
    }
}
