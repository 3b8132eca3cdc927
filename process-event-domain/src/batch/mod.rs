//! 事件批次（Event Batch）
//!
//! 收集一次事务内引擎派发的原始事件，在 `events`/`flush` 时按实体折叠、去重，
//! 输出最小且一致的出站信封集合。批次不跨事务共享，也不持有批次以外的状态。

mod config;
mod process_instance_batch;

pub use config::{Addons, BatchConfig, DEFAULT_SERVICE};
pub use process_instance_batch::ProcessInstanceEventBatch;

use crate::domain_event::BatchEvents;
use crate::engine_event::EngineEvent;

/// 事务级事件批次
pub trait EventBatch {
    /// 追加一条原始事件；不识别的事件静默丢弃
    fn append(&mut self, event: EngineEvent);

    /// 折叠当前已追加的事件并生成信封（不消费批次）
    fn events(&self) -> BatchEvents;

    /// 折叠并结束批次
    fn flush(self) -> BatchEvents
    where
        Self: Sized,
    {
        self.events()
    }
}
