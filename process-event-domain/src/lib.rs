//! 流程实例事件批次基础库（process-event-domain）
//!
//! 把工作流引擎在一次事务内派发的原始生命周期事件折叠为最小、一致的出站事件：
//! - 原始事件（`engine_event`）：实例/节点/工作项/变量事件的封闭和类型；
//! - 投影（`projection`）：流程实例、节点实例、用户任务、变量变更四类值对象与构建器；
//! - 批次（`batch`）：按到达顺序收集事件，在 `events`/`flush` 时按实体去重合并；
//! - 出站事件（`domain_event`）：信封、元数据与来源计算；
//! - 发布（`eventing`，默认开启）：发布器协议与内存实现。
//!
//! 典型用法：
//! 1. 每个事务创建一个 `ProcessInstanceEventBatch`；
//! 2. 引擎逐条 `append` 原始事件；
//! 3. 事务提交时调用 `flush` 得到 `BatchEvents`，交给 `EventPublisher`。
//!
pub mod batch;
pub mod domain_event;
pub mod engine_event;
pub mod error;
#[cfg(feature = "eventing")]
pub mod eventing;
pub mod projection;
