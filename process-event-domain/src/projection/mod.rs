//! 实体投影（Snapshot / Projection）
//!
//! 批次折叠后输出的四类值对象：流程实例快照、节点实例记录、用户任务快照、
//! 变量变更记录，以及把原始事件转换为投影的纯函数构建器（`builder`）。

pub mod builder;
mod node_instance;
mod process_instance;
mod user_task;
mod variable;

pub use node_instance::{NodeInstanceRecord, NodeInstanceSet, NodeOccurrenceKey};
pub use process_instance::{MilestoneRecord, ProcessErrorRecord, ProcessInstanceSnapshot};
pub use user_task::UserTaskSnapshot;
pub use variable::{VariableChangeKey, VariableChangeRecord};
