//! 引擎原始事件（Raw Event）
//!
//! 工作流引擎在一次事务内派发的生命周期通知，以封闭的和类型表示：
//! 实例启动/完成、节点进入/离开、工作项迁移、变量变更与 SLA 违约。
//! 每条事件携带事件发生时刻的实例视图，以及按种类附带的节点/工作项/变量视图。

mod node_instance;
mod process_event;
mod process_instance;
mod variable_change;
mod work_item;

pub use node_instance::NodeInstanceInfo;
pub use process_event::{EngineEvent, ProcessEvent, ProcessEventKind};
pub use process_instance::{
    MilestoneInfo, MilestoneStatus, ProcessErrorInfo, ProcessInstanceInfo, ProcessState,
    SECURITY_ROLES_METADATA,
};
pub use variable_change::{TRACKED, VariableChange};
pub use work_item::{HumanTaskInfo, WorkItemInfo, WorkItemKind, WorkItemTransition};
