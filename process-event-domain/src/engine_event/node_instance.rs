use bon::Builder;
use chrono::{DateTime, Utc};

use super::work_item::WorkItemInfo;

/// 引擎暴露的节点实例视图
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct NodeInstanceInfo {
    /// 节点实例 ID（一次节点执行的唯一标识）
    #[builder(into)]
    id: String,
    #[builder(into)]
    node_id: String,
    #[builder(into)]
    node_definition_id: String,
    #[builder(into, default)]
    node_name: String,
    /// 引擎给出的节点类型全名，如 `org.jbpm.workflow.core.node.HumanTaskNode`
    #[builder(into)]
    node_type: String,
    trigger_time: Option<DateTime<Utc>>,
    leave_time: Option<DateTime<Utc>>,
    /// 工作项节点所关联的工作项
    work_item: Option<WorkItemInfo>,
}

impl NodeInstanceInfo {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn node_definition_id(&self) -> &str {
        &self.node_definition_id
    }

    pub fn node_name(&self) -> &str {
        &self.node_name
    }

    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    pub fn trigger_time(&self) -> Option<DateTime<Utc>> {
        self.trigger_time
    }

    pub fn leave_time(&self) -> Option<DateTime<Utc>> {
        self.leave_time
    }

    pub fn work_item(&self) -> Option<&WorkItemInfo> {
        self.work_item.as_ref()
    }
}
