use bon::Builder;
use serde_json::Value;
use std::collections::BTreeSet;

use super::node_instance::NodeInstanceInfo;

/// 标记下游关心的变量变更
pub const TRACKED: &str = "tracked";

/// 引擎暴露的变量变更视图
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct VariableChange {
    #[builder(into)]
    variable_id: String,
    #[builder(default)]
    old_value: Value,
    #[builder(default)]
    new_value: Value,
    #[builder(default)]
    tags: BTreeSet<String>,
    /// 导致变更的节点（若可归因）
    node: Option<NodeInstanceInfo>,
}

impl VariableChange {
    pub fn variable_id(&self) -> &str {
        &self.variable_id
    }

    pub fn old_value(&self) -> &Value {
        &self.old_value
    }

    pub fn new_value(&self) -> &Value {
        &self.new_value
    }

    pub fn node(&self) -> Option<&NodeInstanceInfo> {
        self.node.as_ref()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }
}
