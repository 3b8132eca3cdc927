use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use super::node_instance::NodeInstanceSet;
use crate::domain_event::{
    Metadata, PARENT_INSTANCE_ID_META_DATA, PROCESS_ID_META_DATA, PROCESS_INSTANCE_ID_META_DATA,
    PROCESS_INSTANCE_STATE_META_DATA, ROOT_INSTANCE_ID_META_DATA, ROOT_PROCESS_ID_META_DATA,
};
use crate::engine_event::ProcessState;

/// 里程碑记录
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MilestoneRecord {
    pub id: String,
    pub name: String,
    pub status: String,
}

/// 出错节点与错误信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessErrorRecord {
    pub node_definition_id: String,
    pub error_message: String,
}

/// 流程实例快照：批次内每个实例 ID 恰有一个，后续事件在其上细化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInstanceSnapshot {
    pub id: String,
    pub parent_instance_id: Option<String>,
    pub root_instance_id: Option<String>,
    pub process_id: String,
    pub root_process_id: Option<String>,
    pub process_name: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub state: ProcessState,
    pub business_key: Option<String>,
    pub variables: BTreeMap<String, Value>,
    pub node_instances: NodeInstanceSet,
    pub milestones: Option<BTreeSet<MilestoneRecord>>,
    pub error: Option<ProcessErrorRecord>,
    pub roles: Option<Vec<String>>,
}

impl ProcessInstanceSnapshot {
    pub fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert(PROCESS_INSTANCE_ID_META_DATA, &self.id);
        metadata.maybe_insert(PARENT_INSTANCE_ID_META_DATA, self.parent_instance_id.as_deref());
        metadata.maybe_insert(ROOT_INSTANCE_ID_META_DATA, self.root_instance_id.as_deref());
        metadata.insert_non_empty(PROCESS_ID_META_DATA, &self.process_id);
        metadata.maybe_insert(ROOT_PROCESS_ID_META_DATA, self.root_process_id.as_deref());
        metadata.insert(PROCESS_INSTANCE_STATE_META_DATA, self.state.to_string());
        metadata
    }
}
