use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use crate::domain_event::{
    Metadata, PROCESS_ID_META_DATA, PROCESS_INSTANCE_ID_META_DATA, ROOT_INSTANCE_ID_META_DATA,
    ROOT_PROCESS_ID_META_DATA, USER_TASK_INSTANCE_ID_META_DATA,
    USER_TASK_INSTANCE_STATE_META_DATA,
};

/// 用户任务快照：批次内每个工作项 ID 只物化第一次完成的迁移
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTaskSnapshot {
    pub id: String,
    pub state: Option<String>,
    pub task_name: Option<String>,
    pub task_description: Option<String>,
    pub task_priority: Option<String>,
    pub reference_name: Option<String>,
    pub actual_owner: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub complete_date: Option<DateTime<Utc>>,
    pub admin_groups: BTreeSet<String>,
    pub admin_users: BTreeSet<String>,
    pub excluded_users: BTreeSet<String>,
    pub potential_groups: BTreeSet<String>,
    pub potential_users: BTreeSet<String>,
    pub process_instance_id: String,
    pub root_process_instance_id: Option<String>,
    pub process_id: String,
    pub root_process_id: Option<String>,
    pub inputs: BTreeMap<String, Value>,
    pub outputs: BTreeMap<String, Value>,
}

impl UserTaskSnapshot {
    pub fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert(USER_TASK_INSTANCE_ID_META_DATA, &self.id);
        metadata.maybe_insert(USER_TASK_INSTANCE_STATE_META_DATA, self.state.as_deref());
        metadata.insert(PROCESS_INSTANCE_ID_META_DATA, &self.process_instance_id);
        metadata.maybe_insert(
            ROOT_INSTANCE_ID_META_DATA,
            self.root_process_instance_id.as_deref(),
        );
        metadata.insert_non_empty(PROCESS_ID_META_DATA, &self.process_id);
        metadata.maybe_insert(ROOT_PROCESS_ID_META_DATA, self.root_process_id.as_deref());
        metadata
    }
}
