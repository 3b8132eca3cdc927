use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain_event::{
    Metadata, PROCESS_ID_META_DATA, PROCESS_INSTANCE_ID_META_DATA, ROOT_INSTANCE_ID_META_DATA,
    ROOT_PROCESS_ID_META_DATA, VARIABLE_NAME_META_DATA,
};

/// 变量变更记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableChangeRecord {
    pub process_id: String,
    pub process_instance_id: String,
    pub root_process_id: Option<String>,
    pub root_process_instance_id: Option<String>,
    pub variable_name: String,
    pub variable_value: Value,
    pub variable_previous_value: Value,
    pub change_date: DateTime<Utc>,
    pub changed_by_node_id: Option<String>,
    pub changed_by_node_name: Option<String>,
    pub changed_by_node_type: Option<String>,
}

/// 变量变更的结构化去重键：覆盖除变更时间外的全部字段，JSON 值以规范文本参与比较
///
/// 同一批次内相同的变更（同一变量、同一新旧值、同一节点）视为重复上报，保留先到者的时间。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableChangeKey {
    process_id: String,
    process_instance_id: String,
    root_process_id: Option<String>,
    root_process_instance_id: Option<String>,
    variable_name: String,
    variable_value: String,
    variable_previous_value: String,
    changed_by_node_id: Option<String>,
    changed_by_node_name: Option<String>,
    changed_by_node_type: Option<String>,
}

impl VariableChangeRecord {
    pub fn dedup_key(&self) -> VariableChangeKey {
        // serde_json::Map 默认按键排序，`to_string` 对同一值输出稳定
        VariableChangeKey {
            process_id: self.process_id.clone(),
            process_instance_id: self.process_instance_id.clone(),
            root_process_id: self.root_process_id.clone(),
            root_process_instance_id: self.root_process_instance_id.clone(),
            variable_name: self.variable_name.clone(),
            variable_value: self.variable_value.to_string(),
            variable_previous_value: self.variable_previous_value.to_string(),
            changed_by_node_id: self.changed_by_node_id.clone(),
            changed_by_node_name: self.changed_by_node_name.clone(),
            changed_by_node_type: self.changed_by_node_type.clone(),
        }
    }

    pub fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert(VARIABLE_NAME_META_DATA, &self.variable_name);
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
