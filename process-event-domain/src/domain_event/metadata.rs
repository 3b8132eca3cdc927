use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PROCESS_INSTANCE_ID_META_DATA: &str = "processinstance.id";
pub const PARENT_INSTANCE_ID_META_DATA: &str = "processinstance.parentInstanceId";
pub const ROOT_INSTANCE_ID_META_DATA: &str = "processinstance.rootInstanceId";
pub const PROCESS_ID_META_DATA: &str = "processinstance.processId";
pub const ROOT_PROCESS_ID_META_DATA: &str = "processinstance.rootProcessId";
pub const PROCESS_INSTANCE_STATE_META_DATA: &str = "processinstance.state";
pub const USER_TASK_INSTANCE_ID_META_DATA: &str = "usertaskinstance.id";
pub const USER_TASK_INSTANCE_STATE_META_DATA: &str = "usertaskinstance.state";
pub const VARIABLE_NAME_META_DATA: &str = "variable.name";

/// 元数据：由投影自身派生的字符串键值对
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, String>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// 空串视为缺失
    pub fn insert_non_empty(&mut self, key: &str, value: &str) {
        if !value.is_empty() {
            self.insert(key, value);
        }
    }

    /// 仅在值存在时写入
    pub fn maybe_insert(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn process_id(&self) -> Option<&str> {
        self.get(PROCESS_ID_META_DATA)
    }

    pub fn process_instance_id(&self) -> Option<&str> {
        self.get(PROCESS_INSTANCE_ID_META_DATA)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
