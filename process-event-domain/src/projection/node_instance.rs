use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 节点实例记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInstanceRecord {
    pub id: String,
    pub node_id: String,
    pub node_definition_id: String,
    pub node_name: String,
    /// 节点类型短名，如 `HumanTaskNode`
    pub node_type: String,
    pub trigger_time: Option<DateTime<Utc>>,
    pub leave_time: Option<DateTime<Utc>>,
}

impl NodeInstanceRecord {
    /// 一次节点执行的去重键，不含触发/离开时间
    pub fn occurrence_key(&self) -> NodeOccurrenceKey {
        NodeOccurrenceKey {
            id: self.id.clone(),
            node_definition_id: self.node_definition_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeOccurrenceKey {
    pub id: String,
    pub node_definition_id: String,
}

/// 按执行去重、保持插入顺序的节点实例集合
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeInstanceSet {
    records: IndexMap<NodeOccurrenceKey, NodeInstanceRecord>,
}

impl NodeInstanceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, record: &NodeInstanceRecord) -> bool {
        self.records.contains_key(&record.occurrence_key())
    }

    /// 仅当同一次执行尚未记录时插入，返回是否插入
    pub fn insert_if_absent(&mut self, record: NodeInstanceRecord) -> bool {
        match self.records.entry(record.occurrence_key()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }

    /// 移除同一次执行的旧记录并把新记录追加到末尾
    pub fn replace(&mut self, record: NodeInstanceRecord) {
        let key = record.occurrence_key();
        self.records.shift_remove(&key);
        self.records.insert(key, record);
    }

    /// 按节点实例 ID 查找
    pub fn get(&self, id: &str) -> Option<&NodeInstanceRecord> {
        self.records.values().find(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeInstanceRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<NodeInstanceRecord> for NodeInstanceSet {
    fn from_iter<I: IntoIterator<Item = NodeInstanceRecord>>(iter: I) -> Self {
        let mut set = NodeInstanceSet::new();
        for record in iter {
            set.replace(record);
        }
        set
    }
}

impl Serialize for NodeInstanceSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.records.values())
    }
}

impl<'de> Deserialize<'de> for NodeInstanceSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let records = Vec::<NodeInstanceRecord>::deserialize(deserializer)?;
        Ok(records.into_iter().collect())
    }
}
