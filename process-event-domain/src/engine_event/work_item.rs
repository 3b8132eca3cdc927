use bon::Builder;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// 人工任务特有的信息
#[derive(Builder, Debug, Clone, Default, PartialEq)]
pub struct HumanTaskInfo {
    #[builder(into)]
    pub task_name: Option<String>,
    #[builder(into)]
    pub task_description: Option<String>,
    #[builder(into)]
    pub task_priority: Option<String>,
    #[builder(into)]
    pub reference_name: Option<String>,
    #[builder(into)]
    pub actual_owner: Option<String>,
    #[builder(default)]
    pub admin_groups: BTreeSet<String>,
    #[builder(default)]
    pub admin_users: BTreeSet<String>,
    #[builder(default)]
    pub excluded_users: BTreeSet<String>,
    #[builder(default)]
    pub potential_groups: BTreeSet<String>,
    #[builder(default)]
    pub potential_users: BTreeSet<String>,
}

/// 工作项种类：只有人工任务会被投影为用户任务快照
#[derive(Debug, Clone, Default, PartialEq)]
pub enum WorkItemKind {
    #[default]
    Generic,
    HumanTask(HumanTaskInfo),
}

/// 引擎暴露的工作项视图
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct WorkItemInfo {
    #[builder(into)]
    id: String,
    #[builder(into, default)]
    name: String,
    #[builder(into)]
    phase_status: Option<String>,
    #[builder(default)]
    parameters: BTreeMap<String, Value>,
    #[builder(default)]
    results: BTreeMap<String, Value>,
    start_date: Option<DateTime<Utc>>,
    complete_date: Option<DateTime<Utc>>,
    #[builder(default)]
    kind: WorkItemKind,
}

impl WorkItemInfo {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phase_status(&self) -> Option<&str> {
        self.phase_status.as_deref()
    }

    pub fn parameters(&self) -> &BTreeMap<String, Value> {
        &self.parameters
    }

    pub fn results(&self) -> &BTreeMap<String, Value> {
        &self.results
    }

    pub fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    pub fn complete_date(&self) -> Option<DateTime<Utc>> {
        self.complete_date
    }

    pub fn kind(&self) -> &WorkItemKind {
        &self.kind
    }

    pub fn human_task(&self) -> Option<&HumanTaskInfo> {
        match &self.kind {
            WorkItemKind::HumanTask(task) => Some(task),
            WorkItemKind::Generic => None,
        }
    }
}

/// 工作项阶段迁移
#[derive(Debug, Clone, PartialEq)]
pub struct WorkItemTransition {
    pub work_item: WorkItemInfo,
    /// `true` 表示迁移已完成（after 事件），`false` 为迁移前通知
    pub transitioned: bool,
}

impl WorkItemTransition {
    pub fn new(work_item: WorkItemInfo, transitioned: bool) -> Self {
        Self {
            work_item,
            transitioned,
        }
    }
}
