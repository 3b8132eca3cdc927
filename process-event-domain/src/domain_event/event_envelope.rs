use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::metadata::Metadata;
use crate::error::DomainResult;
use crate::projection::{ProcessInstanceSnapshot, UserTaskSnapshot, VariableChangeRecord};

pub const PROCESS_INSTANCE_EVENT_TYPE: &str = "ProcessInstanceEvent";
pub const USER_TASK_INSTANCE_EVENT_TYPE: &str = "UserTaskInstanceEvent";
pub const VARIABLE_INSTANCE_EVENT_TYPE: &str = "VariableInstanceEvent";

/// 载荷种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    ProcessInstance,
    UserTask,
    Variable,
}

/// 信封载荷：恰好一个投影
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum EventPayload {
    ProcessInstance(ProcessInstanceSnapshot),
    UserTask(UserTaskSnapshot),
    Variable(VariableChangeRecord),
}

impl EventPayload {
    pub fn kind(&self) -> EventKind {
        match self {
            EventPayload::ProcessInstance(_) => EventKind::ProcessInstance,
            EventPayload::UserTask(_) => EventKind::UserTask,
            EventPayload::Variable(_) => EventKind::Variable,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            EventPayload::ProcessInstance(_) => PROCESS_INSTANCE_EVENT_TYPE,
            EventPayload::UserTask(_) => USER_TASK_INSTANCE_EVENT_TYPE,
            EventPayload::Variable(_) => VARIABLE_INSTANCE_EVENT_TYPE,
        }
    }

    pub fn metadata(&self) -> Metadata {
        match self {
            EventPayload::ProcessInstance(pi) => pi.metadata(),
            EventPayload::UserTask(task) => task.metadata(),
            EventPayload::Variable(variable) => variable.metadata(),
        }
    }

    pub fn as_process_instance(&self) -> Option<&ProcessInstanceSnapshot> {
        match self {
            EventPayload::ProcessInstance(pi) => Some(pi),
            _ => None,
        }
    }

    pub fn as_user_task(&self) -> Option<&UserTaskSnapshot> {
        match self {
            EventPayload::UserTask(task) => Some(task),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&VariableChangeRecord> {
        match self {
            EventPayload::Variable(variable) => Some(variable),
            _ => None,
        }
    }
}

/// 出站事件信封，包含来源、插件标签、元数据与载荷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope {
    pub id: String,
    /// `<service>/<短流程ID>`，载荷没有流程 ID 时为空
    pub source: Option<String>,
    #[serde(rename = "type")]
    pub event_type: String,
    pub time: DateTime<Utc>,
    pub addons: String,
    pub metadata: Metadata,
    pub payload: EventPayload,
}

impl EventEnvelope {
    pub fn new(source: Option<String>, addons: impl Into<String>, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            source,
            event_type: payload.event_type().to_string(),
            time: Utc::now(),
            addons: addons.into(),
            metadata: payload.metadata(),
            payload,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    pub fn process_instance_id(&self) -> Option<&str> {
        self.metadata.process_instance_id()
    }

    pub fn to_json(&self) -> DomainResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
