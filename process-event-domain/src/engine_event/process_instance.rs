use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// 流程元数据中声明安全角色的键（逗号分隔）
pub const SECURITY_ROLES_METADATA: &str = "securityRoles";

/// 流程实例状态，序列化为整数状态码
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum ProcessState {
    #[default]
    Pending,
    Active,
    Completed,
    Aborted,
    Suspended,
    Error,
}

impl ProcessState {
    pub const fn code(self) -> i32 {
        match self {
            ProcessState::Pending => 0,
            ProcessState::Active => 1,
            ProcessState::Completed => 2,
            ProcessState::Aborted => 3,
            ProcessState::Suspended => 4,
            ProcessState::Error => 5,
        }
    }
}

impl From<ProcessState> for i32 {
    fn from(state: ProcessState) -> Self {
        state.code()
    }
}

impl TryFrom<i32> for ProcessState {
    type Error = DomainError;

    fn try_from(code: i32) -> Result<Self, DomainError> {
        match code {
            0 => Ok(ProcessState::Pending),
            1 => Ok(ProcessState::Active),
            2 => Ok(ProcessState::Completed),
            3 => Ok(ProcessState::Aborted),
            4 => Ok(ProcessState::Suspended),
            5 => Ok(ProcessState::Error),
            other => Err(DomainError::invalid_value(format!(
                "unknown process state code: {other}"
            ))),
        }
    }
}

impl FromStr for ProcessState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code: i32 = s.trim().parse()?;
        ProcessState::try_from(code)
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// 里程碑状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MilestoneStatus {
    Available,
    Active,
    Completed,
}

impl MilestoneStatus {
    pub const fn label(self) -> &'static str {
        match self {
            MilestoneStatus::Available => "AVAILABLE",
            MilestoneStatus::Active => "ACTIVE",
            MilestoneStatus::Completed => "COMPLETED",
        }
    }
}

/// 引擎上报的里程碑
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneInfo {
    pub id: String,
    pub name: String,
    pub status: MilestoneStatus,
}

impl MilestoneInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>, status: MilestoneStatus) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status,
        }
    }
}

/// 处于错误状态的实例所携带的出错节点与错误信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessErrorInfo {
    pub node_definition_id: String,
    pub message: String,
}

impl ProcessErrorInfo {
    pub fn new(node_definition_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            node_definition_id: node_definition_id.into(),
            message: message.into(),
        }
    }
}

/// 引擎在事件发生时刻暴露的流程实例视图
///
/// 引擎保证 `id` 与 `process_id` 总是存在；其余字段缺失时按空处理。
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct ProcessInstanceInfo {
    #[builder(into)]
    id: String,
    #[builder(into)]
    parent_id: Option<String>,
    #[builder(into)]
    root_instance_id: Option<String>,
    #[builder(into)]
    process_id: String,
    #[builder(into)]
    root_process_id: Option<String>,
    #[builder(into, default)]
    process_name: String,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    #[builder(default)]
    state: ProcessState,
    #[builder(into)]
    correlation_key: Option<String>,
    #[builder(default)]
    variables: BTreeMap<String, Value>,
    /// 引擎当前上报的里程碑列表（`None` 表示引擎未提供）
    milestones: Option<Vec<MilestoneInfo>>,
    error: Option<ProcessErrorInfo>,
    /// 流程定义上的元数据（如 `securityRoles`）
    #[builder(default)]
    process_metadata: BTreeMap<String, String>,
}

impl ProcessInstanceInfo {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    pub fn root_instance_id(&self) -> Option<&str> {
        self.root_instance_id.as_deref()
    }

    pub fn process_id(&self) -> &str {
        &self.process_id
    }

    pub fn root_process_id(&self) -> Option<&str> {
        self.root_process_id.as_deref()
    }

    pub fn process_name(&self) -> &str {
        &self.process_name
    }

    pub fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn correlation_key(&self) -> Option<&str> {
        self.correlation_key.as_deref()
    }

    pub fn variables(&self) -> &BTreeMap<String, Value> {
        &self.variables
    }

    pub fn milestones(&self) -> Option<&[MilestoneInfo]> {
        self.milestones.as_deref()
    }

    pub fn error(&self) -> Option<&ProcessErrorInfo> {
        self.error.as_ref()
    }

    pub fn process_metadata(&self) -> &BTreeMap<String, String> {
        &self.process_metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_codes_roundtrip_and_reject_unknown() {
        assert_eq!(ProcessState::try_from(2).unwrap(), ProcessState::Completed);
        assert_eq!("5".parse::<ProcessState>().unwrap(), ProcessState::Error);
        assert!(ProcessState::try_from(42).is_err());
        assert!("abc".parse::<ProcessState>().is_err());
        assert_eq!(serde_json::to_value(ProcessState::Aborted).unwrap(), 3);
    }
}
