use chrono::{DateTime, Utc};

use super::node_instance::NodeInstanceInfo;
use super::process_instance::ProcessInstanceInfo;
use super::variable_change::VariableChange;
use super::work_item::WorkItemTransition;

/// 流程事件种类（封闭集合）
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEventKind {
    Started,
    NodeTriggered(NodeInstanceInfo),
    NodeLeft(NodeInstanceInfo),
    Completed,
    WorkItemTransition(WorkItemTransition),
    VariableChanged(VariableChange),
    SlaViolated { node: Option<NodeInstanceInfo> },
}

impl ProcessEventKind {
    pub const fn name(&self) -> &'static str {
        match self {
            ProcessEventKind::Started => "Started",
            ProcessEventKind::NodeTriggered(_) => "NodeTriggered",
            ProcessEventKind::NodeLeft(_) => "NodeLeft",
            ProcessEventKind::Completed => "Completed",
            ProcessEventKind::WorkItemTransition(_) => "WorkItemTransition",
            ProcessEventKind::VariableChanged(_) => "VariableChanged",
            ProcessEventKind::SlaViolated { .. } => "SlaViolated",
        }
    }
}

/// 一条流程事件：事件发生时刻的实例视图 + 事件种类
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessEvent {
    instance: ProcessInstanceInfo,
    occurred_at: DateTime<Utc>,
    kind: ProcessEventKind,
}

impl ProcessEvent {
    pub fn new(instance: ProcessInstanceInfo, kind: ProcessEventKind) -> Self {
        Self {
            instance,
            occurred_at: Utc::now(),
            kind,
        }
    }

    pub fn started(instance: ProcessInstanceInfo) -> Self {
        Self::new(instance, ProcessEventKind::Started)
    }

    pub fn completed(instance: ProcessInstanceInfo) -> Self {
        Self::new(instance, ProcessEventKind::Completed)
    }

    pub fn node_triggered(instance: ProcessInstanceInfo, node: NodeInstanceInfo) -> Self {
        Self::new(instance, ProcessEventKind::NodeTriggered(node))
    }

    pub fn node_left(instance: ProcessInstanceInfo, node: NodeInstanceInfo) -> Self {
        Self::new(instance, ProcessEventKind::NodeLeft(node))
    }

    pub fn work_item_transition(
        instance: ProcessInstanceInfo,
        transition: WorkItemTransition,
    ) -> Self {
        Self::new(instance, ProcessEventKind::WorkItemTransition(transition))
    }

    pub fn variable_changed(instance: ProcessInstanceInfo, change: VariableChange) -> Self {
        Self::new(instance, ProcessEventKind::VariableChanged(change))
    }

    pub fn sla_violated(instance: ProcessInstanceInfo, node: Option<NodeInstanceInfo>) -> Self {
        Self::new(instance, ProcessEventKind::SlaViolated { node })
    }

    /// 覆盖事件发生时间（引擎回放或测试中使用确定时间）
    pub fn at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = occurred_at;
        self
    }

    pub fn instance(&self) -> &ProcessInstanceInfo {
        &self.instance
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn kind(&self) -> &ProcessEventKind {
        &self.kind
    }
}

/// 引擎派发给批次的原始事件
///
/// 非流程事件（例如规则引擎或其他子系统的通知）以 `Unrecognized` 表示，
/// 进入批次时被丢弃。
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Process(ProcessEvent),
    Unrecognized { kind: String },
}

impl EngineEvent {
    pub fn unrecognized(kind: impl Into<String>) -> Self {
        EngineEvent::Unrecognized { kind: kind.into() }
    }
}

impl From<ProcessEvent> for EngineEvent {
    fn from(event: ProcessEvent) -> Self {
        EngineEvent::Process(event)
    }
}
