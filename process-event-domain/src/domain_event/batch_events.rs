use std::ops::Deref;
use std::slice::Iter;
use std::vec::IntoIter;

use super::event_envelope::{EventEnvelope, EventKind};
use crate::projection::{ProcessInstanceSnapshot, UserTaskSnapshot, VariableChangeRecord};

/// 一个批次折叠后的信封集合，按种类分组：流程实例、用户任务、变量
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchEvents {
    events: Vec<EventEnvelope>,
}

impl BatchEvents {
    pub fn new(events: Vec<EventEnvelope>) -> Self {
        Self { events }
    }

    /// 流程实例快照（按实例首次出现顺序）
    pub fn process_instances(&self) -> impl Iterator<Item = &ProcessInstanceSnapshot> {
        self.events
            .iter()
            .filter_map(|e| e.payload.as_process_instance())
    }

    /// 用户任务快照
    pub fn user_tasks(&self) -> impl Iterator<Item = &UserTaskSnapshot> {
        self.events.iter().filter_map(|e| e.payload.as_user_task())
    }

    /// 变量变更记录
    pub fn variables(&self) -> impl Iterator<Item = &VariableChangeRecord> {
        self.events.iter().filter_map(|e| e.payload.as_variable())
    }

    /// 某一种类的信封数量
    pub fn count_of(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }

    /// 仅保留满足条件的信封
    pub fn retain(&mut self, f: impl FnMut(&EventEnvelope) -> bool) {
        self.events.retain(f);
    }

    pub fn events(&self) -> &[EventEnvelope] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, EventEnvelope> {
        self.events.iter()
    }

    pub fn into_vec(self) -> Vec<EventEnvelope> {
        self.events
    }
}

impl IntoIterator for BatchEvents {
    type Item = EventEnvelope;
    type IntoIter = IntoIter<EventEnvelope>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

impl<'a> IntoIterator for &'a BatchEvents {
    type Item = &'a EventEnvelope;
    type IntoIter = Iter<'a, EventEnvelope>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl Deref for BatchEvents {
    type Target = [EventEnvelope];

    fn deref(&self) -> &Self::Target {
        &self.events
    }
}
