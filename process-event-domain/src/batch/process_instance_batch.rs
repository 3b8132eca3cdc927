use indexmap::IndexMap;
use tracing::{debug, trace};

use super::EventBatch;
use super::config::BatchConfig;
use crate::domain_event::{BatchEvents, EnvelopeEmitter, EventPayload};
use crate::engine_event::{
    EngineEvent, ProcessEvent, ProcessEventKind, ProcessInstanceInfo, VariableChange,
    WorkItemTransition,
};
use crate::projection::{
    ProcessInstanceSnapshot, UserTaskSnapshot, VariableChangeKey, VariableChangeRecord, builder,
};

/// 流程实例事件批次
///
/// 一个实例对应一次事务：`append` 只按到达顺序保存流程事件，
/// `events` 时才整体折叠，使节点离开能看到同一批次里先到的节点触发。
#[derive(Debug, Clone)]
pub struct ProcessInstanceEventBatch {
    emitter: EnvelopeEmitter,
    tracked_tag: String,
    raw_events: Vec<ProcessEvent>,
}

impl ProcessInstanceEventBatch {
    pub fn new(config: &BatchConfig) -> Self {
        Self {
            emitter: EnvelopeEmitter::new(config.service.clone(), config.addons.to_string()),
            tracked_tag: config.tracked_tag.clone(),
            raw_events: Vec::new(),
        }
    }

    pub fn raw_events(&self) -> &[ProcessEvent] {
        &self.raw_events
    }

    pub fn len(&self) -> usize {
        self.raw_events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_events.is_empty()
    }

    fn fold(&self) -> BatchFold {
        let mut fold = BatchFold::default();
        for event in &self.raw_events {
            fold.apply(event, &self.tracked_tag);
        }
        fold
    }
}

impl EventBatch for ProcessInstanceEventBatch {
    fn append(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Process(event) => {
                trace!(
                    process_instance_id = event.instance().id(),
                    kind = event.kind().name(),
                    "append process event"
                );
                self.raw_events.push(event);
            }
            EngineEvent::Unrecognized { kind } => {
                trace!(kind = %kind, "ignore unrecognized engine event");
            }
        }
    }

    fn events(&self) -> BatchEvents {
        let fold = self.fold();
        debug!(
            raw_events = self.raw_events.len(),
            process_instances = fold.process_instances.len(),
            user_tasks = fold.user_tasks.len(),
            variables = fold.variables.len(),
            "batch folded"
        );

        let envelopes = fold
            .process_instances
            .into_values()
            .map(EventPayload::ProcessInstance)
            .chain(fold.user_tasks.into_values().map(EventPayload::UserTask))
            .chain(fold.variables.into_values().map(EventPayload::Variable))
            .map(|payload| self.emitter.emit(payload))
            .collect();

        BatchEvents::new(envelopes)
    }
}

/// 折叠中间态，三类投影彼此独立
#[derive(Default)]
struct BatchFold {
    process_instances: IndexMap<String, ProcessInstanceSnapshot>,
    user_tasks: IndexMap<String, UserTaskSnapshot>,
    variables: IndexMap<VariableChangeKey, VariableChangeRecord>,
}

impl BatchFold {
    fn apply(&mut self, event: &ProcessEvent, tracked_tag: &str) {
        let instance = event.instance();
        // 第一条触及该实例的事件负责构建快照，其后的事件只做细化
        let snapshot = self
            .process_instances
            .entry(instance.id().to_string())
            .or_insert_with(|| builder::process_instance_snapshot(instance));

        match event.kind() {
            ProcessEventKind::Started | ProcessEventKind::SlaViolated { .. } => {}
            ProcessEventKind::NodeTriggered(node) => {
                snapshot
                    .node_instances
                    .insert_if_absent(builder::node_instance_record(node));
            }
            ProcessEventKind::NodeLeft(node) => {
                snapshot
                    .node_instances
                    .replace(builder::node_instance_record(node));
            }
            ProcessEventKind::Completed => {
                snapshot.end_date = instance.end_date();
                snapshot.state = instance.state();
            }
            ProcessEventKind::WorkItemTransition(transition) => {
                Self::apply_work_item(&mut self.user_tasks, instance, transition);
            }
            ProcessEventKind::VariableChanged(change) => {
                Self::apply_variable(&mut self.variables, event, change, tracked_tag);
            }
        }
    }

    fn apply_work_item(
        user_tasks: &mut IndexMap<String, UserTaskSnapshot>,
        instance: &ProcessInstanceInfo,
        transition: &WorkItemTransition,
    ) {
        if !transition.transitioned {
            return;
        }
        let work_item = &transition.work_item;
        let Some(task) = work_item.human_task() else {
            return;
        };
        // 同一批次内后续迁移视为已捕获迁移的回声：先到者为准
        user_tasks
            .entry(work_item.id().to_string())
            .or_insert_with(|| builder::user_task_snapshot(instance, work_item, task));
    }

    fn apply_variable(
        variables: &mut IndexMap<VariableChangeKey, VariableChangeRecord>,
        event: &ProcessEvent,
        change: &VariableChange,
        tracked_tag: &str,
    ) {
        if !change.has_tag(tracked_tag) {
            return;
        }
        let record = builder::variable_change_record(event.instance(), change, event.occurred_at());
        variables.entry(record.dedup_key()).or_insert(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_event::EventKind;
    use crate::engine_event::{
        HumanTaskInfo, NodeInstanceInfo, ProcessState, TRACKED, WorkItemInfo, WorkItemKind,
    };
    use chrono::{TimeZone, Utc};

    fn instance(id: &str) -> ProcessInstanceInfo {
        ProcessInstanceInfo::builder()
            .id(id)
            .process_id("org.acme.travels.Travels")
            .process_name("Travels")
            .state(ProcessState::Active)
            .build()
    }

    fn batch() -> ProcessInstanceEventBatch {
        ProcessInstanceEventBatch::new(&BatchConfig::builder().service("svc").build())
    }

    fn human_task(id: &str, phase: &str) -> WorkItemInfo {
        WorkItemInfo::builder()
            .id(id)
            .name("Human Task")
            .phase_status(phase)
            .kind(WorkItemKind::HumanTask(
                HumanTaskInfo::builder().task_name("approve").build(),
            ))
            .build()
    }

    #[test]
    fn unrecognized_events_are_not_stored() {
        let mut batch = batch();
        batch.append(EngineEvent::unrecognized("RuleFired"));
        assert!(batch.is_empty());
        assert!(batch.events().is_empty());
    }

    #[test]
    fn sla_violation_only_touches_the_instance() {
        let mut batch = batch();
        batch.append(ProcessEvent::sla_violated(instance("p-1"), None).into());

        let events = batch.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events.count_of(EventKind::ProcessInstance), 1);
    }

    #[test]
    fn snapshot_is_built_from_the_first_event_touching_the_instance() {
        let first = ProcessInstanceInfo::builder()
            .id("p-1")
            .process_id("travels")
            .correlation_key("first")
            .build();
        let later = ProcessInstanceInfo::builder()
            .id("p-1")
            .process_id("travels")
            .correlation_key("later")
            .build();

        let mut batch = batch();
        batch.append(ProcessEvent::started(first).into());
        batch.append(ProcessEvent::sla_violated(later, None).into());

        let events = batch.events();
        let snapshot = events.process_instances().next().unwrap();
        assert_eq!(snapshot.business_key.as_deref(), Some("first"));
    }

    #[test]
    fn generic_work_items_and_pending_transitions_are_ignored() {
        let generic = WorkItemInfo::builder().id("w-1").name("Log").build();
        let mut batch = batch();
        batch.append(
            ProcessEvent::work_item_transition(
                instance("p-1"),
                WorkItemTransition::new(generic, true),
            )
            .into(),
        );
        batch.append(
            ProcessEvent::work_item_transition(
                instance("p-1"),
                WorkItemTransition::new(human_task("w-2", "Ready"), false),
            )
            .into(),
        );

        assert_eq!(batch.events().user_tasks().count(), 0);
    }

    #[test]
    fn first_completed_transition_wins_for_a_work_item() {
        let mut batch = batch();
        batch.append(
            ProcessEvent::work_item_transition(
                instance("p-1"),
                WorkItemTransition::new(human_task("w-1", "Ready"), true),
            )
            .into(),
        );
        batch.append(
            ProcessEvent::work_item_transition(
                instance("p-1"),
                WorkItemTransition::new(human_task("w-1", "Completed"), true),
            )
            .into(),
        );

        let events = batch.events();
        let tasks: Vec<_> = events.user_tasks().collect();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].state.as_deref(), Some("Ready"));
        assert_eq!(tasks[0].task_name.as_deref(), Some("approve"));
        assert_eq!(tasks[0].process_instance_id, "p-1");
    }

    #[test]
    fn custom_tracked_tag_is_honoured() {
        let config = BatchConfig::builder().tracked_tag("audited").build();
        let mut batch = ProcessInstanceEventBatch::new(&config);
        let change = VariableChange::builder().variable_id("x").build();

        batch.append(
            ProcessEvent::variable_changed(instance("p-1"), change.clone().with_tag(TRACKED))
                .into(),
        );
        assert_eq!(batch.events().variables().count(), 0);

        batch.append(
            ProcessEvent::variable_changed(instance("p-1"), change.with_tag("audited")).into(),
        );
        assert_eq!(batch.events().variables().count(), 1);
    }

    #[test]
    fn node_left_without_prior_trigger_is_recorded() {
        let t = |ms| Utc.timestamp_millis_opt(ms).unwrap();
        let node = NodeInstanceInfo::builder()
            .id("ni-1")
            .node_id("2")
            .node_definition_id("_end")
            .node_name("End")
            .node_type("org.jbpm.workflow.core.node.EndNode")
            .trigger_time(t(10))
            .leave_time(t(20))
            .build();

        let mut batch = batch();
        batch.append(ProcessEvent::node_left(instance("p-1"), node).into());

        let events = batch.events();
        let snapshot = events.process_instances().next().unwrap();
        let record = snapshot.node_instances.get("ni-1").unwrap();
        assert_eq!(record.node_type, "EndNode");
        assert_eq!(record.leave_time, Some(t(20)));
    }

    #[test]
    fn events_can_be_requested_repeatedly() {
        let mut batch = batch();
        batch.append(ProcessEvent::started(instance("p-1")).into());
        let first = batch.events();
        let second = batch.events();
        assert_eq!(first.len(), second.len());
        assert_eq!(
            first.process_instances().next(),
            second.process_instances().next()
        );
    }
}
