//! 快照构建器
//!
//! 纯函数：只读取原始事件与引擎视图，返回新的投影值。

use chrono::{DateTime, SubsecRound, Utc};
use std::collections::BTreeSet;

use super::node_instance::NodeInstanceRecord;
use super::process_instance::{MilestoneRecord, ProcessErrorRecord, ProcessInstanceSnapshot};
use super::user_task::UserTaskSnapshot;
use super::variable::VariableChangeRecord;
use crate::engine_event::{
    HumanTaskInfo, NodeInstanceInfo, ProcessInstanceInfo, ProcessState, SECURITY_ROLES_METADATA,
    VariableChange, WorkItemInfo,
};

/// 取类型全名的最后一段（按 `.` 或 `::` 分隔）
pub fn short_type_name(qualified: &str) -> &str {
    qualified
        .rsplit(['.', ':'])
        .next()
        .unwrap_or(qualified)
}

pub fn process_instance_snapshot(instance: &ProcessInstanceInfo) -> ProcessInstanceSnapshot {
    let error = match (instance.state(), instance.error()) {
        (ProcessState::Error, Some(err)) => Some(ProcessErrorRecord {
            node_definition_id: err.node_definition_id.clone(),
            error_message: err.message.clone(),
        }),
        _ => None,
    };

    let roles = instance
        .process_metadata()
        .get(SECURITY_ROLES_METADATA)
        .map(|roles| roles.split(',').map(str::to_string).collect());

    ProcessInstanceSnapshot {
        id: instance.id().to_string(),
        parent_instance_id: instance.parent_id().map(str::to_string),
        root_instance_id: instance.root_instance_id().map(str::to_string),
        process_id: instance.process_id().to_string(),
        root_process_id: instance.root_process_id().map(str::to_string),
        process_name: instance.process_name().to_string(),
        start_date: instance.start_date(),
        end_date: instance.end_date(),
        state: instance.state(),
        business_key: instance.correlation_key().map(str::to_string),
        variables: instance.variables().clone(),
        node_instances: Default::default(),
        milestones: milestone_records(instance),
        error,
        roles,
    }
}

/// 引擎未提供里程碑列表时返回 `None`；相同记录折叠为一条
pub fn milestone_records(instance: &ProcessInstanceInfo) -> Option<BTreeSet<MilestoneRecord>> {
    instance.milestones().map(|milestones| {
        milestones
            .iter()
            .map(|m| MilestoneRecord {
                id: m.id.clone(),
                name: m.name.clone(),
                status: m.status.label().to_string(),
            })
            .collect()
    })
}

pub fn node_instance_record(node: &NodeInstanceInfo) -> NodeInstanceRecord {
    NodeInstanceRecord {
        id: node.id().to_string(),
        node_id: node.node_id().to_string(),
        node_definition_id: node.node_definition_id().to_string(),
        node_name: node.node_name().to_string(),
        node_type: short_type_name(node.node_type()).to_string(),
        trigger_time: node.trigger_time(),
        leave_time: node.leave_time(),
    }
}

pub fn user_task_snapshot(
    instance: &ProcessInstanceInfo,
    work_item: &WorkItemInfo,
    task: &HumanTaskInfo,
) -> UserTaskSnapshot {
    UserTaskSnapshot {
        id: work_item.id().to_string(),
        state: work_item.phase_status().map(str::to_string),
        task_name: task.task_name.clone(),
        task_description: task.task_description.clone(),
        task_priority: task.task_priority.clone(),
        reference_name: task.reference_name.clone(),
        actual_owner: task.actual_owner.clone(),
        start_date: work_item.start_date(),
        complete_date: work_item.complete_date(),
        admin_groups: task.admin_groups.clone(),
        admin_users: task.admin_users.clone(),
        excluded_users: task.excluded_users.clone(),
        potential_groups: task.potential_groups.clone(),
        potential_users: task.potential_users.clone(),
        process_instance_id: instance.id().to_string(),
        root_process_instance_id: instance.root_instance_id().map(str::to_string),
        process_id: instance.process_id().to_string(),
        root_process_id: instance.root_process_id().map(str::to_string),
        inputs: work_item.parameters().clone(),
        outputs: work_item.results().clone(),
    }
}

pub fn variable_change_record(
    instance: &ProcessInstanceInfo,
    change: &VariableChange,
    changed_at: DateTime<Utc>,
) -> VariableChangeRecord {
    let node = change.node();
    VariableChangeRecord {
        process_id: instance.process_id().to_string(),
        process_instance_id: instance.id().to_string(),
        root_process_id: instance.root_process_id().map(str::to_string),
        root_process_instance_id: instance.root_instance_id().map(str::to_string),
        variable_name: change.variable_id().to_string(),
        variable_value: change.new_value().clone(),
        variable_previous_value: change.old_value().clone(),
        change_date: changed_at.trunc_subsecs(3),
        changed_by_node_id: node.map(|n| n.node_definition_id().to_string()),
        changed_by_node_name: node.map(|n| n.node_name().to_string()),
        changed_by_node_type: node.map(|n| short_type_name(n.node_type()).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_event::{MilestoneInfo, MilestoneStatus, ProcessErrorInfo};
    use std::collections::BTreeMap;

    #[test]
    fn short_type_name_takes_last_segment() {
        assert_eq!(
            short_type_name("org.jbpm.workflow.core.node.HumanTaskNode"),
            "HumanTaskNode"
        );
        assert_eq!(short_type_name("engine::node::EndNode"), "EndNode");
        assert_eq!(short_type_name("StartNode"), "StartNode");
    }

    #[test]
    fn snapshot_without_milestones_or_roles_maps_to_absent_fields() {
        let instance = ProcessInstanceInfo::builder()
            .id("p-1")
            .process_id("orders")
            .state(ProcessState::Active)
            .build();

        let snapshot = process_instance_snapshot(&instance);
        assert_eq!(snapshot.milestones, None);
        assert_eq!(snapshot.roles, None);
        assert_eq!(snapshot.error, None);
        assert!(snapshot.node_instances.is_empty());
    }

    #[test]
    fn snapshot_collects_milestones_roles_and_error() {
        let instance = ProcessInstanceInfo::builder()
            .id("p-2")
            .process_id("orders")
            .state(ProcessState::Error)
            .error(ProcessErrorInfo::new("_node_7", "boom"))
            .milestones(vec![
                MilestoneInfo::new("m1", "Approved", MilestoneStatus::Available),
                MilestoneInfo::new("m1", "Approved", MilestoneStatus::Available),
                MilestoneInfo::new("m2", "Shipped", MilestoneStatus::Completed),
            ])
            .process_metadata(BTreeMap::from([(
                SECURITY_ROLES_METADATA.to_string(),
                "admin,clerk".to_string(),
            )]))
            .build();

        let snapshot = process_instance_snapshot(&instance);
        let milestones = snapshot.milestones.unwrap();
        assert_eq!(milestones.len(), 2);
        assert!(milestones.iter().any(|m| m.status == "COMPLETED"));
        assert_eq!(
            snapshot.roles,
            Some(vec!["admin".to_string(), "clerk".to_string()])
        );
        assert_eq!(
            snapshot.error,
            Some(ProcessErrorRecord {
                node_definition_id: "_node_7".into(),
                error_message: "boom".into(),
            })
        );
    }

    #[test]
    fn error_info_is_ignored_unless_instance_is_in_error_state() {
        let instance = ProcessInstanceInfo::builder()
            .id("p-3")
            .process_id("orders")
            .state(ProcessState::Active)
            .error(ProcessErrorInfo::new("_node_7", "stale"))
            .build();

        assert_eq!(process_instance_snapshot(&instance).error, None);
    }

    #[test]
    fn variable_record_attributes_change_to_node() {
        let instance = ProcessInstanceInfo::builder()
            .id("p-4")
            .process_id("orders")
            .root_process_id("root")
            .build();
        let node = NodeInstanceInfo::builder()
            .id("ni-1")
            .node_id("3")
            .node_definition_id("_script_3")
            .node_name("Compute")
            .node_type("org.jbpm.workflow.core.node.ActionNode")
            .build();
        let change = VariableChange::builder()
            .variable_id("total")
            .old_value(serde_json::json!(1))
            .new_value(serde_json::json!(2))
            .node(node)
            .build();

        let record = variable_change_record(&instance, &change, Utc::now());
        assert_eq!(record.changed_by_node_id.as_deref(), Some("_script_3"));
        assert_eq!(record.changed_by_node_type.as_deref(), Some("ActionNode"));
        assert_eq!(record.variable_previous_value, serde_json::json!(1));
        assert_eq!(record.root_process_id.as_deref(), Some("root"));
    }
}
