/// 批次发布示例
/// 模拟一次事务中引擎上报的原始事件，折叠为出站信封后经内存发布器广播
use anyhow::Result as AnyResult;
use chrono::{Duration, Utc};
use futures_util::StreamExt;
use process_event_domain::batch::{Addons, BatchConfig, EventBatch, ProcessInstanceEventBatch};
use process_event_domain::engine_event::{
    HumanTaskInfo, NodeInstanceInfo, ProcessEvent, ProcessInstanceInfo, ProcessState, TRACKED,
    VariableChange, WorkItemInfo, WorkItemKind, WorkItemTransition,
};
use process_event_domain::eventing::{EventPublisher, InMemoryEventPublisher};
use serde_json::json;

#[tokio::main]
async fn main() -> AnyResult<()> {
    let config = BatchConfig::builder()
        .service("http://localhost:8080")
        .addons(Addons::new(["monitoring", "process-management"]))
        .build();
    let mut batch = ProcessInstanceEventBatch::new(&config);

    let started = Utc::now();
    let running = ProcessInstanceInfo::builder()
        .id("4f1c1b4e")
        .process_id("org.acme.travels.approvals")
        .process_name("Approvals")
        .start_date(started)
        .state(ProcessState::Active)
        .build();

    // 事务内：启动、进入人工任务、任务分配、变量变化
    let task_node = NodeInstanceInfo::builder()
        .id("ni-2")
        .node_id("2")
        .node_definition_id("_UserTask_1")
        .node_name("First Line Approval")
        .node_type("org.jbpm.workflow.core.node.HumanTaskNode")
        .trigger_time(started + Duration::milliseconds(5))
        .build();
    let work_item = WorkItemInfo::builder()
        .id("wi-1")
        .name("Human Task")
        .phase_status("Ready")
        .kind(WorkItemKind::HumanTask(
            HumanTaskInfo::builder()
                .task_name("firstLineApproval")
                .potential_groups(["managers".to_string()].into())
                .build(),
        ))
        .build();
    let change = VariableChange::builder()
        .variable_id("approver")
        .old_value(json!(null))
        .new_value(json!("manager"))
        .build()
        .with_tag(TRACKED);

    batch.append(ProcessEvent::started(running.clone()).into());
    batch.append(ProcessEvent::node_triggered(running.clone(), task_node).into());
    batch.append(
        ProcessEvent::work_item_transition(
            running.clone(),
            WorkItemTransition::new(work_item, true),
        )
        .into(),
    );
    batch.append(ProcessEvent::variable_changed(running, change).into());

    let publisher = InMemoryEventPublisher::new(16);
    let mut stream = publisher.subscribe();

    let events = batch.flush();
    println!(
        "folded: {} process instance(s), {} user task(s), {} variable(s)",
        events.process_instances().count(),
        events.user_tasks().count(),
        events.variables().count()
    );
    publisher.publish_batch(&events).await?;

    for _ in 0..events.len() {
        if let Some(envelope) = stream.next().await {
            let envelope = envelope?;
            println!("{}", envelope.to_json()?);
        }
    }

    Ok(())
}
