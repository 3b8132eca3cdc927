use async_trait::async_trait;
use futures_util::StreamExt;
use process_event_application::config::EventsConfig;
use process_event_application::error::AppError;
use process_event_application::{EventManager, UnitOfWork};
use process_event_domain::domain_event::{EventEnvelope, EventKind};
use process_event_domain::engine_event::{
    EngineEvent, NodeInstanceInfo, ProcessEvent, ProcessInstanceInfo, ProcessState, TRACKED,
    VariableChange,
};
use process_event_domain::error::{DomainError, DomainResult};
use process_event_domain::eventing::{EventPublisher, InMemoryEventPublisher};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct FailingPublisher;

#[async_trait]
impl EventPublisher for FailingPublisher {
    fn publisher_name(&self) -> &str {
        "failing"
    }

    async fn publish(&self, _event: &EventEnvelope) -> DomainResult<()> {
        Err(DomainError::publisher("failing", "broker unavailable"))
    }
}

#[derive(Default)]
struct CountingPublisher {
    published: AtomicUsize,
}

#[async_trait]
impl EventPublisher for CountingPublisher {
    fn publisher_name(&self) -> &str {
        "counting"
    }

    async fn publish(&self, _event: &EventEnvelope) -> DomainResult<()> {
        self.published.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn instance() -> ProcessInstanceInfo {
    ProcessInstanceInfo::builder()
        .id("pi-1")
        .process_id("org.acme.travels")
        .process_name("Travels")
        .state(ProcessState::Active)
        .build()
}

fn append_transaction(uow: &mut UnitOfWork) {
    let node = NodeInstanceInfo::builder()
        .id("ni-1")
        .node_id("1")
        .node_definition_id("_start")
        .node_type("org.jbpm.workflow.core.node.StartNode")
        .build();
    let change = VariableChange::builder()
        .variable_id("traveller")
        .old_value(json!(null))
        .new_value(json!({"name": "john"}))
        .build()
        .with_tag(TRACKED);

    uow.append(ProcessEvent::started(instance()));
    uow.append(ProcessEvent::node_triggered(instance(), node));
    uow.append(ProcessEvent::variable_changed(instance(), change));
    uow.append(EngineEvent::unrecognized("ProcessDataChanged"));
}

#[tokio::test]
async fn commit_publishes_folded_batch() {
    let publisher = InMemoryEventPublisher::new(16);
    let mut stream = publisher.subscribe();
    let manager = EventManager::new(EventsConfig::builder().service("http://travels").build())
        .with_publisher(Arc::new(publisher));

    let mut uow = UnitOfWork::start(Arc::new(manager));
    append_transaction(&mut uow);
    assert_eq!(uow.pending(), 3);

    let published = uow.commit().await.unwrap();
    assert_eq!(published, 2);

    let first = stream.next().await.unwrap().unwrap();
    let second = stream.next().await.unwrap().unwrap();
    assert_eq!(first.kind(), EventKind::ProcessInstance);
    assert_eq!(first.source.as_deref(), Some("http://travels/travels"));
    let snapshot = first.payload.as_process_instance().unwrap();
    assert_eq!(snapshot.node_instances.len(), 1);
    assert_eq!(second.kind(), EventKind::Variable);
    assert_eq!(
        second.payload.as_variable().unwrap().variable_value,
        json!({"name": "john"})
    );
}

#[tokio::test]
async fn disabled_kinds_are_not_published() {
    let counting = Arc::new(CountingPublisher::default());
    let config = EventsConfig::builder().variables_enabled(false).build();
    let manager = Arc::new(EventManager::new(config).with_publisher(counting.clone()));

    let mut uow = UnitOfWork::start(manager);
    append_transaction(&mut uow);

    assert_eq!(uow.commit().await.unwrap(), 1);
    assert_eq!(counting.published.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn abort_discards_pending_events() {
    let counting = Arc::new(CountingPublisher::default());
    let manager =
        Arc::new(EventManager::new(EventsConfig::default()).with_publisher(counting.clone()));

    let mut uow = UnitOfWork::start(manager.clone());
    append_transaction(&mut uow);
    uow.abort();

    let empty = UnitOfWork::start(manager);
    assert_eq!(empty.commit().await.unwrap(), 0);
    assert_eq!(counting.published.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn no_publishers_drops_batch_quietly() {
    let manager = Arc::new(EventManager::new(EventsConfig::default()));
    let mut uow = UnitOfWork::start(manager);
    append_transaction(&mut uow);
    assert_eq!(uow.commit().await.unwrap(), 0);
}

#[tokio::test]
async fn failing_publisher_is_reported_after_all_publishers_ran() {
    let counting = Arc::new(CountingPublisher::default());
    let manager = EventManager::new(EventsConfig::default())
        .with_publisher(Arc::new(FailingPublisher))
        .with_publisher(counting.clone());

    let mut uow = UnitOfWork::start(Arc::new(manager));
    append_transaction(&mut uow);

    match uow.commit().await {
        Err(AppError::Publish { publishers, reason }) => {
            assert_eq!(publishers, vec!["failing".to_string()]);
            assert!(reason.contains("broker unavailable"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(counting.published.load(Ordering::SeqCst), 2);
}
