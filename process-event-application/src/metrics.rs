//! 流程运行指标
//!
//! 监听引擎的流程事件，经 `metrics` 门面上报计数器、运行中实例计量与耗时直方图，
//! 具体导出（如 Prometheus）由宿主安装的 recorder 决定。
//! 句柄按 (指标名, 应用, 流程, 标签) 缓存在注册表中，重复事件不会重复注册；
//! 注册表由调用方持有（`Arc<ProcessMetrics>`），不使用全局单例。
//!
use chrono::TimeDelta;
use dashmap::DashMap;
use metrics::{
    Counter, Gauge, Histogram, Label, Unit, counter, describe_counter, describe_gauge,
    describe_histogram, gauge, histogram,
};
use process_event_domain::engine_event::{ProcessEvent, ProcessEventKind};
use std::fmt;
use tracing::debug;

pub const PROCESS_INSTANCE_STARTED_TOTAL: &str = "process_instance_started_total";
pub const PROCESS_INSTANCE_COMPLETED_TOTAL: &str = "process_instance_completed_total";
pub const PROCESS_INSTANCE_RUNNING_TOTAL: &str = "process_instance_running_total";
pub const PROCESS_INSTANCE_SLA_VIOLATED_TOTAL: &str = "process_instance_sla_violated_total";
pub const PROCESS_INSTANCE_DURATION_SECONDS: &str = "process_instance_duration_seconds";
pub const WORK_ITEM_DURATION_SECONDS: &str = "work_item_duration_seconds";

pub const APP_ID_LABEL: &str = "app_id";
pub const PROCESS_ID_LABEL: &str = "process_id";
pub const STATE_LABEL: &str = "state";
pub const NAME_LABEL: &str = "name";
pub const NODE_NAME_LABEL: &str = "node_name";

/// 人工任务参数中携带任务名的键
pub const TASK_NAME_PARAMETER: &str = "TaskName";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricKey {
    pub name: &'static str,
    pub app_id: String,
    pub process_id: Option<String>,
    pub label: Option<(&'static str, String)>,
}

impl MetricKey {
    pub fn new(name: &'static str, app_id: impl Into<String>) -> Self {
        Self {
            name,
            app_id: app_id.into(),
            process_id: None,
            label: None,
        }
    }

    pub fn process(mut self, process_id: impl Into<String>) -> Self {
        self.process_id = Some(process_id.into());
        self
    }

    pub fn label(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.label = Some((key, value.into()));
        self
    }

    pub fn labels(&self) -> Vec<Label> {
        let mut labels = vec![Label::new(APP_ID_LABEL, self.app_id.clone())];
        if let Some(process_id) = &self.process_id {
            labels.push(Label::new(PROCESS_ID_LABEL, process_id.clone()));
        }
        if let Some((key, value)) = &self.label {
            labels.push(Label::new(*key, value.clone()));
        }
        labels
    }
}

/// 登记指标说明，作用于当前 recorder
pub fn describe_process_metrics() {
    describe_counter!(PROCESS_INSTANCE_STARTED_TOTAL, "Process instances started");
    describe_counter!(
        PROCESS_INSTANCE_COMPLETED_TOTAL,
        "Process instances completed, by final state"
    );
    describe_gauge!(PROCESS_INSTANCE_RUNNING_TOTAL, "Process instances currently running");
    describe_counter!(PROCESS_INSTANCE_SLA_VIOLATED_TOTAL, "SLA violations, by node");
    describe_histogram!(
        PROCESS_INSTANCE_DURATION_SECONDS,
        Unit::Seconds,
        "Process instance duration"
    );
    describe_histogram!(
        WORK_ITEM_DURATION_SECONDS,
        Unit::Seconds,
        "Work item duration, by task name"
    );
}

/// 指标注册表，同时充当流程事件监听器
pub struct ProcessMetrics {
    app_id: String,
    counters: DashMap<MetricKey, Counter>,
    gauges: DashMap<MetricKey, Gauge>,
    histograms: DashMap<MetricKey, Histogram>,
}

impl fmt::Debug for ProcessMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessMetrics")
            .field("app_id", &self.app_id)
            .field("registered", &self.registered())
            .finish()
    }
}

impl ProcessMetrics {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            counters: DashMap::new(),
            gauges: DashMap::new(),
            histograms: DashMap::new(),
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn on_event(&self, event: &ProcessEvent) {
        let instance = event.instance();
        let process_id = instance.process_id();

        match event.kind() {
            ProcessEventKind::Started => {
                self.counter(self.key(PROCESS_INSTANCE_STARTED_TOTAL, process_id))
                    .increment(1);
                self.gauge(self.key(PROCESS_INSTANCE_RUNNING_TOTAL, process_id))
                    .increment(1.0);
            }
            ProcessEventKind::Completed => {
                self.gauge(self.key(PROCESS_INSTANCE_RUNNING_TOTAL, process_id))
                    .decrement(1.0);
                let state = instance.state().code().to_string();
                self.counter(
                    self.key(PROCESS_INSTANCE_COMPLETED_TOTAL, process_id)
                        .label(STATE_LABEL, state),
                )
                .increment(1);
                if let Some(start) = instance.start_date() {
                    let end = instance.end_date().unwrap_or(event.occurred_at());
                    self.histogram(self.key(PROCESS_INSTANCE_DURATION_SECONDS, process_id))
                        .record(seconds(end - start));
                }
            }
            ProcessEventKind::NodeLeft(node) => {
                let (Some(work_item), Some(triggered)) = (node.work_item(), node.trigger_time())
                else {
                    return;
                };
                let name = work_item
                    .parameters()
                    .get(TASK_NAME_PARAMETER)
                    .and_then(|v| v.as_str())
                    .unwrap_or(work_item.name());
                let left = node.leave_time().unwrap_or(event.occurred_at());
                let key = MetricKey::new(WORK_ITEM_DURATION_SECONDS, &self.app_id)
                    .label(NAME_LABEL, name);
                self.histogram(key).record(seconds(left - triggered));
            }
            ProcessEventKind::SlaViolated { node: Some(node) } => {
                let key = self
                    .key(PROCESS_INSTANCE_SLA_VIOLATED_TOTAL, process_id)
                    .label(NODE_NAME_LABEL, node.node_name());
                self.counter(key).increment(1);
            }
            _ => {}
        }
    }

    /// 已注册的指标数量
    pub fn registered(&self) -> usize {
        self.counters.len() + self.gauges.len() + self.histograms.len()
    }

    /// 丢弃缓存的句柄，下次事件时重新向当前 recorder 注册
    pub fn clear(&self) {
        self.counters.clear();
        self.gauges.clear();
        self.histograms.clear();
    }

    fn key(&self, name: &'static str, process_id: &str) -> MetricKey {
        MetricKey::new(name, &self.app_id).process(process_id)
    }

    fn counter(&self, key: MetricKey) -> Counter {
        let (name, labels) = (key.name, key.labels());
        self.counters
            .entry(key)
            .or_insert_with(|| {
                debug!(metric = name, "register counter");
                counter!(name, labels)
            })
            .value()
            .clone()
    }

    fn gauge(&self, key: MetricKey) -> Gauge {
        let (name, labels) = (key.name, key.labels());
        self.gauges
            .entry(key)
            .or_insert_with(|| {
                debug!(metric = name, "register gauge");
                gauge!(name, labels)
            })
            .value()
            .clone()
    }

    fn histogram(&self, key: MetricKey) -> Histogram {
        let (name, labels) = (key.name, key.labels());
        self.histograms
            .entry(key)
            .or_insert_with(|| {
                debug!(metric = name, "register histogram");
                histogram!(name, labels)
            })
            .value()
            .clone()
    }
}

fn seconds(duration: TimeDelta) -> f64 {
    duration.num_milliseconds().max(0) as f64 / 1000.0
}
