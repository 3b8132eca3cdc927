use bon::Builder;
use process_event_domain::batch::{Addons, BatchConfig, DEFAULT_SERVICE};
use process_event_domain::domain_event::EventKind;
use process_event_domain::engine_event::TRACKED;
use serde::{Deserialize, Serialize};

/// 事件发布配置
///
/// 三类出站事件可分别关闭；关闭的种类仍参与折叠，只是不交给发布器。
///
/// ```rust
/// use process_event_application::config::EventsConfig;
/// use process_event_domain::domain_event::EventKind;
///
/// let config = EventsConfig::builder()
///     .service("http://travels:8080")
///     .variables_enabled(false)
///     .build();
/// assert!(config.is_enabled(EventKind::ProcessInstance));
/// assert!(!config.is_enabled(EventKind::Variable));
/// ```
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    #[builder(into, default = DEFAULT_SERVICE.to_string())]
    pub service: String,
    #[builder(default)]
    pub addons: Addons,
    #[builder(into, default = TRACKED.to_string())]
    pub tracked_tag: String,
    #[builder(default = true)]
    pub process_instances_enabled: bool,
    #[builder(default = true)]
    pub user_tasks_enabled: bool,
    #[builder(default = true)]
    pub variables_enabled: bool,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            service: DEFAULT_SERVICE.to_string(),
            addons: Addons::default(),
            tracked_tag: TRACKED.to_string(),
            process_instances_enabled: true,
            user_tasks_enabled: true,
            variables_enabled: true,
        }
    }
}

impl EventsConfig {
    pub fn is_enabled(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::ProcessInstance => self.process_instances_enabled,
            EventKind::UserTask => self.user_tasks_enabled,
            EventKind::Variable => self.variables_enabled,
        }
    }

    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            service: self.service.clone(),
            addons: self.addons.clone(),
            tracked_tag: self.tracked_tag.clone(),
        }
    }
}
