use super::event_envelope::{EventEnvelope, EventPayload};
use super::metadata::Metadata;

/// 信封发射器：为投影计算来源并附加插件标签（无状态）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeEmitter {
    service: String,
    addons: String,
}

impl EnvelopeEmitter {
    pub fn new(service: impl Into<String>, addons: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            addons: addons.into(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn addons(&self) -> &str {
        &self.addons
    }

    pub fn emit(&self, payload: EventPayload) -> EventEnvelope {
        let source = self.runtime_source(&payload.metadata());
        EventEnvelope::new(source, self.addons.clone(), payload)
    }

    /// `<service>/<流程ID最后一个 '.' 之后的部分>`；元数据中没有流程 ID 时返回 `None`
    pub fn runtime_source(&self, metadata: &Metadata) -> Option<String> {
        let process_id = metadata.process_id()?;
        let short = process_id
            .rsplit_once('.')
            .map_or(process_id, |(_, short)| short);
        Some(format!("{}/{}", self.service, short))
    }
}
