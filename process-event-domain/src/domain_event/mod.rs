//! 出站领域事件（Outbound Domain Event）
//!
//! 把折叠后的投影封装为 `EventEnvelope`：来源标识、插件标签、由投影派生的
//! 元数据与载荷；`EnvelopeEmitter` 负责计算来源，`BatchEvents` 为一个批次的输出集合。

mod batch_events;
mod emitter;
mod event_envelope;
mod metadata;

pub use batch_events::BatchEvents;
pub use emitter::EnvelopeEmitter;
pub use event_envelope::{
    EventEnvelope, EventKind, EventPayload, PROCESS_INSTANCE_EVENT_TYPE,
    USER_TASK_INSTANCE_EVENT_TYPE, VARIABLE_INSTANCE_EVENT_TYPE,
};
pub use metadata::{
    Metadata, PARENT_INSTANCE_ID_META_DATA, PROCESS_ID_META_DATA, PROCESS_INSTANCE_ID_META_DATA,
    PROCESS_INSTANCE_STATE_META_DATA, ROOT_INSTANCE_ID_META_DATA, ROOT_PROCESS_ID_META_DATA,
    USER_TASK_INSTANCE_ID_META_DATA, USER_TASK_INSTANCE_STATE_META_DATA, VARIABLE_NAME_META_DATA,
};
