//! 发布子系统（eventing）
//!
//! - `EventPublisher`：把批次信封交给外部传输的统一接口；
//! - `InMemoryEventPublisher`：基于广播通道的内存实现。
//!
//! 该模块仅定义协议，不绑定具体传输实现，可对接任意消息系统。
//!
pub mod publisher;
pub mod publisher_inmemory;

pub use publisher::EventPublisher;
pub use publisher_inmemory::InMemoryEventPublisher;
