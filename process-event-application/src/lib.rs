pub mod config;
pub mod error;
pub mod event_manager;
pub mod metrics;
pub mod unit_of_work;

pub use event_manager::EventManager;
pub use metrics::ProcessMetrics;
pub use unit_of_work::UnitOfWork;
