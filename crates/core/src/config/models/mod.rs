pub mod app_config;
pub mod dispatcher_worker;
pub mod observability;

// Re-export main types for easier imports
pub use app_config::AppConfig;
pub use dispatcher_worker::{DispatcherConfig, SimulationConfig, VALID_STRATEGIES};
pub use observability::ObservabilityConfig;
