pub mod config;
pub mod paths;

pub use config::{ColumnConfig, Config, OutputConfig, PolicyConfig, SchedulerConfig, SourceConfig, SourceKind, default_scheduler_config};
pub use paths::{PathManager, container_base_path};
