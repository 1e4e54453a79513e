pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};
pub use crate::config::{AppConfig, LambdaConfig};

pub use crate::core::{assembler::ApiResponse, engine::ReportEngine, fetch::HttpSource};
pub use crate::domain::model::{CaseRecord, IncidenceRecord, ResponseEnvelope, Thresholds};
pub use crate::utils::error::{ReportError, Result};
