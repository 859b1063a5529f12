pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::http::ApiClient;
pub use adapters::notify::TracingNotifier;
pub use config::CliConfig;
pub use core::flow::SessionFlow;
pub use core::orchestrator::AnalysisOrchestrator;
pub use core::state::SessionStateMachine;
pub use utils::error::{IntakeError, Result};
