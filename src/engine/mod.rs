pub mod core;
pub mod error;
pub mod messages;
pub mod state;

// Re-export key components
pub use core::ForecastPipeline;
pub use error::PipelineError;
pub use messages::{DashboardReport, PipelineRequest};
pub use state::TickerState;
