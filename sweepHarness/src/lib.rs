// Main module declarations for the sweep harness

// Core sweep pipeline
pub mod core {
    pub mod extractor;
    pub mod runner;
    pub mod averager;
    pub mod planner;
    pub mod executor;
    pub mod progress;
    pub mod session;
}

// Configuration modules
pub mod config {
    pub mod parameter_set;
    pub mod metric;
    pub mod sweep_axis;
    pub mod sweep_config;
}

// Plot and report output
pub mod output {
    pub mod plot;
    pub mod reporting;
}

// Utility functions
pub mod utils {
    pub mod logging;
    pub mod csv_export;
    pub mod progress_bars;
}

// CLI interface
pub mod cli {
    pub mod cli;
}

pub mod error;

// Re-export commonly used items
pub use crate::config::metric::MetricSelector;
pub use crate::config::parameter_set::{ParameterKey, ParameterSet};
pub use crate::config::sweep_axis::SweepAxis;
pub use crate::config::sweep_config::SweepConfig;
pub use crate::core::extractor::RunResult;
pub use crate::core::runner::{ProcessSimulator, Simulator};
pub use crate::error::HarnessError;
