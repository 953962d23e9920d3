use std::time::Duration;

use crate::config::parameter_set::ParameterSet;

/// Every way a sweep can fail, from a single simulator invocation up to the
/// whole series.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("simulator invocation failed (exit code {exit_code:?}): {reason}")]
    SimulatorInvocation {
        exit_code: Option<i32>,
        reason: String,
    },

    #[error("simulator did not finish within {0:?} and was terminated")]
    SimulatorTimeout(Duration),

    #[error("simulator output is not valid UTF-8: {0}")]
    OutputDecode(#[from] std::string::FromUtf8Error),

    #[error("malformed simulator output: `{field}` missing or invalid at line {line}, token {token}")]
    MalformedOutput {
        field: &'static str,
        line: usize,
        token: usize,
    },

    #[error("invalid sweep configuration: {0}")]
    SweepConfiguration(String),

    #[error("trial {trial} with parameters [{params}] failed: {source}")]
    Trial {
        trial: usize,
        params: ParameterSet,
        #[source]
        source: Box<HarnessError>,
    },

    #[error("sweep point {index} (x = {x}) failed: {source}")]
    Point {
        index: usize,
        x: f64,
        #[source]
        source: Box<HarnessError>,
    },

    #[error("no sweep point produced a value ({0} skipped); nothing to plot")]
    EmptySeries(usize),

    #[error("failed to render plot: {0}")]
    Plot(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HarnessError {
    /// Short name of the pipeline stage that produced the innermost error.
    pub fn stage(&self) -> &'static str {
        match self {
            HarnessError::SimulatorInvocation { .. } => "simulator invocation",
            HarnessError::SimulatorTimeout(_) => "simulator timeout",
            HarnessError::OutputDecode(_) => "output decode",
            HarnessError::MalformedOutput { .. } => "result extraction",
            HarnessError::SweepConfiguration(_) => "sweep configuration",
            HarnessError::EmptySeries(_) => "sweep execution",
            HarnessError::Trial { source, .. } | HarnessError::Point { source, .. } => source.stage(),
            HarnessError::Plot(_) => "plot rendering",
            HarnessError::Io(_) | HarnessError::Csv(_) | HarnessError::Json(_) => "file output",
        }
    }

    /// Parameter set of the failing trial, if the error came from one.
    pub fn failed_params(&self) -> Option<&ParameterSet> {
        match self {
            HarnessError::Trial { params, .. } => Some(params),
            HarnessError::Point { source, .. } => source.failed_params(),
            _ => None,
        }
    }
}
