// Trial averaging - N independent trials reduced to one mean
use tracing::{debug, warn};

use crate::config::metric::MetricSelector;
use crate::config::parameter_set::ParameterSet;
use crate::core::extractor::{ReportLayout, RunResult};
use crate::core::runner::{run_trial, Simulator};
use crate::error::HarnessError;

/// Per-trial execution options, fixed for a whole sweep so every point is
/// averaged over the same number of runs.
#[derive(Debug, Clone)]
pub struct TrialOptions {
    pub trials: usize,
    /// Extra attempts after a failed trial before giving up.
    pub max_retries: usize,
}

impl Default for TrialOptions {
    fn default() -> Self {
        Self {
            trials: 5,
            max_retries: 0,
        }
    }
}

/// Mean of `metric` over `options.trials` runs. Any trial that still fails
/// after its retries fails the whole average.
pub fn average_metric(
    simulator: &dyn Simulator,
    layout: &ReportLayout,
    params: &ParameterSet,
    metric: MetricSelector,
    options: &TrialOptions,
    mut on_trial: impl FnMut(usize, f64),
) -> Result<f64, HarnessError> {
    if options.trials == 0 {
        return Err(HarnessError::SweepConfiguration(
            "trial count must be at least 1".to_string(),
        ));
    }

    let mut total = 0.0;
    for trial in 1..=options.trials {
        let result = run_with_retries(simulator, layout, params, options.max_retries).map_err(|e| {
            HarnessError::Trial {
                trial,
                params: params.clone(),
                source: Box::new(e),
            }
        })?;

        let value = metric.value(&result);
        debug!(trial, value, params = %params, "trial complete");
        total += value;
        on_trial(trial, value);
    }

    Ok(total / options.trials as f64)
}

fn run_with_retries(
    simulator: &dyn Simulator,
    layout: &ReportLayout,
    params: &ParameterSet,
    max_retries: usize,
) -> Result<RunResult, HarnessError> {
    let mut attempt = 0;
    loop {
        match run_trial(simulator, layout, params) {
            Ok(result) => return Ok(result),
            Err(e) if attempt < max_retries => {
                attempt += 1;
                warn!(attempt, max_retries, params = %params, error = %e, "trial failed, retrying");
            }
            Err(e) => return Err(e),
        }
    }
}
