use serde::{Deserialize, Serialize};

use crate::core::extractor::RunResult;
use crate::error::HarnessError;

/// The dependent variable of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricSelector {
    TimeToConfirmation,
    AvgFee,
    PercentConfirmed,
}

impl MetricSelector {
    pub const ALL: [MetricSelector; 3] = [
        MetricSelector::TimeToConfirmation,
        MetricSelector::AvgFee,
        MetricSelector::PercentConfirmed,
    ];

    /// Resolve the command-line index (0, 1, 2).
    pub fn from_index(index: usize) -> Result<Self, HarnessError> {
        Self::ALL.get(index).copied().ok_or_else(|| {
            HarnessError::SweepConfiguration(format!(
                "unknown metric selector {} (expected 0..={})",
                index,
                Self::ALL.len() - 1
            ))
        })
    }

    /// Axis label, also used in the plot file name.
    pub fn label(&self) -> &'static str {
        match self {
            MetricSelector::TimeToConfirmation => "Average Time to Confirmation",
            MetricSelector::AvgFee => "Average Fee",
            MetricSelector::PercentConfirmed => "Percent Confirmed",
        }
    }

    pub fn value(&self, result: &RunResult) -> f64 {
        match self {
            MetricSelector::TimeToConfirmation => result.avg_time_to_confirmation,
            MetricSelector::AvgFee => result.avg_fee,
            MetricSelector::PercentConfirmed => result.percent_confirmed,
        }
    }
}
