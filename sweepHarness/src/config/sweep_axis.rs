use serde::{Deserialize, Serialize};

use crate::config::parameter_set::{ParameterKey, ParameterSet};
use crate::error::HarnessError;

/// The independent variable of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepAxis {
    Connectivity,
    TxInterarrival,
    LinkSpeed,
}

impl SweepAxis {
    pub const ALL: [SweepAxis; 3] = [
        SweepAxis::Connectivity,
        SweepAxis::TxInterarrival,
        SweepAxis::LinkSpeed,
    ];

    /// Resolve the command-line index (0, 1, 2).
    pub fn from_index(index: usize) -> Result<Self, HarnessError> {
        Self::ALL.get(index).copied().ok_or_else(|| {
            HarnessError::SweepConfiguration(format!(
                "unknown sweep axis selector {} (expected 0..={})",
                index,
                Self::ALL.len() - 1
            ))
        })
    }

    pub fn default_key(&self) -> ParameterKey {
        match self {
            SweepAxis::Connectivity => ParameterKey::MinConnectivity,
            SweepAxis::TxInterarrival => ParameterKey::MeanTxInterarrival,
            SweepAxis::LinkSpeed => ParameterKey::MeanLinkSpeed,
        }
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            SweepAxis::Connectivity => "Min Connectivity",
            SweepAxis::TxInterarrival => "Mean Transaction Interarrival Time",
            SweepAxis::LinkSpeed => "Mean Link Speed",
        }
    }
}

/// Values substituted for the swept key, either an inclusive integer range or
/// an explicit list. In JSON: `{"range": {"start": 1, "end": 10, "step": 1}}`
/// or `{"list": [0.5, 1.0]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisValues {
    Range { start: i64, end: i64, step: i64 },
    List(Vec<f64>),
}

impl AxisValues {
    /// Each value as (x coordinate, simulator argument).
    pub fn expand(&self) -> Result<Vec<(f64, String)>, HarnessError> {
        let values: Vec<(f64, String)> = match self {
            AxisValues::Range { start, end, step } => {
                if *step <= 0 {
                    return Err(HarnessError::SweepConfiguration(format!(
                        "range step must be positive, got {}",
                        step
                    )));
                }
                (*start..=*end)
                    .step_by(*step as usize)
                    .map(|v| (v as f64, v.to_string()))
                    .collect()
            }
            AxisValues::List(values) => values.iter().map(|v| (*v, v.to_string())).collect(),
        };

        if values.is_empty() {
            return Err(HarnessError::SweepConfiguration(
                "axis has no values to sweep".to_string(),
            ));
        }
        if values.iter().any(|(x, _)| !x.is_finite()) {
            return Err(HarnessError::SweepConfiguration(
                "axis values must be finite".to_string(),
            ));
        }
        Ok(values)
    }
}

/// Everything needed to plan one axis: which key moves, what it is called on
/// the plot, what stays fixed and which values it takes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub key: ParameterKey,
    pub label: String,
    pub baseline: ParameterSet,
    pub values: AxisValues,
}

impl AxisSpec {
    pub fn default_for(axis: SweepAxis) -> Self {
        let (baseline, values) = match axis {
            SweepAxis::Connectivity => (
                ParameterSet::new("1", "10", "100", "2"),
                AxisValues::Range { start: 1, end: 10, step: 1 },
            ),
            SweepAxis::TxInterarrival => (
                ParameterSet::new("4", "5", "100", "2"),
                AxisValues::Range { start: 5, end: 100, step: 5 },
            ),
            SweepAxis::LinkSpeed => (
                ParameterSet::new("4", "10", "100", "10"),
                AxisValues::Range { start: 10, end: 100, step: 10 },
            ),
        };

        Self {
            key: axis.default_key(),
            label: axis.default_label().to_string(),
            baseline,
            values,
        }
    }
}
