use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::sweep_axis::{AxisSpec, SweepAxis};
use crate::core::extractor::ReportLayout;
use crate::error::HarnessError;

pub const DEFAULT_SIMULATOR: &str = "./blockchain-sim";

/// Axis ranges, baselines and the report layout. Adding or reshaping an axis
/// is a config change, not a code change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub axes: BTreeMap<SweepAxis, AxisSpec>,
    pub report_layout: ReportLayout,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            axes: SweepAxis::ALL
                .iter()
                .map(|axis| (*axis, AxisSpec::default_for(*axis)))
                .collect(),
            report_layout: ReportLayout::default(),
        }
    }
}

impl SweepConfig {
    pub fn from_json_file(path: &Path) -> Result<Self, HarnessError> {
        let contents = std::fs::read_to_string(path)?;
        let config: SweepConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, HarnessError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn axis(&self, axis: SweepAxis) -> Result<&AxisSpec, HarnessError> {
        self.axes.get(&axis).ok_or_else(|| {
            HarnessError::SweepConfiguration(format!("no configuration for axis {:?}", axis))
        })
    }

    pub fn validate(&self) -> Result<(), HarnessError> {
        for (axis, spec) in &self.axes {
            spec.values.expand().map_err(|e| {
                HarnessError::SweepConfiguration(format!("axis {:?}: {}", axis, e))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::sweep_axis::AxisValues;

    #[test]
    fn default_covers_every_axis() {
        let config = SweepConfig::default();
        for axis in SweepAxis::ALL {
            assert!(config.axis(axis).is_ok());
        }
        config.validate().unwrap();
    }

    #[test]
    fn json_round_trip_through_file() {
        let mut config = SweepConfig::default();
        if let Some(spec) = config.axes.get_mut(&SweepAxis::LinkSpeed) {
            spec.values = AxisValues::List(vec![1.0, 2.5]);
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.json");
        std::fs::write(&path, config.to_json().unwrap()).unwrap();

        let loaded = SweepConfig::from_json_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.json");
        std::fs::write(
            &path,
            r#"{"report_layout": {
                "num_blocks": {"line": 4, "token": 3},
                "num_transactions": {"line": 5, "token": 3},
                "avg_time_to_confirmation": {"line": 6, "token": 2},
                "avg_fee": {"line": 7, "token": 3},
                "percent_confirmed": {"line": 8, "token": 2}
            }}"#,
        )
        .unwrap();

        let loaded = SweepConfig::from_json_file(&path).unwrap();
        assert_eq!(loaded.axes, SweepConfig::default().axes);
        assert!(!loaded.report_layout.percent_confirmed_aliases_block_count());
    }

    #[test]
    fn invalid_axis_in_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.json");
        let mut config = SweepConfig::default();
        if let Some(spec) = config.axes.get_mut(&SweepAxis::Connectivity) {
            spec.values = AxisValues::Range { start: 1, end: 10, step: 0 };
        }
        std::fs::write(&path, config.to_json().unwrap()).unwrap();

        assert!(matches!(
            SweepConfig::from_json_file(&path),
            Err(HarnessError::SweepConfiguration(_))
        ));
    }
}
