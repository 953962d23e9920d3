// Sweep planning - one parameter set per swept value
use crate::config::parameter_set::ParameterSet;
use crate::config::sweep_axis::AxisSpec;
use crate::error::HarnessError;

/// A planned point: the parameters to run and the x coordinate they map to.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    pub x: f64,
    pub params: ParameterSet,
}

/// Substitute each configured value into the baseline, in configured order.
/// Only the swept key differs between the returned parameter sets.
pub fn plan_sweep(spec: &AxisSpec) -> Result<Vec<SweepPoint>, HarnessError> {
    Ok(spec
        .values
        .expand()?
        .into_iter()
        .map(|(x, arg)| SweepPoint {
            x,
            params: spec.baseline.with_value(spec.key, arg),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parameter_set::ParameterKey;
    use crate::config::sweep_axis::{AxisValues, SweepAxis};

    fn assert_only_key_varies(points: &[SweepPoint], spec: &AxisSpec) {
        for point in points {
            for key in ParameterKey::ALL {
                if key != spec.key {
                    assert_eq!(point.params.get(key), spec.baseline.get(key), "{:?} changed", key);
                }
            }
        }
    }

    #[test]
    fn connectivity_sweep_holds_other_inputs() {
        let spec = AxisSpec::default_for(SweepAxis::Connectivity);
        let points = plan_sweep(&spec).unwrap();

        assert_eq!(points.len(), 10);
        for (i, point) in points.iter().enumerate() {
            let expected = (i + 1).to_string();
            assert_eq!(point.params.get(ParameterKey::MinConnectivity), expected);
            assert_eq!(point.params.get(ParameterKey::MeanTxInterarrival), "10");
            assert_eq!(point.params.get(ParameterKey::MeanBlockInterarrival), "100");
            assert_eq!(point.params.get(ParameterKey::MeanLinkSpeed), "2");
            assert_eq!(point.x, (i + 1) as f64);
        }
    }

    #[test]
    fn default_axes_have_expected_lengths() {
        for (axis, len) in [
            (SweepAxis::Connectivity, 10),
            (SweepAxis::TxInterarrival, 20),
            (SweepAxis::LinkSpeed, 10),
        ] {
            let spec = AxisSpec::default_for(axis);
            let points = plan_sweep(&spec).unwrap();
            assert_eq!(points.len(), len, "{:?}", axis);
            assert_eq!(points.len(), spec.values.expand().unwrap().len());
            assert_only_key_varies(&points, &spec);
        }
    }

    #[test]
    fn tx_interarrival_baseline_matches_grapher_defaults() {
        let points = plan_sweep(&AxisSpec::default_for(SweepAxis::TxInterarrival)).unwrap();
        let first = &points[0].params;
        assert_eq!(first.as_args(), ["4", "5", "100", "2"]);
        assert_eq!(points[19].params.as_args(), ["4", "100", "100", "2"]);
    }

    #[test]
    fn explicit_list_order_is_preserved() {
        let spec = AxisSpec {
            values: AxisValues::List(vec![50.0, 10.0, 30.0]),
            ..AxisSpec::default_for(SweepAxis::LinkSpeed)
        };
        let xs: Vec<f64> = plan_sweep(&spec).unwrap().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![50.0, 10.0, 30.0]);
    }
}
