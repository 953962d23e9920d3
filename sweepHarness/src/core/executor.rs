// Sweep execution - drives every planned point through the averager
use serde::Serialize;
use tracing::{info, warn};

use crate::config::metric::MetricSelector;
use crate::core::averager::{average_metric, TrialOptions};
use crate::core::extractor::ReportLayout;
use crate::core::planner::SweepPoint;
use crate::core::progress::SweepObserver;
use crate::core::runner::Simulator;
use crate::error::HarnessError;
use crate::utils::logging::{self, OperationCategory};

/// A point that failed and was skipped because gap recording was enabled.
#[derive(Debug, Clone, Serialize)]
pub struct SweepGap {
    pub index: usize,
    pub x: f64,
    pub error: String,
}

/// Averaged series in planning order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepResult {
    pub points: Vec<(f64, f64)>,
    pub gaps: Vec<SweepGap>,
}

impl SweepResult {
    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|(x, _)| *x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|(_, y)| *y).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.gaps.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExecutorOptions {
    pub trial: TrialOptions,
    /// Record failed points as gaps instead of aborting the sweep.
    pub skip_failed_points: bool,
}

pub fn execute_sweep(
    simulator: &dyn Simulator,
    layout: &ReportLayout,
    points: &[SweepPoint],
    metric: MetricSelector,
    options: &ExecutorOptions,
    observer: &dyn SweepObserver,
) -> Result<SweepResult, HarnessError> {
    let _timing = logging::start_timing("execute_sweep", OperationCategory::Sweep);

    observer.sweep_started(points.len(), options.trial.trials);

    let mut result = SweepResult::default();
    for (index, point) in points.iter().enumerate() {
        let _point_timing = logging::start_timing("sweep_point", OperationCategory::SweepPoint);

        let averaged = average_metric(
            simulator,
            layout,
            &point.params,
            metric,
            &options.trial,
            |trial, value| observer.trial_completed(index, trial, value),
        );

        match averaged {
            Ok(y) => {
                info!(index, x = point.x, y, params = %point.params, "sweep point complete");
                result.points.push((point.x, y));
                observer.point_completed(index, point.x, Some(y));
            }
            Err(e) if options.skip_failed_points => {
                warn!(index, x = point.x, error = %e, "sweep point failed, recording gap");
                result.gaps.push(SweepGap {
                    index,
                    x: point.x,
                    error: e.to_string(),
                });
                observer.point_completed(index, point.x, None);
            }
            Err(e) => {
                return Err(HarnessError::Point {
                    index,
                    x: point.x,
                    source: Box::new(e),
                })
            }
        }
    }

    observer.sweep_finished();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::config::parameter_set::ParameterSet;
    use crate::core::averager::tests::{exit_1, ScriptedSimulator};
    use crate::core::extractor::tests::sample_report;
    use crate::core::progress::NoProgress;

    fn points(xs: &[i64]) -> Vec<SweepPoint> {
        xs.iter()
            .map(|x| SweepPoint {
                x: *x as f64,
                params: ParameterSet::new("4", x.to_string(), "100", "2"),
            })
            .collect()
    }

    fn options(trials: usize, skip: bool) -> ExecutorOptions {
        ExecutorOptions {
            trial: TrialOptions {
                trials,
                ..TrialOptions::default()
            },
            skip_failed_points: skip,
        }
    }

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<String>>,
    }

    impl SweepObserver for Recorder {
        fn sweep_started(&self, points: usize, trials: usize) {
            self.events.borrow_mut().push(format!("start {points}x{trials}"));
        }
        fn trial_completed(&self, point: usize, trial: usize, _value: f64) {
            self.events.borrow_mut().push(format!("trial {point}.{trial}"));
        }
        fn point_completed(&self, point: usize, _x: f64, y: Option<f64>) {
            self.events.borrow_mut().push(format!("point {point} {:?}", y));
        }
        fn sweep_finished(&self) {
            self.events.borrow_mut().push("done".to_string());
        }
    }

    #[test]
    fn result_follows_planning_order() {
        let sim = ScriptedSimulator::new(vec![
            Ok(sample_report(100, 1, 3.0, 0.01)),
            Ok(sample_report(100, 1, 5.0, 0.01)),
            Ok(sample_report(100, 1, 1.0, 0.01)),
            Ok(sample_report(100, 1, 1.0, 0.01)),
            Ok(sample_report(100, 1, 8.0, 0.01)),
            Ok(sample_report(100, 1, 2.0, 0.01)),
        ]);
        let plan = points(&[30, 10, 20]);

        let result = execute_sweep(
            &sim,
            &ReportLayout::default(),
            &plan,
            MetricSelector::TimeToConfirmation,
            &options(2, false),
            &NoProgress,
        )
        .unwrap();

        assert_eq!(result.xs(), vec![30.0, 10.0, 20.0]);
        assert_eq!(result.ys(), vec![4.0, 1.0, 5.0]);
        assert!(result.is_complete());
    }

    #[test]
    fn observer_sees_trials_then_points() {
        let sim = ScriptedSimulator::new(
            (0..4).map(|_| Ok(sample_report(100, 1, 3.0, 0.01))).collect(),
        );
        let recorder = Recorder::default();

        execute_sweep(
            &sim,
            &ReportLayout::default(),
            &points(&[1, 2]),
            MetricSelector::TimeToConfirmation,
            &options(2, false),
            &recorder,
        )
        .unwrap();

        assert_eq!(
            recorder.events.into_inner(),
            vec![
                "start 2x2",
                "trial 0.1",
                "trial 0.2",
                "point 0 Some(3.0)",
                "trial 1.1",
                "trial 1.2",
                "point 1 Some(3.0)",
                "done",
            ]
        );
    }

    #[test]
    fn failing_point_aborts_the_sweep() {
        let sim = ScriptedSimulator::new(vec![
            Ok(sample_report(100, 1, 3.0, 0.01)),
            Err(exit_1()),
        ]);

        let err = execute_sweep(
            &sim,
            &ReportLayout::default(),
            &points(&[5, 10, 15]),
            MetricSelector::TimeToConfirmation,
            &options(1, false),
            &NoProgress,
        )
        .unwrap_err();

        match &err {
            HarnessError::Point { index, x, .. } => {
                assert_eq!(*index, 1);
                assert_eq!(*x, 10.0);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.failed_params().unwrap().as_args(), ["4", "10", "100", "2"]);
        assert_eq!(sim.calls.get(), 2);
    }

    #[test]
    fn skipping_records_a_gap_and_continues() {
        let sim = ScriptedSimulator::new(vec![
            Ok(sample_report(100, 1, 3.0, 0.01)),
            Err(exit_1()),
            Ok(sample_report(100, 1, 7.0, 0.01)),
        ]);

        let result = execute_sweep(
            &sim,
            &ReportLayout::default(),
            &points(&[5, 10, 15]),
            MetricSelector::TimeToConfirmation,
            &options(1, true),
            &NoProgress,
        )
        .unwrap();

        assert_eq!(result.points, vec![(5.0, 3.0), (15.0, 7.0)]);
        assert_eq!(result.gaps.len(), 1);
        assert_eq!(result.gaps[0].index, 1);
        assert_eq!(result.gaps[0].x, 10.0);
        assert!(!result.is_complete());
    }
}
