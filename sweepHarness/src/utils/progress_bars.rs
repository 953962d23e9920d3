use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::core::progress::SweepObserver;

const POINT_TEMPLATE: &str = "{prefix:>8} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}";
const TRIAL_TEMPLATE: &str = "{prefix:>8} {bar:40.green/white} {pos}/{len} {msg}";

/// Two nested bars: one for sweep points, one for trials of the current point.
pub struct TerminalProgress {
    _multi: MultiProgress,
    points: ProgressBar,
    trials: ProgressBar,
}

impl TerminalProgress {
    pub fn new() -> Self {
        let multi = MultiProgress::new();
        let points = multi.add(ProgressBar::new(0));
        let trials = multi.add(ProgressBar::new(0));

        points.set_style(style(POINT_TEMPLATE));
        points.set_prefix("points");
        trials.set_style(style(TRIAL_TEMPLATE));
        trials.set_prefix("trials");

        Self {
            _multi: multi,
            points,
            trials,
        }
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}

impl SweepObserver for TerminalProgress {
    fn sweep_started(&self, points: usize, trials_per_point: usize) {
        self.points.set_length(points as u64);
        self.trials.set_length(trials_per_point as u64);
    }

    fn trial_completed(&self, _point: usize, _trial: usize, value: f64) {
        self.trials.inc(1);
        self.trials.set_message(format!("last {:.4}", value));
    }

    fn point_completed(&self, _point: usize, x: f64, y: Option<f64>) {
        self.points.inc(1);
        match y {
            Some(y) => self.points.set_message(format!("x={} y={:.4}", x, y)),
            None => self.points.set_message(format!("x={} skipped", x)),
        }
        self.trials.reset();
    }

    fn sweep_finished(&self) {
        self.trials.finish_and_clear();
        self.points.finish();
    }
}
