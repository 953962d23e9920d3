/// Receives progress from a running sweep. Every method has a no-op default,
/// so observers only implement what they display. Observers never influence
/// the values a sweep produces.
pub trait SweepObserver {
    fn sweep_started(&self, _points: usize, _trials_per_point: usize) {}

    /// `trial` counts from 1 within the current point.
    fn trial_completed(&self, _point: usize, _trial: usize, _value: f64) {}

    /// `y` is `None` when the point was skipped and recorded as a gap.
    fn point_completed(&self, _point: usize, _x: f64, _y: Option<f64>) {}

    fn sweep_finished(&self) {}
}

/// Observer that ignores everything.
pub struct NoProgress;

impl SweepObserver for NoProgress {}
