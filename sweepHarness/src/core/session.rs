// One complete sweep: plan, execute, then render and export the series
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::info;

use crate::config::metric::MetricSelector;
use crate::config::sweep_axis::SweepAxis;
use crate::config::sweep_config::SweepConfig;
use crate::core::executor::{execute_sweep, ExecutorOptions, SweepResult};
use crate::core::planner::plan_sweep;
use crate::core::progress::SweepObserver;
use crate::core::runner::Simulator;
use crate::error::HarnessError;
use crate::output::plot::{plot_file_name, PlotRenderer};
use crate::utils::csv_export;

#[derive(Debug, Clone)]
pub struct SweepRequest {
    pub axis: SweepAxis,
    pub metric: MetricSelector,
    pub executor: ExecutorOptions,
    pub output_dir: PathBuf,
    pub export_csv: bool,
}

#[derive(Debug, Clone)]
pub struct SweepOutcome {
    pub axis: SweepAxis,
    pub metric: MetricSelector,
    pub x_label: String,
    pub y_label: String,
    pub trials: usize,
    pub result: SweepResult,
    pub plot_path: PathBuf,
    pub csv_path: Option<PathBuf>,
    pub started_at: DateTime<Local>,
    pub elapsed: Duration,
}

/// Run a full sweep. Files are only written once every point has been
/// averaged, and the plot is written last, so a failed sweep leaves no plot
/// behind.
pub fn run_sweep(
    config: &SweepConfig,
    request: &SweepRequest,
    simulator: &dyn Simulator,
    renderer: &dyn PlotRenderer,
    observer: &dyn SweepObserver,
) -> Result<SweepOutcome, HarnessError> {
    let started_at = Local::now();
    let clock = Instant::now();

    let spec = config.axis(request.axis)?;
    let points = plan_sweep(spec)?;
    let x_label = spec.label.clone();
    let y_label = request.metric.label().to_string();

    info!(
        axis = ?request.axis,
        metric = ?request.metric,
        points = points.len(),
        trials = request.executor.trial.trials,
        "starting sweep"
    );

    let result = execute_sweep(
        simulator,
        &config.report_layout,
        &points,
        request.metric,
        &request.executor,
        observer,
    )?;

    if result.points.is_empty() {
        return Err(HarnessError::EmptySeries(result.gaps.len()));
    }

    std::fs::create_dir_all(&request.output_dir)?;
    let plot_path = request.output_dir.join(plot_file_name(&y_label, &x_label));

    let csv_path = if request.export_csv {
        let path = plot_path.with_extension("csv");
        csv_export::export_series(&path, &result, &x_label, &y_label)?;
        info!(path = %path.display(), "series exported");
        Some(path)
    } else {
        None
    };

    if let Err(e) = renderer.render(&result.xs(), &result.ys(), &x_label, &y_label, &plot_path) {
        let _ = std::fs::remove_file(&plot_path);
        if let Some(path) = &csv_path {
            let _ = std::fs::remove_file(path);
        }
        return Err(e);
    }
    info!(path = %plot_path.display(), "plot written");

    Ok(SweepOutcome {
        axis: request.axis,
        metric: request.metric,
        x_label,
        y_label,
        trials: request.executor.trial.trials,
        result,
        plot_path,
        csv_path,
        started_at,
        elapsed: clock.elapsed(),
    })
}
