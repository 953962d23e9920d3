use std::path::Path;

use plotters::prelude::*;

use crate::error::HarnessError;
use crate::utils::logging::{self, FileIOType, OperationCategory};

/// Consumer of a finished series. Implementations persist a line plot at
/// `dest`; nothing flows back into the sweep.
pub trait PlotRenderer {
    fn render(
        &self,
        xs: &[f64],
        ys: &[f64],
        x_label: &str,
        y_label: &str,
        dest: &Path,
    ) -> Result<(), HarnessError>;
}

/// `"<YLabel>_vs_<XLabel>.png"`
pub fn plot_file_name(y_label: &str, x_label: &str) -> String {
    format!("{}_vs_{}.png", y_label, x_label)
}

/// PNG line plot with a grid, titled "<Y> vs. <X>".
pub struct BitmapPlotRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for BitmapPlotRenderer {
    fn default() -> Self {
        Self { width: 1200, height: 800 }
    }
}

impl PlotRenderer for BitmapPlotRenderer {
    fn render(
        &self,
        xs: &[f64],
        ys: &[f64],
        x_label: &str,
        y_label: &str,
        dest: &Path,
    ) -> Result<(), HarnessError> {
        let _timing = logging::start_timing(
            "render_plot",
            OperationCategory::FileIO { subcategory: FileIOType::PlotSave },
        );

        if xs.len() != ys.len() {
            return Err(HarnessError::Plot(format!(
                "series length mismatch: {} x values, {} y values",
                xs.len(),
                ys.len()
            )));
        }
        if xs.is_empty() {
            return Err(HarnessError::Plot("no points to plot".to_string()));
        }

        let (x_min, x_max) = padded_bounds(xs, 0.0);
        let (y_min, y_max) = padded_bounds(ys, 0.05);

        let root = BitMapBackend::new(dest, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(format!("{} vs. {}", y_label, x_label), ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .x_desc(x_label)
            .y_desc(y_label)
            .draw()
            .map_err(plot_err)?;

        let series: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        chart
            .draw_series(LineSeries::new(series.iter().copied(), &BLUE))
            .map_err(plot_err)?;
        chart
            .draw_series(series.iter().map(|(x, y)| Circle::new((*x, *y), 3, BLUE.filled())))
            .map_err(plot_err)?;

        root.present().map_err(plot_err)?;
        Ok(())
    }
}

fn plot_err(e: impl std::fmt::Display) -> HarnessError {
    HarnessError::Plot(e.to_string())
}

/// Min/max of `values` widened by `pad` of the span; a flat series gets a
/// unit-wide window so the chart range is never empty.
fn padded_bounds(values: &[f64], pad: f64) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    if span <= f64::EPSILON {
        return (min - 0.5, max + 0.5);
    }
    (min - span * pad, max + span * pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_puts_metric_first() {
        assert_eq!(
            plot_file_name("Average Time to Confirmation", "Mean Transaction Interarrival Time"),
            "Average Time to Confirmation_vs_Mean Transaction Interarrival Time.png"
        );
    }

    #[test]
    fn bounds_pad_and_handle_flat_series() {
        assert_eq!(padded_bounds(&[0.0, 10.0], 0.1), (-1.0, 11.0));
        assert_eq!(padded_bounds(&[3.0, 3.0], 0.1), (2.5, 3.5));
    }

    #[test]
    fn mismatched_series_is_rejected_before_drawing() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("plot.png");
        let err = BitmapPlotRenderer::default()
            .render(&[1.0, 2.0], &[1.0], "x", "y", &dest)
            .unwrap_err();
        assert!(matches!(err, HarnessError::Plot(_)));
        assert!(!dest.exists());
    }
}
