use crate::core::session::SweepOutcome;
use crate::error::HarnessError;

pub fn print_sweep_summary(outcome: &SweepOutcome) {
    println!("\nSweep Summary: {} vs. {}", outcome.y_label, outcome.x_label);
    println!("----------------------------------------");
    println!("Started: {}", outcome.started_at.format("%Y-%m-%d %H:%M:%S"));
    println!("Elapsed: {:.1}s", outcome.elapsed.as_secs_f64());
    println!("Trials per point: {}", outcome.trials);
    println!("Points: {} plotted, {} skipped", outcome.result.points.len(), outcome.result.gaps.len());
    println!();
    println!("{:>12}  {:>16}", "x", "mean y");
    for (x, y) in &outcome.result.points {
        println!("{:>12}  {:>16.6}", x, y);
    }
    if !outcome.result.gaps.is_empty() {
        println!("\nSkipped points:");
        for gap in &outcome.result.gaps {
            println!("  #{} x={}: {}", gap.index, gap.x, gap.error);
        }
    }
    println!("\nPlot: {}", outcome.plot_path.display());
    if let Some(csv_path) = &outcome.csv_path {
        println!("Series CSV: {}", csv_path.display());
    }
    println!("----------------------------------------");
}

pub fn print_failure(err: &HarnessError) {
    eprintln!("\nSweep failed during {}", err.stage());
    if let Some(params) = err.failed_params() {
        eprintln!("Parameters: {}", params);
    }
    eprintln!("Error: {}", err);
    eprintln!("No plot was written.");
}
