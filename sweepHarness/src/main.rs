use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};

use blocksweep::cli::cli::Args;
use blocksweep::config::sweep_config::SweepConfig;
use blocksweep::core::averager::TrialOptions;
use blocksweep::core::executor::ExecutorOptions;
use blocksweep::core::progress::{NoProgress, SweepObserver};
use blocksweep::core::runner::ProcessSimulator;
use blocksweep::core::session::{run_sweep, SweepRequest};
use blocksweep::output::plot::BitmapPlotRenderer;
use blocksweep::output::reporting;
use blocksweep::utils::logging::{self, FileIOType, OperationCategory};
use blocksweep::utils::progress_bars::TerminalProgress;
use blocksweep::{MetricSelector, SweepAxis};

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    logging::init_logging(args.enable_timing(), args.debug_logging())?;

    let config = load_config(&args)?;
    if args.dump_config() {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let axis = SweepAxis::from_index(args.axis())?;
    let metric = MetricSelector::from_index(args.metric())?;

    if metric == MetricSelector::PercentConfirmed && config.report_layout.percent_confirmed_aliases_block_count() {
        warn!("percent_confirmed is read from the block-count position; set report_layout.percent_confirmed in a config file to change it");
    }

    let simulator = ProcessSimulator::new(args.simulator())
        .with_leading_args(args.simulator_args().to_vec())
        .with_timeout(args.timeout());

    let request = SweepRequest {
        axis,
        metric,
        executor: ExecutorOptions {
            trial: TrialOptions {
                trials: args.trials(),
                max_retries: args.retries(),
            },
            skip_failed_points: args.skip_failed_points(),
        },
        output_dir: args.output_dir().to_path_buf(),
        export_csv: args.csv(),
    };

    let observer: Box<dyn SweepObserver> = if args.quiet() {
        Box::new(NoProgress)
    } else {
        Box::new(TerminalProgress::new())
    };

    info!(simulator = %args.simulator().display(), "blockchain simulator sweep");

    let outcome = match run_sweep(&config, &request, &simulator, &BitmapPlotRenderer::default(), observer.as_ref()) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(stage = e.stage(), error = %e, "sweep aborted");
            reporting::print_failure(&e);
            return Err(e.into());
        }
    };

    reporting::print_sweep_summary(&outcome);
    logging::print_timing_report();

    Ok(())
}

fn load_config(args: &Args) -> anyhow::Result<SweepConfig> {
    let Some(path) = args.config() else {
        return Ok(SweepConfig::default());
    };

    let _timing = logging::start_timing(
        "load_config",
        OperationCategory::FileIO { subcategory: FileIOType::ConfigLoad },
    );
    SweepConfig::from_json_file(path)
        .with_context(|| format!("failed to load sweep config from {}", path.display()))
}
