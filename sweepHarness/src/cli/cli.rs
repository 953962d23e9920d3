use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;

use crate::config::sweep_config::DEFAULT_SIMULATOR;

#[derive(Parser)]
#[command(author, version, about = "Sweep one simulator input and plot an averaged metric", long_about = None)]
pub struct Args {
    #[arg(help = "Independent variable: 0=connectivity, 1=tx-interarrival, 2=link-speed")]
    axis: usize,

    #[arg(help = "Dependent variable: 0=time-to-confirmation, 1=avg-fee, 2=percent-confirmed")]
    metric: usize,

    #[arg(help = "Simulator runs averaged per sweep point", value_parser = clap::value_parser!(u32).range(1..))]
    trials: u32,

    #[arg(short, long, default_value = DEFAULT_SIMULATOR)]
    simulator: PathBuf,

    #[arg(long = "simulator-arg", allow_hyphen_values = true, help = "Argument placed before the four sweep parameters (repeatable)")]
    simulator_args: Vec<String>,

    #[arg(short, long, help = "JSON file with axis ranges, baselines and report layout")]
    config: Option<PathBuf>,

    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    #[arg(long, help = "Kill a simulator run (and its process group) after this many seconds")]
    timeout_secs: Option<u64>,

    #[arg(short, long, default_value_t = 0, help = "Extra attempts for a failed trial")]
    retries: usize,

    #[arg(long, default_value_t = false, help = "Record failed points as gaps instead of aborting")]
    skip_failed_points: bool,

    #[arg(long, default_value_t = false, help = "Also write the series as CSV next to the plot")]
    csv: bool,

    #[arg(long, default_value_t = false, help = "Print the effective sweep config as JSON and exit")]
    dump_config: bool,

    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    #[arg(long, default_value_t = false)]
    debug_logging: bool,

    #[arg(long, default_value_t = false)]
    enable_timing: bool,
}

// Add getter methods for all fields
impl Args {
    pub fn axis(&self) -> usize {
        self.axis
    }

    pub fn metric(&self) -> usize {
        self.metric
    }

    pub fn trials(&self) -> usize {
        self.trials as usize
    }

    pub fn simulator(&self) -> &Path {
        &self.simulator
    }

    pub fn simulator_args(&self) -> &[String] {
        &self.simulator_args
    }

    pub fn config(&self) -> Option<&Path> {
        self.config.as_deref()
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn retries(&self) -> usize {
        self.retries
    }

    pub fn skip_failed_points(&self) -> bool {
        self.skip_failed_points
    }

    pub fn csv(&self) -> bool {
        self.csv
    }

    pub fn dump_config(&self) -> bool {
        self.dump_config
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_selectors_and_defaults() {
        let args = Args::try_parse_from(["blocksweep", "1", "0", "5"]).unwrap();
        assert_eq!(args.axis(), 1);
        assert_eq!(args.metric(), 0);
        assert_eq!(args.trials(), 5);
        assert_eq!(args.simulator(), Path::new("./blockchain-sim"));
        assert_eq!(args.timeout(), None);
        assert!(!args.skip_failed_points());
    }

    #[test]
    fn zero_trials_is_rejected_by_the_parser() {
        assert!(Args::try_parse_from(["blocksweep", "1", "0", "0"]).is_err());
    }

    #[test]
    fn hardening_options_parse() {
        let args = Args::try_parse_from([
            "blocksweep",
            "2",
            "1",
            "3",
            "--simulator",
            "/bin/sh",
            "--simulator-arg",
            "-c",
            "--simulator-arg",
            "echo",
            "--timeout-secs",
            "30",
            "--retries",
            "2",
            "--skip-failed-points",
        ])
        .unwrap();
        assert_eq!(args.simulator_args(), ["-c", "echo"]);
        assert_eq!(args.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(args.retries(), 2);
        assert!(args.skip_failed_points());
    }
}
