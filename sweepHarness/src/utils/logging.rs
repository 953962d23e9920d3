use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::Level;
use tracing_subscriber::{prelude::*, EnvFilter};
use tracing_timing::Histogram;

// Upper bound of one recorded duration: ten minutes, in nanoseconds
const MAX_RECORDED_NS: u64 = 600_000_000_000;

// Define categories for different types of operations
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum OperationCategory {
    Sweep,
    SweepPoint,
    SimulatorProcess,
    FileIO { subcategory: FileIOType },
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum FileIOType {
    ConfigLoad,
    PlotSave,
    CsvSave,
}

impl OperationCategory {
    pub fn as_str(&self) -> String {
        match self {
            OperationCategory::Sweep => "Sweep".to_string(),
            OperationCategory::SweepPoint => "Sweep Point".to_string(),
            OperationCategory::SimulatorProcess => "Simulator Process".to_string(),
            OperationCategory::FileIO { subcategory } => {
                format!("File I/O - {}", match subcategory {
                    FileIOType::ConfigLoad => "Config Load",
                    FileIOType::PlotSave => "Plot Save",
                    FileIOType::CsvSave => "CSV Save",
                })
            }
        }
    }
}

lazy_static! {
    static ref TIMING_ENABLED: AtomicBool = AtomicBool::new(false);
    static ref FUNCTION_TIMINGS: RwLock<HashMap<String, (Duration, usize)>> = RwLock::new(HashMap::new());
    static ref CATEGORY_TIMINGS: RwLock<HashMap<OperationCategory, Histogram<u64>>> = RwLock::new(HashMap::new());
}

pub struct TimingGuard {
    function_name: &'static str,
    category: OperationCategory,
    start: Instant,
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        record_timing(self.function_name, self.start.elapsed(), &self.category);
    }
}

pub fn start_timing(function_name: &'static str, category: OperationCategory) -> TimingGuard {
    TimingGuard {
        function_name,
        category,
        start: Instant::now(),
    }
}

fn record_timing(function_name: &str, duration: Duration, category: &OperationCategory) {
    if !is_timing_enabled() {
        return;
    }

    {
        let mut timings = FUNCTION_TIMINGS.write();
        let entry = timings
            .entry(function_name.to_string())
            .or_insert((Duration::ZERO, 0));
        entry.0 += duration;
        entry.1 += 1;
    }

    let mut category_timings = CATEGORY_TIMINGS.write();
    if !category_timings.contains_key(category) {
        match Histogram::<u64>::new_with_bounds(1, MAX_RECORDED_NS, 3) {
            Ok(histogram) => {
                category_timings.insert(category.clone(), histogram);
            }
            Err(_) => return,
        }
    }
    if let Some(histogram) = category_timings.get_mut(category) {
        let duration_ns = (duration.as_nanos() as u64).clamp(1, MAX_RECORDED_NS);
        let _ = histogram.record(duration_ns);
    }
}

pub fn init_logging(enable_timing: bool, debug_logging: bool) -> anyhow::Result<()> {
    TIMING_ENABLED.store(enable_timing, Ordering::SeqCst);

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = build_filter(debug_logging, rust_log.as_deref())?;

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).compact());

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// `RUST_LOG` when set, `info` otherwise; `--debug-logging` raises this
/// crate to `debug` on top of either.
fn build_filter(debug_logging: bool, rust_log: Option<&str>) -> anyhow::Result<EnvFilter> {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .parse_lossy(rust_log.unwrap_or_default());
    Ok(if debug_logging {
        filter.add_directive("blocksweep=debug".parse()?)
    } else {
        filter
    })
}

pub fn is_timing_enabled() -> bool {
    TIMING_ENABLED.load(Ordering::SeqCst)
}

pub fn print_timing_report() {
    if !is_timing_enabled() {
        return;
    }

    println!("\nTiming Report");
    println!("==========================");

    println!("\nBy Function:");
    println!("---------------------------");
    let timings = FUNCTION_TIMINGS.read();
    let mut entries: Vec<_> = timings.iter().collect();
    entries.sort_by(|a, b| b.1 .0.cmp(&a.1 .0));

    for (function_name, (total, count)) in entries {
        let avg = total.div_f64(*count as f64);
        println!(
            "{}: total={:.2}s, count={}, avg={:.2}ms",
            function_name,
            total.as_secs_f64(),
            count,
            avg.as_secs_f64() * 1000.0,
        );
    }

    println!("\nBy Category:");
    println!("------------------------");
    let category_timings = CATEGORY_TIMINGS.read();
    let mut categories: Vec<_> = category_timings.iter().collect();
    categories.sort_by(|a, b| b.1.mean().partial_cmp(&a.1.mean()).unwrap_or(std::cmp::Ordering::Equal));

    for (category, histogram) in categories {
        println!(
            "{}: mean={:.2}ms, p95={:.2}ms, p99={:.2}ms, count={}",
            category.as_str(),
            histogram.mean() / 1_000_000.0,
            histogram.value_at_quantile(0.95) as f64 / 1_000_000.0,
            histogram.value_at_quantile(0.99) as f64 / 1_000_000.0,
            histogram.len(),
        );
    }

    println!("==========================\n");
}
