// Result extraction - turns one simulator report into a RunResult
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// Metrics reported by one simulator invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub num_blocks: i64,
    pub num_transactions: i64,
    pub avg_time_to_confirmation: f64,
    pub avg_fee: f64,
    pub percent_confirmed: f64,
}

/// Position of a value in the report: zero-based line, then zero-based
/// whitespace-separated token on that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinate {
    pub line: usize,
    pub token: usize,
}

impl Coordinate {
    pub const fn new(line: usize, token: usize) -> Self {
        Self { line, token }
    }
}

/// Where each field lives in the simulator's report. Any change to the
/// report layout is a breaking change for the harness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLayout {
    pub num_blocks: Coordinate,
    pub num_transactions: Coordinate,
    pub avg_time_to_confirmation: Coordinate,
    pub avg_fee: Coordinate,
    /// Defaults to the block-count position, which is what the original
    /// grapher read. Override it once the simulator prints a real
    /// percent-confirmed line.
    pub percent_confirmed: Coordinate,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            num_blocks: Coordinate::new(4, 3),
            num_transactions: Coordinate::new(5, 3),
            avg_time_to_confirmation: Coordinate::new(6, 2),
            avg_fee: Coordinate::new(7, 3),
            percent_confirmed: Coordinate::new(4, 3),
        }
    }
}

impl ReportLayout {
    pub fn percent_confirmed_aliases_block_count(&self) -> bool {
        self.percent_confirmed == self.num_blocks
    }
}

pub fn parse_report(text: &str, layout: &ReportLayout) -> Result<RunResult, HarnessError> {
    let lines: Vec<&str> = text.lines().collect();

    Ok(RunResult {
        num_blocks: field(&lines, "num_blocks", layout.num_blocks)?,
        num_transactions: field(&lines, "num_transactions", layout.num_transactions)?,
        avg_time_to_confirmation: field(
            &lines,
            "avg_time_to_confirmation",
            layout.avg_time_to_confirmation,
        )?,
        avg_fee: field(&lines, "avg_fee", layout.avg_fee)?,
        percent_confirmed: field(&lines, "percent_confirmed", layout.percent_confirmed)?,
    })
}

fn field<T: FromStr>(lines: &[&str], name: &'static str, at: Coordinate) -> Result<T, HarnessError> {
    let malformed = || HarnessError::MalformedOutput {
        field: name,
        line: at.line,
        token: at.token,
    };

    lines
        .get(at.line)
        .and_then(|line| line.split_whitespace().nth(at.token))
        .ok_or_else(malformed)?
        .parse()
        .map_err(|_| malformed())
}
