use std::path::Path;

use serde::Serialize;

use crate::core::executor::SweepResult;
use crate::error::HarnessError;
use crate::utils::logging::{self, FileIOType, OperationCategory};

#[derive(Serialize)]
struct SeriesRow<'a> {
    x_label: &'a str,
    x: f64,
    y_label: &'a str,
    y: Option<f64>,
    error: Option<&'a str>,
}

/// Write the averaged series, gaps included, ordered by planning index.
pub fn export_series(
    path: &Path,
    result: &SweepResult,
    x_label: &str,
    y_label: &str,
) -> Result<(), HarnessError> {
    let _timing = logging::start_timing(
        "export_series",
        OperationCategory::FileIO { subcategory: FileIOType::CsvSave },
    );

    let mut rows: Vec<(usize, SeriesRow)> = Vec::with_capacity(result.points.len() + result.gaps.len());

    // Points are stored without their index; rebuild it by skipping gap slots.
    let gap_indices: Vec<usize> = result.gaps.iter().map(|g| g.index).collect();
    let mut index = 0;
    for (x, y) in &result.points {
        while gap_indices.contains(&index) {
            index += 1;
        }
        rows.push((index, SeriesRow { x_label, x: *x, y_label, y: Some(*y), error: None }));
        index += 1;
    }
    for gap in &result.gaps {
        rows.push((gap.index, SeriesRow { x_label, x: gap.x, y_label, y: None, error: Some(gap.error.as_str()) }));
    }
    rows.sort_by_key(|(index, _)| *index);

    let mut writer = csv::Writer::from_path(path)?;
    for (_, row) in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::executor::SweepGap;

    #[test]
    fn rows_keep_sweep_order_with_gaps_in_place() {
        let result = SweepResult {
            points: vec![(5.0, 1.5), (15.0, 2.5)],
            gaps: vec![SweepGap { index: 1, x: 10.0, error: "exit 1".to_string() }],
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");

        export_series(&path, &result, "Mean Link Speed", "Average Fee").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "x_label,x,y_label,y,error");
        assert_eq!(lines[1], "Mean Link Speed,5.0,Average Fee,1.5,");
        assert_eq!(lines[2], "Mean Link Speed,10.0,Average Fee,,exit 1");
        assert_eq!(lines[3], "Mean Link Speed,15.0,Average Fee,2.5,");
    }
}
