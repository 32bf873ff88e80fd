use chrono::NaiveDate;
use std::path::Path;

use crate::model::SelectionSet;

/// Export one day's selections to a semicolon-delimited CSV file.
///
/// Columns: Date ; Start ; End ; Duration (min)
/// Times are formatted as HH:MM, the date as YYYY-MM-DD.
/// Returns the number of selections written.
pub fn export_csv(day: NaiveDate, selections: &SelectionSet, path: &Path) -> Result<usize, String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)
        .map_err(|e| format!("Failed to create CSV file: {}", e))?;

    wtr.write_record(["Date", "Start", "End", "Duration (min)"])
        .map_err(|e| format!("Failed to write header: {}", e))?;

    for sel in selections.iter() {
        wtr.write_record([
            day.format("%Y-%m-%d").to_string(),
            sel.start.format("%H:%M").to_string(),
            sel.end.format("%H:%M").to_string(),
            sel.duration().num_minutes().to_string(),
        ])
        .map_err(|e| format!("Failed to write selection at {}: {}", sel.start.time(), e))?;
    }

    wtr.flush().map_err(|e| format!("Failed to flush CSV: {}", e))?;
    Ok(selections.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Selection;

    #[test]
    fn writes_one_row_per_selection() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let set = SelectionSet::new(vec![
            Selection::new(
                day.and_hms_opt(9, 0, 0).unwrap(),
                day.and_hms_opt(10, 30, 0).unwrap(),
            ),
            Selection::new(
                day.and_hms_opt(13, 0, 0).unwrap(),
                day.and_hms_opt(13, 30, 0).unwrap(),
            ),
        ]);

        let path = std::env::temp_dir().join("day_planner_export_test.csv");
        std::fs::remove_file(&path).ok();

        let written = export_csv(day, &set, &path).expect("export should succeed");
        assert_eq!(written, 2);

        let contents = std::fs::read_to_string(&path).expect("file should exist");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "Date;Start;End;Duration (min)");
        assert_eq!(lines[1], "2024-03-11;09:00;10:30;90");
        assert_eq!(lines[2], "2024-03-11;13:00;13:30;30");

        std::fs::remove_file(&path).ok();
    }
}
