pub mod day_canvas;
pub mod dialogs;
pub mod selection_table;
pub mod theme;
pub mod theme_def;
pub mod theme_manager;
pub mod toolbar;

/// Format a duration as "1 h 30 min" / "45 min".
pub fn format_duration(d: chrono::Duration) -> String {
    let minutes = d.num_minutes();
    let (hours, rest) = (minutes / 60, minutes % 60);
    match (hours, rest) {
        (0, m) => format!("{} min", m),
        (h, 0) => format!("{} h", h),
        (h, m) => format!("{} h {:02} min", h, m),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    #[test]
    fn durations_format_compactly() {
        assert_eq!(super::format_duration(Duration::minutes(45)), "45 min");
        assert_eq!(super::format_duration(Duration::minutes(120)), "2 h");
        assert_eq!(super::format_duration(Duration::minutes(95)), "1 h 35 min");
    }
}
