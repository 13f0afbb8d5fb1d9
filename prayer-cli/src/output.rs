use std::fmt::Write;

use prayer_core::{MonthlyEntry, PrayerTimings};

/// One line per prayer, names padded to a column.
pub fn render_daily(heading: &str, timings: &PrayerTimings) -> String {
    let mut out = format!("{heading}\n");
    for (name, time) in timings.iter() {
        let _ = writeln!(out, "  {name:<8} {}", display_time(time));
    }
    out
}

/// A table with one row per day.
pub fn render_monthly(heading: &str, entries: &[MonthlyEntry]) -> String {
    let mut out = format!("{heading}\n");

    let _ = write!(out, "  {:<12}", "Date");
    for (name, _) in PrayerTimings::default().iter() {
        let _ = write!(out, " {name:<8}");
    }
    out.push('\n');

    for entry in entries {
        let _ = write!(out, "  {:<12}", entry.date);
        for (_, time) in entry.timings.iter() {
            let _ = write!(out, " {:<8}", display_time(time));
        }
        out.push('\n');
    }
    out
}

fn display_time(time: &str) -> &str {
    if time.is_empty() { "-" } else { time }
}
