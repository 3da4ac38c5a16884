use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::schedule::{Day, ScheduleReport, ShiftType, SlotEntry, SlotKey};

/// Label used for the unfilled marker in text output
pub const UNFILLED_LABEL: &str = "Unassigned";

/// Formats one slot entry for display
pub fn format_entry(entry: &SlotEntry, supervisor_label: &str) -> String {
    match entry {
        SlotEntry::Worker(name) => name.clone(),
        SlotEntry::Supervisor => supervisor_label.to_string(),
        SlotEntry::Unfilled => UNFILLED_LABEL.to_string(),
    }
}

/// Writes the week day by day, followed by the error summary when any slot
/// is short-staffed
pub fn render_schedule<W: Write>(
    out: &mut W,
    report: &ScheduleReport,
    supervisor_label: &str,
) -> io::Result<()> {
    for day in Day::ALL {
        writeln!(out, "{}:", day)?;
        for shift in ShiftType::ALL {
            let names: Vec<String> = report
                .schedule
                .entries(SlotKey::new(day, shift))
                .iter()
                .map(|entry| format_entry(entry, supervisor_label))
                .collect();
            writeln!(out, "  {}: {}", shift, names.join(", "))?;
        }
        writeln!(out)?;
    }

    if !report.has_warnings() {
        return Ok(());
    }

    writeln!(out, "ERROR SUMMARY")?;

    if !report.supervisor_only.is_empty() {
        writeln!(out)?;
        writeln!(out, "Only {} available (requires more staff):", supervisor_label)?;
        for key in &report.supervisor_only {
            writeln!(out, "• {}", key)?;
        }
    }

    if !report.unfilled.is_empty() {
        writeln!(out)?;
        writeln!(out, "Unassigned Shifts (even {} unavailable):", supervisor_label)?;
        for key in &report.unfilled {
            writeln!(out, "• {}", key)?;
        }
    }

    Ok(())
}

/// Renders the schedule to a string
pub fn schedule_to_string(report: &ScheduleReport, supervisor_label: &str) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail
    let _ = render_schedule(&mut buffer, report, supervisor_label);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Prints the schedule to stdout
pub fn print_schedule(report: &ScheduleReport, supervisor_label: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    render_schedule(&mut handle, report, supervisor_label)?;
    Ok(())
}

/// Writes the text schedule to `filename`
pub fn write_schedule_to_file<P: AsRef<Path>>(
    report: &ScheduleReport,
    supervisor_label: &str,
    filename: P,
) -> Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);
    render_schedule(&mut file, report, supervisor_label)?;
    file.flush()?;
    Ok(())
}

/// Writes the report as pretty-printed JSON
pub fn write_report_json<P: AsRef<Path>>(report: &ScheduleReport, filename: P) -> Result<()> {
    let file = BufWriter::new(File::create(filename)?);
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}
