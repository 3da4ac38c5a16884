use csv::{ReaderBuilder, StringRecord};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Result, SchedulerError};
use crate::schedule::{Day, ShiftType, Worker};

/// Separates `rank:Shift` entries inside one day cell
pub const PREFERENCE_DELIMITER: char = '|';

/// Checks that columns 1..=7 are headed by the day names in week order
fn validate_headers(headers: &StringRecord) -> Result<()> {
    if headers.len() < Day::ALL.len() + 1 {
        return Err(SchedulerError::MissingColumns(headers.len()));
    }
    for (offset, header) in headers.iter().skip(1).take(Day::ALL.len()).enumerate() {
        let expected = Day::from_index(offset)?;
        if !header.trim().eq_ignore_ascii_case(expected.label()) {
            return Err(SchedulerError::UnexpectedHeader {
                column: offset + 1,
                expected: expected.label().to_string(),
                found: header.trim().to_string(),
            });
        }
    }
    Ok(())
}

/// Parses one day cell such as `2:Evening|1:Morning` into shifts ordered by rank.
/// Equal ranks keep their input order; repeated shifts keep the best-ranked copy.
fn parse_day_cell(cell: &str, row: usize, day: Day) -> Result<Vec<ShiftType>> {
    let mut ranked: Vec<(u32, ShiftType)> = Vec::new();

    for entry in cell.split(PREFERENCE_DELIMITER) {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        let (rank_str, shift_str) =
            entry
                .split_once(':')
                .ok_or_else(|| SchedulerError::MalformedEntry {
                    row,
                    day: day.to_string(),
                    entry: entry.to_string(),
                })?;

        let rank = rank_str
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|rank| *rank > 0)
            .ok_or_else(|| SchedulerError::InvalidRank {
                row,
                day: day.to_string(),
                rank: rank_str.trim().to_string(),
            })?;

        let shift = shift_str
            .parse::<ShiftType>()
            .map_err(|_| SchedulerError::UnknownShift {
                row,
                day: day.to_string(),
                shift: shift_str.trim().to_string(),
            })?;

        ranked.push((rank, shift));
    }

    ranked.sort_by_key(|(rank, _)| *rank);

    let mut shifts = Vec::with_capacity(ranked.len());
    for (_, shift) in ranked {
        if !shifts.contains(&shift) {
            shifts.push(shift);
        }
    }
    Ok(shifts)
}

/// Reads a preference table: identity column, then one column per day
pub fn load_workers_from_reader<R: Read>(input: R) -> Result<Vec<Worker>> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(input);

    let headers = reader.headers()?.clone();
    validate_headers(&headers)?;

    let mut workers = Vec::new();
    let mut seen = HashSet::new();

    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let row = index + 1;

        let identity = record.get(0).unwrap_or("").trim();
        // Rows without a name carry no worker
        if identity.is_empty() {
            debug!(row, "Skipping row without a worker name");
            continue;
        }
        if !seen.insert(identity.to_string()) {
            return Err(SchedulerError::DuplicateWorker(identity.to_string()));
        }

        let mut worker = Worker::new(identity);
        for day in Day::ALL {
            let cell = record.get(day.index() + 1).unwrap_or("");
            let shifts = parse_day_cell(cell, row, day)?;
            if !shifts.is_empty() {
                worker.preferences.insert(day, shifts);
            }
        }
        workers.push(worker);
    }

    Ok(workers)
}

/// Rejects workers whose identity matches a marker label, ignoring case.
/// Such a name would be indistinguishable from the marker in text output.
pub fn reject_reserved_identities(workers: &[Worker], reserved: &[&str]) -> Result<()> {
    for worker in workers {
        if reserved
            .iter()
            .any(|label| label.trim().eq_ignore_ascii_case(&worker.identity))
        {
            return Err(SchedulerError::ReservedName(worker.identity.clone()));
        }
    }
    Ok(())
}

/// Loads workers from a CSV file
pub fn load_workers<P: AsRef<Path>>(csv_path: P) -> Result<Vec<Worker>> {
    let path = csv_path.as_ref();
    let file = std::fs::File::open(path)?;
    let workers = load_workers_from_reader(file)?;
    info!(path = %path.display(), workers = workers.len(), "Loaded preference table");
    Ok(workers)
}
