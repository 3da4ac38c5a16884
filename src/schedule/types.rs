use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};

/// Days of the scheduling week, in traversal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn from_index(index: usize) -> Result<Day> {
        Day::ALL
            .get(index)
            .copied()
            .ok_or(SchedulerError::DayOutOfRange(index))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shift types within a day, in traversal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShiftType {
    Morning,
    Afternoon,
    Evening,
}

impl ShiftType {
    pub const ALL: [ShiftType; 3] = [ShiftType::Morning, ShiftType::Afternoon, ShiftType::Evening];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            ShiftType::Morning => "Morning",
            ShiftType::Afternoon => "Afternoon",
            ShiftType::Evening => "Evening",
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ShiftType {
    type Err = ();

    /// Case-insensitive match against the three shift labels
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ShiftType::ALL
            .iter()
            .copied()
            .find(|shift| shift.label().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

/// One (day, shift) pair requiring staffing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub day: Day,
    pub shift: ShiftType,
}

impl SlotKey {
    pub fn new(day: Day, shift: ShiftType) -> Self {
        Self { day, shift }
    }

    /// All 21 slots, day-major then shift-minor
    pub fn all() -> impl Iterator<Item = SlotKey> {
        Day::ALL
            .into_iter()
            .flat_map(|day| ShiftType::ALL.into_iter().map(move |shift| SlotKey::new(day, shift)))
    }

    /// Position of this slot in traversal order
    pub fn ordinal(self) -> usize {
        self.day.index() * ShiftType::ALL.len() + self.shift.index()
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.day, self.shift)
    }
}

/// What occupies one position in a slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum SlotEntry {
    Worker(String),
    Supervisor,
    Unfilled,
}

/// The entries recorded for one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignment {
    pub key: SlotKey,
    pub entries: Vec<SlotEntry>,
}

/// Assignments for the whole week, one `SlotAssignment` per slot in traversal order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleState {
    pub slots: Vec<SlotAssignment>,
}

impl ScheduleState {
    pub fn new() -> Self {
        Self {
            slots: SlotKey::all()
                .map(|key| SlotAssignment {
                    key,
                    entries: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn entries(&self, key: SlotKey) -> &[SlotEntry] {
        &self.slots[key.ordinal()].entries
    }

    pub(crate) fn push(&mut self, key: SlotKey, entry: SlotEntry) {
        self.slots[key.ordinal()].entries.push(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotKey, &[SlotEntry])> {
        self.slots.iter().map(|slot| (slot.key, slot.entries.as_slice()))
    }

    /// Slots whose every entry is the supervisor. A slot that also holds the
    /// unfilled marker is reported as unfilled only.
    pub fn supervisor_only_slots(&self) -> Vec<SlotKey> {
        self.iter()
            .filter(|(_, entries)| {
                !entries.is_empty() && entries.iter().all(|e| *e == SlotEntry::Supervisor)
            })
            .map(|(key, _)| key)
            .collect()
    }

    /// Slots where the unfilled marker was recorded
    pub fn unfilled_slots(&self) -> Vec<SlotKey> {
        self.iter()
            .filter(|(_, entries)| entries.contains(&SlotEntry::Unfilled))
            .map(|(key, _)| key)
            .collect()
    }

    /// Days on which `identity` was scheduled, in week order
    pub fn days_for_worker(&self, identity: &str) -> Vec<Day> {
        let mut days: Vec<Day> = self
            .iter()
            .filter(|(_, entries)| {
                entries
                    .iter()
                    .any(|e| matches!(e, SlotEntry::Worker(name) if name == identity))
            })
            .map(|(key, _)| key.day)
            .collect();
        days.dedup();
        days
    }
}

impl Default for ScheduleState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_traversal_is_day_major() {
        let keys: Vec<SlotKey> = SlotKey::all().collect();
        assert_eq!(keys.len(), 21);
        assert_eq!(keys[0], SlotKey::new(Day::Monday, ShiftType::Morning));
        assert_eq!(keys[1], SlotKey::new(Day::Monday, ShiftType::Afternoon));
        assert_eq!(keys[3], SlotKey::new(Day::Tuesday, ShiftType::Morning));
        assert_eq!(keys[20], SlotKey::new(Day::Sunday, ShiftType::Evening));
        for (i, key) in keys.iter().enumerate() {
            assert_eq!(key.ordinal(), i);
        }
    }

    #[test]
    fn test_day_from_index_rejects_out_of_range() {
        assert_eq!(Day::from_index(6).unwrap(), Day::Sunday);
        assert!(matches!(
            Day::from_index(7),
            Err(SchedulerError::DayOutOfRange(7))
        ));
    }

    #[test]
    fn test_shift_parse_is_case_insensitive() {
        assert_eq!("morning".parse::<ShiftType>(), Ok(ShiftType::Morning));
        assert_eq!(" EVENING ".parse::<ShiftType>(), Ok(ShiftType::Evening));
        assert!("Night".parse::<ShiftType>().is_err());
    }

    #[test]
    fn test_projection_distinguishes_markers() {
        let mut state = ScheduleState::new();
        let mon_am = SlotKey::new(Day::Monday, ShiftType::Morning);
        let mon_pm = SlotKey::new(Day::Monday, ShiftType::Afternoon);
        let tue_am = SlotKey::new(Day::Tuesday, ShiftType::Morning);
        let tue_pm = SlotKey::new(Day::Tuesday, ShiftType::Afternoon);
        let wed_am = SlotKey::new(Day::Wednesday, ShiftType::Morning);
        let wed_pm = SlotKey::new(Day::Wednesday, ShiftType::Afternoon);

        state.push(mon_am, SlotEntry::Supervisor);
        state.push(mon_pm, SlotEntry::Worker("ann".into()));
        state.push(mon_pm, SlotEntry::Supervisor);
        state.push(tue_am, SlotEntry::Unfilled);
        state.push(tue_pm, SlotEntry::Worker("Supervisor".into()));
        state.push(tue_pm, SlotEntry::Unfilled);
        state.push(wed_am, SlotEntry::Supervisor);
        state.push(wed_am, SlotEntry::Supervisor);
        state.push(wed_pm, SlotEntry::Supervisor);
        state.push(wed_pm, SlotEntry::Unfilled);

        assert_eq!(state.supervisor_only_slots(), vec![mon_am, wed_am]);
        assert_eq!(state.unfilled_slots(), vec![tue_am, tue_pm, wed_pm]);
        assert_eq!(state.days_for_worker("ann"), vec![Day::Monday]);
    }
}
