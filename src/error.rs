use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Preference table needs a name column and 7 day columns, found {0} columns")]
    MissingColumns(usize),

    #[error("Column {column} should be headed '{expected}', found '{found}'")]
    UnexpectedHeader {
        column: usize,
        expected: String,
        found: String,
    },

    #[error("Row {row}, {day}: entry '{entry}' is not of the form rank:Shift")]
    MalformedEntry { row: usize, day: String, entry: String },

    #[error("Row {row}, {day}: '{rank}' is not a positive rank")]
    InvalidRank { row: usize, day: String, rank: String },

    #[error("Row {row}, {day}: unknown shift '{shift}'")]
    UnknownShift { row: usize, day: String, shift: String },

    #[error("Worker '{0}' appears more than once")]
    DuplicateWorker(String),

    #[error("Worker name '{0}' is reserved for schedule markers")]
    ReservedName(String),

    #[error("Day index {0} is outside the week")]
    DayOutOfRange(usize),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for SchedulerError {
    fn from(err: toml::de::Error) -> Self {
        SchedulerError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
