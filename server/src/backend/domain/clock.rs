use chrono::{Local, NaiveDate};

/// Source of "today" for passcode windows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    /// Local calendar date of the machine running the server
    #[default]
    System,
    /// Always the same date (tests, demos)
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}
