use serde::Serialize;
use std::fmt::{Display, Formatter};

const MILLIS_PER_SECOND: u64 = 1_000;
const MILLIS_PER_MINUTE: u64 = 60_000;
const MILLIS_PER_HOUR: u64 = 3_600_000;

/// A duration split into zero-padded clock fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedTime {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    pub milliseconds: String,
}

impl FormattedTime {
    /// `MM:SS.mmm`, used for splits and statistics.
    pub fn split(&self) -> String {
        format!("{}:{}.{}", self.minutes, self.seconds, self.milliseconds)
    }

    /// `MM:SS`, used for lap totals.
    pub fn short(&self) -> String {
        format!("{}:{}", self.minutes, self.seconds)
    }

    /// `HH:MM:SS`, used for saved session totals.
    pub fn clock(&self) -> String {
        format!("{}:{}:{}", self.hours, self.minutes, self.seconds)
    }
}

impl Display for FormattedTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}.{}",
            self.hours, self.minutes, self.seconds, self.milliseconds
        )
    }
}

pub fn format_time(ms: u64) -> FormattedTime {
    FormattedTime {
        hours: format!("{:02}", ms / MILLIS_PER_HOUR),
        minutes: format!("{:02}", (ms % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE),
        seconds: format!("{:02}", (ms % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND),
        milliseconds: format!("{:03}", ms % MILLIS_PER_SECOND),
    }
}

/// Formats a fractional duration such as an average split, flooring to whole milliseconds.
///
/// Panics on negative or non-finite input.
pub fn format_fractional(ms: f64) -> FormattedTime {
    assert!(
        ms.is_finite() && ms >= 0.0,
        "duration must be a non-negative number of milliseconds, got {ms}"
    );

    format_time(ms.floor() as u64)
}
