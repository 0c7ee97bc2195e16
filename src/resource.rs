use crate::calendar::CalendarId;
use serde::{Deserialize, Serialize};

/// How far a single allocation walk may extend by default (five years).
/// A horizon longer than this raises the effective limit to match.
pub const DEFAULT_MAX_CALENDAR_RANGE_SECS: i64 = 5 * 366 * 86_400;

fn default_max_calendar_range() -> i64 {
    DEFAULT_MAX_CALENDAR_RANGE_SECS
}

/// A person, crew or piece of equipment whose capacity is consumed by its
/// assignments. The resource's own calendar defines its available capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: i32,
    pub name: String,
    pub calendar: CalendarId,
    #[serde(default = "default_max_calendar_range")]
    pub max_calendar_range_secs: i64,
}

impl Resource {
    pub fn new(id: i32, name: impl Into<String>, calendar: CalendarId) -> Self {
        Self {
            id,
            name: name.into(),
            calendar,
            max_calendar_range_secs: DEFAULT_MAX_CALENDAR_RANGE_SECS,
        }
    }

    pub fn with_max_calendar_range(mut self, secs: i64) -> Self {
        self.max_calendar_range_secs = secs;
        self
    }
}
