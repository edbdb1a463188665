use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Opening hours for one weekday.
///
/// When `is_closed` is false the bakery trades from `open_time` until
/// `close_time`; a rule whose close does not come after its open offers no
/// slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHoursRule {
    pub weekday: Weekday,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
    pub is_closed: bool,
}

impl OpeningHoursRule {
    pub fn open(weekday: Weekday, open_time: NaiveTime, close_time: NaiveTime) -> Self {
        Self {
            weekday,
            open_time,
            close_time,
            is_closed: false,
        }
    }

    pub fn closed(weekday: Weekday) -> Self {
        Self {
            weekday,
            open_time: NaiveTime::default(),
            close_time: NaiveTime::default(),
            is_closed: true,
        }
    }

    /// True when the rule describes a day with a usable trading window.
    pub fn is_trading(&self) -> bool {
        !self.is_closed && self.open_time < self.close_time
    }
}
