//! Recurring schedule for subscription orders.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use super::ValidationError;

/// Strict `YYYY-MM-DD`; anything else is rejected.
const START_TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Period of a recurring order.
///
/// The gateway's documentation also mentions `year`, but its validator only
/// accepts these three tokens; this SDK follows the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringPeriod {
    Day,
    Week,
    Month,
}

impl RecurringPeriod {
    pub fn code(self) -> &'static str {
        match self {
            RecurringPeriod::Day => "day",
            RecurringPeriod::Week => "week",
            RecurringPeriod::Month => "month",
        }
    }
}

impl fmt::Display for RecurringPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for RecurringPeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(RecurringPeriod::Day),
            "week" => Ok(RecurringPeriod::Week),
            "month" => Ok(RecurringPeriod::Month),
            _ => Err(ValidationError::RecurringPeriod(s.to_owned())),
        }
    }
}

/// Billing schedule attached to a subscription order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringSchedule {
    /// First billing date, strict `YYYY-MM-DD`.
    pub start_time: String,
    /// Amount of each recurring charge, in minor units.
    pub amount: i64,
    /// Charge every `every` periods.
    pub every: u32,
    /// Period unit.
    pub period: RecurringPeriod,
    /// Whether the customer may change the schedule on the hosted page.
    pub readonly: bool,
    /// Whether the subscription starts enabled.
    pub state: bool,
}

impl RecurringSchedule {
    /// Check the schedule against the gateway's rules.
    ///
    /// `period` is already closed by the type; only the date format needs a
    /// runtime check.
    pub fn validate(&self) -> Result<(), ValidationError> {
        time::Date::parse(&self.start_time, START_TIME_FORMAT)
            .map_err(|_| ValidationError::RecurringStartTime(self.start_time.clone()))?;
        Ok(())
    }

    /// Wire value of the `recurring_data` parameter: the schedule as one
    /// canonical JSON string, flags as `"y"`/`"n"`.
    ///
    /// Built through `serde_json::Value`, whose object keys are ordered, so
    /// identical schedules always encode identically.
    pub fn wire_value(&self) -> String {
        serde_json::json!({
            "start_time": self.start_time,
            "amount": self.amount,
            "every": self.every,
            "period": self.period.code(),
            "readonly": if self.readonly { "y" } else { "n" },
            "state": if self.state { "y" } else { "n" },
        })
        .to_string()
    }
}
