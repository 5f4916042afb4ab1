//! Last-day-of-month gate for the monthly run.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use mockable::Clock;

/// Number of days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = match date.month() {
        12 => (date.year() + 1, 1),
        month => (date.year(), month + 1),
    };
    // Only December of the last representable year lacks a successor month.
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map_or(31, |last| last.day())
}

/// Days remaining after `date` until the end of its month.
pub fn days_left_in_month(date: NaiveDate) -> u32 {
    days_in_month(date) - date.day()
}

/// Whether `date` is the final calendar day of its month.
///
/// # Examples
///
/// ```
/// use bonus_lottery::domain::is_last_day_of_month;
/// use chrono::NaiveDate;
///
/// let leap_day = NaiveDate::from_ymd_opt(2024, 2, 29).expect("valid date");
/// assert!(is_last_day_of_month(leap_day));
/// ```
pub fn is_last_day_of_month(date: NaiveDate) -> bool {
    days_left_in_month(date) == 0
}

/// Outcome of evaluating the gate for today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDecision {
    /// Local calendar date the gate looked at.
    pub today: NaiveDate,
    /// Days left in the month after today.
    pub days_left: u32,
}

impl GateDecision {
    /// Whether the run may proceed.
    pub fn is_open(&self) -> bool {
        self.days_left == 0
    }
}

/// Reads today's local date from a clock and decides whether to run.
#[derive(Clone)]
pub struct RunGate {
    clock: Arc<dyn Clock>,
}

impl RunGate {
    /// Create a gate backed by `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Evaluate the gate against the clock's local date.
    pub fn evaluate(&self) -> GateDecision {
        let today = self.clock.local().date_naive();
        GateDecision {
            today,
            days_left: days_left_in_month(today),
        }
    }
}
