//! Domain primitives and services for the monthly bonus lottery.
//!
//! Purpose: keep the run logic independent of transport. The rewards API is
//! reached only through the [`ports::RewardsApi`] trait; prize allocation is
//! delegated to the pure `prize-allocation` crate.
//!
//! Public surface:
//! - Colleague, ColleagueId, eligible_pool: roster snapshot and eligibility.
//! - PreferredUsernames: configured usernames singled out by the policy.
//! - RunGate, GateDecision: last-day-of-month gate.
//! - award_reason, ordinal_suffix: award message formatting.
//! - MonthlyLotteryService: the one-pass run.
//! - LotteryError: failures that abort a run.

pub mod award;
pub mod colleague;
pub mod error;
pub mod lottery_service;
pub mod ports;
pub mod preferred;
pub mod run_gate;

pub use self::award::{DEFAULT_LOTTERY_NAME, award_reason, ordinal_suffix};
pub use self::colleague::{Colleague, ColleagueId, NORMAL_USER_MODE, eligible_pool};
pub use self::error::LotteryError;
pub use self::lottery_service::{
    AwardRecord, LotteryRules, MonthlyLotteryService, RunOutcome, RunReport,
};
pub use self::preferred::PreferredUsernames;
pub use self::run_gate::{
    GateDecision, RunGate, days_in_month, days_left_in_month, is_last_day_of_month,
};
