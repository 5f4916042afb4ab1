//! Monthly lottery orchestration.
//!
//! One pass: check the run gate, fetch the caller and roster, allocate the
//! giving balance, then post one bonus per winner in place order. Any port
//! failure aborts the remaining work.

use std::sync::Arc;

use mockable::Clock;
use prize_allocation::{AllocationEntry, AllocationPolicy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::domain::ports::{BonusRequest, RewardsApi};
use crate::domain::{
    Colleague, DEFAULT_LOTTERY_NAME, LotteryError, PreferredUsernames, RunGate, award_reason,
    eligible_pool,
};

/// Rules applied to every run, resolved from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotteryRules {
    /// Ordering and prize policy.
    pub policy: AllocationPolicy,
    /// Usernames singled out by the policy.
    pub preferred: PreferredUsernames,
    /// Lottery name used in award messages.
    pub lottery_name: String,
}

impl Default for LotteryRules {
    fn default() -> Self {
        Self {
            policy: AllocationPolicy::default(),
            preferred: PreferredUsernames::default(),
            lottery_name: DEFAULT_LOTTERY_NAME.to_owned(),
        }
    }
}

/// One bonus that was posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwardRecord {
    /// One-based place.
    pub place: usize,
    /// Winner's username.
    pub username: String,
    /// Points awarded.
    pub prize: u64,
    /// Reason text submitted to the API.
    pub reason: String,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Giving balance before any award.
    pub initial_balance: u64,
    /// Posted bonuses in place order.
    pub awards: Vec<AwardRecord>,
    /// Giving balance left after the last award.
    pub remaining_balance: u64,
}

impl RunReport {
    /// Sum of all posted prizes.
    pub fn total_awarded(&self) -> u64 {
        self.awards.iter().map(|award| award.prize).sum()
    }
}

/// Result of invoking the monthly run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Today is not the last day of the month; nothing was fetched or posted.
    Skipped {
        /// Days left in the month.
        days_left: u32,
    },
    /// The balance was distributed.
    Completed(RunReport),
}

/// Domain service running the monthly lottery against a rewards API.
#[derive(Clone)]
pub struct MonthlyLotteryService<A> {
    api: Arc<A>,
    gate: RunGate,
    rules: LotteryRules,
}

impl<A> MonthlyLotteryService<A> {
    /// Create a new service.
    pub fn new(api: Arc<A>, clock: Arc<dyn Clock>, rules: LotteryRules) -> Self {
        Self {
            api,
            gate: RunGate::new(clock),
            rules,
        }
    }
}

impl<A> MonthlyLotteryService<A>
where
    A: RewardsApi,
{
    /// Run once with an RNG seeded from the thread-local generator.
    ///
    /// # Errors
    ///
    /// Returns [`LotteryError`] when a fetch fails, the caller has no giving
    /// balance, or a bonus cannot be posted.
    pub async fn run(&self) -> Result<RunOutcome, LotteryError> {
        let mut rng = StdRng::from_rng(&mut rand::rng());
        self.run_with_rng(&mut rng).await
    }

    /// Run once using `rng` for the winner ordering.
    ///
    /// # Errors
    ///
    /// See [`MonthlyLotteryService::run`].
    pub async fn run_with_rng<R>(&self, rng: &mut R) -> Result<RunOutcome, LotteryError>
    where
        R: Rng + Send + ?Sized,
    {
        let decision = self.gate.evaluate();
        info!(
            today = %decision.today,
            days_left = decision.days_left,
            "evaluated month-end gate"
        );
        if !decision.is_open() {
            info!("not the last day of the month; skipping run");
            return Ok(RunOutcome::Skipped {
                days_left: decision.days_left,
            });
        }

        let caller = self
            .api
            .fetch_self()
            .await
            .map_err(LotteryError::FetchCaller)?;
        let initial_balance = caller
            .giving_balance
            .ok_or(LotteryError::MissingGivingBalance)?;
        info!(
            username = %caller.username,
            giving_balance = initial_balance,
            "fetched current giving balance"
        );

        let roster = self
            .api
            .fetch_roster()
            .await
            .map_err(LotteryError::FetchRoster)?;
        let roster_size = roster.len();
        let eligible = eligible_pool(&caller, roster);
        info!(
            roster_size,
            eligible = eligible.len(),
            policy = %self.rules.policy,
            "fetched roster"
        );

        let preferred = &self.rules.preferred;
        let distribution = self.rules.policy.allocate(
            initial_balance,
            eligible,
            |colleague: &Colleague| preferred.contains(&colleague.username),
            rng,
        );
        let remaining_balance = distribution.remaining_balance();

        let mut awards = Vec::with_capacity(distribution.entries().len());
        for entry in distribution.into_entries() {
            awards.push(self.dispatch(entry).await?);
        }

        info!(
            awards = awards.len(),
            remaining_balance, "giving balance left"
        );
        Ok(RunOutcome::Completed(RunReport {
            initial_balance,
            awards,
            remaining_balance,
        }))
    }

    async fn dispatch(
        &self,
        entry: AllocationEntry<Colleague>,
    ) -> Result<AwardRecord, LotteryError> {
        let AllocationEntry {
            recipient,
            place,
            prize,
        } = entry;
        let reason = award_reason(prize, &recipient.username, place, &self.rules.lottery_name);
        info!(place, prize, username = %recipient.username, "{reason}");

        let request = BonusRequest {
            reason: reason.clone(),
        };
        self.api
            .create_bonus(&request)
            .await
            .map_err(|source| LotteryError::Award {
                place,
                username: recipient.username.clone(),
                source,
            })?;

        Ok(AwardRecord {
            place,
            username: recipient.username,
            prize,
            reason,
        })
    }
}

#[cfg(test)]
#[path = "lottery_service_tests.rs"]
mod tests;
