//! Allocation policies tying an ordering to a prize schedule.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::distribution::Distribution;
use crate::error::PolicyParseError;
use crate::ordering::{linear_decay_order, lottery_order};
use crate::prize::{LinearDecay, ThirdOfRemainder, distribute};

/// Selects how winners are ordered and how much each place earns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AllocationPolicy {
    /// Preferred candidates are guaranteed a place in the final tier; prizes
    /// decay linearly with the place.
    #[default]
    LinearDecay,
    /// Preferred candidates are demoted to the end; every place takes a third
    /// of the remaining balance.
    Lottery,
}

impl AllocationPolicy {
    /// Stable configuration name of the policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LinearDecay => "linear-decay",
            Self::Lottery => "lottery",
        }
    }

    /// Order `candidates` into winners according to the policy.
    #[must_use]
    pub fn order<T, F, R>(self, candidates: Vec<T>, is_preferred: F, rng: &mut R) -> Vec<T>
    where
        F: Fn(&T) -> bool,
        R: Rng + ?Sized,
    {
        match self {
            Self::LinearDecay => linear_decay_order(candidates, is_preferred, rng),
            Self::Lottery => lottery_order(candidates, is_preferred, rng),
        }
    }

    /// Order the candidates and hand out `giving_balance` among them.
    ///
    /// # Examples
    ///
    /// ```
    /// use prize_allocation::AllocationPolicy;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let distribution =
    ///     AllocationPolicy::Lottery.allocate(100, vec!["ada", "grace"], |_| false, &mut rng);
    ///
    /// assert_eq!(distribution.total_awarded(), 56);
    /// assert_eq!(distribution.remaining_balance(), 44);
    /// ```
    #[must_use]
    pub fn allocate<T, F, R>(
        self,
        giving_balance: u64,
        candidates: Vec<T>,
        is_preferred: F,
        rng: &mut R,
    ) -> Distribution<T>
    where
        F: Fn(&T) -> bool,
        R: Rng + ?Sized,
    {
        let winners = self.order(candidates, is_preferred, rng);
        match self {
            Self::LinearDecay => {
                let schedule = LinearDecay::new(winners.len(), giving_balance);
                distribute(winners, giving_balance, &schedule)
            }
            Self::Lottery => distribute(winners, giving_balance, &ThirdOfRemainder),
        }
    }
}

impl fmt::Display for AllocationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AllocationPolicy {
    type Err = PolicyParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalised = raw.trim().to_ascii_lowercase().replace('_', "-");
        match normalised.as_str() {
            "linear-decay" => Ok(Self::LinearDecay),
            "lottery" => Ok(Self::Lottery),
            _ => Err(PolicyParseError {
                value: raw.to_owned(),
            }),
        }
    }
}
