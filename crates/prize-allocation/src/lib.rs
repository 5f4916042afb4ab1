//! Winner ordering and prize schedules for the monthly bonus lottery.
//!
//! This crate is a pure library: it never performs I/O and knows nothing about
//! the rewards API. Callers hand it a giving balance, the eligible candidates,
//! a predicate marking preferred candidates, and a random number generator. It
//! returns the ordered winners together with the prize each one receives.
//!
//! # Overview
//!
//! Two policies are supported:
//!
//! - [`AllocationPolicy::LinearDecay`]: regular candidates are shuffled, the
//!   last three are promoted into the preferred tier, the tier is shuffled and
//!   appended. Prizes decay linearly with the place.
//! - [`AllocationPolicy::Lottery`]: preferred candidates are demoted behind
//!   the shuffled regular candidates and every place takes a third of what is
//!   left.
//!
//! # Example
//!
//! ```
//! use prize_allocation::AllocationPolicy;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let candidates = vec!["ada", "grace", "linus"];
//! let distribution = AllocationPolicy::LinearDecay.allocate(100, candidates, |_| false, &mut rng);
//!
//! let prizes: Vec<u64> = distribution.entries().iter().map(|entry| entry.prize).collect();
//! assert_eq!(prizes, vec![50, 33, 17]);
//! assert_eq!(distribution.remaining_balance(), 0);
//! ```

mod distribution;
mod error;
mod ordering;
mod policy;
mod prize;

pub use distribution::{AllocationEntry, Distribution};
pub use error::PolicyParseError;
pub use ordering::{
    PROMOTED_REGULAR_COUNT, linear_decay_order, lottery_order, partition_preferred, split_tail,
};
pub use policy::AllocationPolicy;
pub use prize::{LinearDecay, PrizeSchedule, ThirdOfRemainder, distribute, round_half_up, triangular};
