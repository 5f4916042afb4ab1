//! Prize schedules and the distribution loop.
//!
//! A [`PrizeSchedule`] proposes a base prize for a place. [`distribute`] walks
//! the winners in order, clamps each proposal to `1..=remaining`, and stops as
//! soon as the balance is exhausted.

use crate::distribution::{AllocationEntry, Distribution};

/// Proposes the unclamped prize for one place.
pub trait PrizeSchedule {
    /// Base prize for the winner at `place` (one-based) given the balance
    /// still available before this award.
    fn base_prize(&self, place: usize, remaining: u64) -> u64;
}

/// Linear decay: place `p` of `n` earns `(n - p + 1) * balance / triangular(n)`,
/// rounded half away from zero.
///
/// The factor is kept in floating point; `x.5` boundaries round up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearDecay {
    winner_count: usize,
    prize_factor: f64,
}

impl LinearDecay {
    /// Build the schedule for `winner_count` winners sharing `giving_balance`.
    ///
    /// # Examples
    ///
    /// ```
    /// use prize_allocation::{LinearDecay, PrizeSchedule};
    ///
    /// let schedule = LinearDecay::new(3, 100);
    /// assert_eq!(schedule.base_prize(1, 100), 50);
    /// assert_eq!(schedule.base_prize(2, 50), 33);
    /// assert_eq!(schedule.base_prize(3, 17), 17);
    /// ```
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "the prize factor is defined in floating point"
    )]
    #[must_use]
    pub fn new(winner_count: usize, giving_balance: u64) -> Self {
        let prize_factor = if winner_count == 0 {
            0.0
        } else {
            giving_balance as f64 / triangular(winner_count as u64) as f64
        };
        Self {
            winner_count,
            prize_factor,
        }
    }

    /// Balance share per unit of weight.
    #[must_use]
    pub const fn prize_factor(&self) -> f64 {
        self.prize_factor
    }
}

impl PrizeSchedule for LinearDecay {
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "the prize factor is defined in floating point"
    )]
    fn base_prize(&self, place: usize, _remaining: u64) -> u64 {
        let weight = (self.winner_count + 1).saturating_sub(place);
        round_half_up(weight as f64 * self.prize_factor)
    }
}

/// Every place takes a third of the remaining balance, rounded up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThirdOfRemainder;

impl PrizeSchedule for ThirdOfRemainder {
    fn base_prize(&self, _place: usize, remaining: u64) -> u64 {
        remaining.div_ceil(3)
    }
}

/// `n * (n + 1) / 2`.
///
/// # Examples
///
/// ```
/// assert_eq!(prize_allocation::triangular(3), 6);
/// ```
#[expect(
    clippy::integer_division,
    reason = "n * (n + 1) is always even"
)]
#[must_use]
pub const fn triangular(n: u64) -> u64 {
    n.saturating_mul(n.saturating_add(1)) / 2
}

/// Round a non-negative value half away from zero.
///
/// Negative and non-finite inputs saturate at the bounds of `u64`.
///
/// # Examples
///
/// ```
/// assert_eq!(prize_allocation::round_half_up(16.5), 17);
/// assert_eq!(prize_allocation::round_half_up(33.33), 33);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "float to integer casts saturate and inputs are non-negative"
)]
#[must_use]
pub fn round_half_up(raw: f64) -> u64 {
    raw.round() as u64
}

/// Hand out prizes to `winners` in order.
///
/// Each base prize is clamped to `1..=remaining`; processing stops once the
/// balance reaches zero even if winners remain.
#[must_use]
pub fn distribute<T, S>(winners: Vec<T>, giving_balance: u64, schedule: &S) -> Distribution<T>
where
    S: PrizeSchedule + ?Sized,
{
    let mut remaining = giving_balance;
    let mut entries = Vec::with_capacity(winners.len());

    for (index, recipient) in winners.into_iter().enumerate() {
        if remaining == 0 {
            break;
        }
        let place = index + 1;
        let prize = schedule.base_prize(place, remaining).clamp(1, remaining);
        remaining -= prize;
        entries.push(AllocationEntry {
            recipient,
            place,
            prize,
        });
    }

    Distribution::new(entries, giving_balance, remaining)
}
