//! Colleague snapshots fetched from the rewards API.

use std::fmt;

/// `user_mode` carried by regular, active accounts.
pub const NORMAL_USER_MODE: &str = "normal";

/// Opaque account identifier assigned by the rewards API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColleagueId(String);

impl ColleagueId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl AsRef<str> for ColleagueId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ColleagueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Immutable snapshot of one account, fetched once per run.
///
/// The caller's own profile has the same shape; only the caller's snapshot is
/// expected to carry a `giving_balance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colleague {
    /// Account identifier.
    pub id: ColleagueId,
    /// Human readable name.
    pub display_name: String,
    /// Handle used to mention the colleague in award messages.
    pub username: String,
    /// Contact address.
    pub email: String,
    /// Points the account may still give away this month.
    pub giving_balance: Option<u64>,
    /// Account mode tag; see [`NORMAL_USER_MODE`].
    pub user_mode: String,
}

impl Colleague {
    /// Whether the account is a regular, active account.
    pub fn is_normal(&self) -> bool {
        self.user_mode == NORMAL_USER_MODE
    }
}

/// Select the colleagues that may win: normal accounts other than the caller.
///
/// Fetch order is preserved; the allocator imposes its own ordering.
///
/// # Examples
///
/// ```
/// use bonus_lottery::domain::{Colleague, ColleagueId, eligible_pool};
///
/// fn colleague(id: &str, mode: &str) -> Colleague {
///     Colleague {
///         id: ColleagueId::new(id),
///         display_name: id.to_owned(),
///         username: id.to_owned(),
///         email: format!("{id}@example.test"),
///         giving_balance: None,
///         user_mode: mode.to_owned(),
///     }
/// }
///
/// let me = colleague("me", "normal");
/// let roster = vec![me.clone(), colleague("ada", "normal"), colleague("bot", "benefits_only")];
/// let pool = eligible_pool(&me, roster);
/// assert_eq!(pool.len(), 1);
/// assert_eq!(pool[0].username, "ada");
/// ```
pub fn eligible_pool(caller: &Colleague, roster: Vec<Colleague>) -> Vec<Colleague> {
    roster
        .into_iter()
        .filter(|colleague| colleague.is_normal() && colleague.id != caller.id)
        .collect()
}
