//! Configured set of preferred usernames.

use std::collections::BTreeSet;

/// Usernames singled out by configuration.
///
/// Under the linear-decay policy these colleagues are guaranteed a place in
/// the final tier; under the lottery policy they are placed last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferredUsernames(BTreeSet<String>);

impl PreferredUsernames {
    /// Parse a comma-separated list. Entries are trimmed, a leading `@` is
    /// dropped and blank entries are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use bonus_lottery::domain::PreferredUsernames;
    ///
    /// let preferred = PreferredUsernames::parse(" ada, @grace,,");
    /// assert!(preferred.contains("ada"));
    /// assert!(preferred.contains("grace"));
    /// assert_eq!(preferred.iter().count(), 2);
    /// ```
    pub fn parse(raw: &str) -> Self {
        raw.split(',').collect()
    }

    /// Whether `username` is preferred.
    pub fn contains(&self, username: &str) -> bool {
        self.0.contains(username)
    }

    /// Iterate over the usernames in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for PreferredUsernames {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .filter_map(|entry| normalise(entry.as_ref()))
                .collect(),
        )
    }
}

fn normalise(entry: &str) -> Option<String> {
    let trimmed = entry.trim();
    let username = trimmed.strip_prefix('@').unwrap_or(trimmed).trim();
    (!username.is_empty()).then(|| username.to_owned())
}
