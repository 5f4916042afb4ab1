//! Award message formatting.
//!
//! Messages are Dutch and follow the rewards API convention of starting with
//! `+{amount} @{username}` so the API can derive the transfer from the text.

/// Lottery name used in award messages unless configured otherwise.
pub const DEFAULT_LOTTERY_NAME: &str = "Daan's grote, maandelijkse bonuspuntenloterij";

/// Dutch ordinal suffix: `ste` for first place, `de` for every other place.
pub fn ordinal_suffix(place: usize) -> &'static str {
    if place == 1 { "ste" } else { "de" }
}

/// Build the award reason posted for one winner.
///
/// # Examples
///
/// ```
/// use bonus_lottery::domain::award_reason;
///
/// assert_eq!(
///     award_reason(50, "ada", 1, "de loterij"),
///     "+50 @ada omdat hij/zij de 1ste prijs won in de loterij! #winnaar",
/// );
/// ```
pub fn award_reason(prize: u64, username: &str, place: usize, lottery_name: &str) -> String {
    let suffix = ordinal_suffix(place);
    format!(
        "+{prize} @{username} omdat hij/zij de {place}{suffix} prijs won in {lottery_name}! #winnaar"
    )
}
