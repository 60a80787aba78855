//! Player-count tokens: `"4"`, `"2-6"`, `"2–6"`, `"7+"`

use serde::{Deserialize, Serialize};

/// Normalized player-count range.
///
/// `max` is [`PlayerRange::UNBOUNDED`] for open ranges such as `"7+"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRange {
    pub min: u32,
    pub max: u32,
    pub open: bool,
}

impl Default for PlayerRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl PlayerRange {
    pub const UNBOUNDED: u32 = u32::MAX;

    /// Never matches a positive player count.
    pub const EMPTY: PlayerRange = PlayerRange { min: 0, max: 0, open: false };

    pub fn exact(n: u32) -> Self {
        Self { min: n, max: n, open: false }
    }

    pub fn between(min: u32, max: u32) -> Self {
        Self { min, max, open: false }
    }

    pub fn open_from(min: u32) -> Self {
        Self { min, max: Self::UNBOUNDED, open: true }
    }

    /// Parse a player-count token. Unparseable input yields [`PlayerRange::EMPTY`].
    pub fn parse(token: &str) -> Self {
        let s = token.trim();
        if s.is_empty() {
            return Self::EMPTY;
        }

        if let Some(prefix) = s.strip_suffix('+') {
            if let Some(min) = clean_integer(prefix) {
                return Self::open_from(min);
            }
        }

        if let Some((lo, hi)) = split_range(s) {
            if let (Some(min), Some(max)) = (digits(lo), digits(hi)) {
                return Self::between(min, max);
            }
        }

        clean_integer(s).map(Self::exact).unwrap_or(Self::EMPTY)
    }

    /// Whether a filter for exactly `n` players accepts this range.
    ///
    /// An open range cannot be bounded numerically, so it only accepts its own minimum.
    pub fn accepts(&self, n: u32) -> bool {
        if self.open {
            n == self.min
        } else {
            n >= self.min && n <= self.max
        }
    }

    /// Upper bound used when enumerating supported counts; open ranges stop at `min`.
    pub fn finite_max(&self) -> u32 {
        if self.open { self.min } else { self.max }
    }
}

/// A non-negative integer whose canonical string form is exactly `s`.
fn clean_integer(s: &str) -> Option<u32> {
    let n: u32 = s.parse().ok()?;
    (n.to_string() == s).then_some(n)
}

fn digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Split `a-b` or `a–b` (en dash) into its halves.
fn split_range(s: &str) -> Option<(&str, &str)> {
    s.split_once('-').or_else(|| s.split_once('\u{2013}'))
}

/// Convenience wrapper matching the free-function style used by the filter code.
pub fn parse_player_count(token: &str) -> PlayerRange {
    PlayerRange::parse(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_documented_tokens() {
        assert_eq!(parse_player_count("7+"), PlayerRange::open_from(7));
        assert_eq!(parse_player_count("2-6"), PlayerRange::between(2, 6));
        assert_eq!(parse_player_count("4"), PlayerRange::exact(4));
        assert_eq!(parse_player_count("abc"), PlayerRange::EMPTY);
        assert_eq!(parse_player_count(""), PlayerRange::EMPTY);
    }

    #[test]
    fn open_range_is_unbounded() {
        let r = parse_player_count("7+");
        assert!(r.open);
        assert_eq!(r.max, PlayerRange::UNBOUNDED);
    }

    #[test]
    fn accepts_en_dash() {
        assert_eq!(parse_player_count("1\u{2013}5"), PlayerRange::between(1, 5));
    }

    #[test]
    fn rejects_partial_integers() {
        assert_eq!(parse_player_count("4a"), PlayerRange::EMPTY);
        assert_eq!(parse_player_count("04"), PlayerRange::EMPTY);
        assert_eq!(parse_player_count("+4"), PlayerRange::EMPTY);
        assert_eq!(parse_player_count("x+"), PlayerRange::EMPTY);
        assert_eq!(parse_player_count("-3"), PlayerRange::EMPTY);
        assert_eq!(parse_player_count("2-"), PlayerRange::EMPTY);
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(parse_player_count(" 3 "), PlayerRange::exact(3));
    }

    #[test]
    fn open_range_only_accepts_its_minimum() {
        let r = PlayerRange::open_from(7);
        assert!(r.accepts(7));
        assert!(!r.accepts(8));
        assert!(!r.accepts(6));
        assert_eq!(r.finite_max(), 7);
    }

    #[test]
    fn empty_range_rejects_positive_counts() {
        assert!(!PlayerRange::EMPTY.accepts(1));
    }
}
