//! Percentage model

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A whole-number mark between 0 and 100 inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Percentage(u8);

/// Display band used when listing a learner's subjects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentageBand {
    /// 70% and above
    High,
    /// 50% to 69%
    Medium,
    /// Below 50%
    Low,
}

impl PercentageBand {
    /// Lowercase label for the band
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl Percentage {
    /// Highest accepted value
    pub const MAX: u8 = 100;

    /// Create a percentage, returning `None` when `value` exceeds 100
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// The raw value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Band of this mark (high ≥ 70, medium ≥ 50, otherwise low)
    #[must_use]
    pub const fn band(self) -> PercentageBand {
        if self.0 >= 70 {
            PercentageBand::High
        } else if self.0 >= 50 {
            PercentageBand::Medium
        } else {
            PercentageBand::Low
        }
    }
}

impl TryFrom<i64> for Percentage {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| ValidationError::InvalidPercentage(value.to_string()))
    }
}

impl FromStr for Percentage {
    type Err = ValidationError;

    /// Parse user input. Missing, non-numeric, fractional and out-of-range
    /// input are all rejected with the same error kind.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidPercentage(trimmed.to_string()))
            .and_then(Self::try_from)
    }
}

impl From<Percentage> for u8 {
    fn from(value: Percentage) -> Self {
        value.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_bounds() {
        assert_eq!("0".parse::<Percentage>().map(Percentage::value), Ok(0));
        assert_eq!("100".parse::<Percentage>().map(Percentage::value), Ok(100));
        assert_eq!(" 65 ".parse::<Percentage>().map(Percentage::value), Ok(65));
    }

    #[test]
    fn test_parse_rejects_bad_input_identically() {
        for raw in ["", "abc", "-1", "101", "65.5", "  "] {
            let err = raw.parse::<Percentage>().unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidPercentage(_)),
                "expected InvalidPercentage for {raw:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_new_rejects_above_max() {
        assert!(Percentage::new(101).is_none());
        assert!(Percentage::new(100).is_some());
    }

    #[test]
    fn test_bands() {
        assert_eq!(Percentage(70).band(), PercentageBand::High);
        assert_eq!(Percentage(69).band(), PercentageBand::Medium);
        assert_eq!(Percentage(50).band(), PercentageBand::Medium);
        assert_eq!(Percentage(49).band(), PercentageBand::Low);
        assert_eq!(PercentageBand::High.label(), "high");
    }

    #[test]
    fn test_display() {
        assert_eq!(Percentage(55).to_string(), "55%");
    }
}
