//! Coupon payment frequency.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AnalyticsError;

/// Payment frequency for coupon bonds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum Frequency {
    /// Annual payments (1 per year)
    Annual,
    /// Semi-annual payments (2 per year) - most common for US bonds
    #[default]
    SemiAnnual,
    /// Quarterly payments (4 per year)
    Quarterly,
    /// Monthly payments (12 per year)
    Monthly,
}

impl Frequency {
    /// All supported frequencies, in ascending order of payments per year.
    pub const ALL: [Frequency; 4] = [
        Frequency::Annual,
        Frequency::SemiAnnual,
        Frequency::Quarterly,
        Frequency::Monthly,
    ];

    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }

    /// Returns the number of periods per year as `f64`.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        f64::from(self.periods_per_year())
    }

    /// Parses a frequency from a real-valued column entry (e.g. `2.0`).
    ///
    /// Non-integral values are rejected rather than truncated.
    pub fn from_f64(value: f64) -> Result<Self, AnalyticsError> {
        if value.fract() != 0.0 || !(1.0..=12.0).contains(&value) {
            return Err(AnalyticsError::invalid_terms(
                "frequency",
                format!("{value} is not one of 1, 2, 4 or 12"),
            ));
        }
        Self::try_from(value as u32)
    }
}

impl TryFrom<u32> for Frequency {
    type Error = AnalyticsError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Frequency::Annual),
            2 => Ok(Frequency::SemiAnnual),
            4 => Ok(Frequency::Quarterly),
            12 => Ok(Frequency::Monthly),
            other => Err(AnalyticsError::UnsupportedFrequency(other)),
        }
    }
}

impl From<Frequency> for u32 {
    fn from(freq: Frequency) -> Self {
        freq.periods_per_year()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Monthly => "Monthly",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_periods() {
        assert_eq!(Frequency::Annual.periods_per_year(), 1);
        assert_eq!(Frequency::SemiAnnual.periods_per_year(), 2);
        assert_eq!(Frequency::Quarterly.periods_per_year(), 4);
        assert_eq!(Frequency::Monthly.periods_per_year(), 12);
        assert_eq!(Frequency::default(), Frequency::SemiAnnual);
    }

    #[test]
    fn test_try_from() {
        for freq in Frequency::ALL {
            assert_eq!(Frequency::try_from(freq.periods_per_year()), Ok(freq));
        }
        assert_eq!(
            Frequency::try_from(3),
            Err(AnalyticsError::UnsupportedFrequency(3))
        );
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(Frequency::from_f64(4.0), Ok(Frequency::Quarterly));
        assert!(Frequency::from_f64(2.5).is_err());
        assert!(Frequency::from_f64(24.0).is_err());
        assert!(Frequency::from_f64(f64::NAN).is_err());
    }

    #[test]
    fn test_serde_as_integer() {
        let json = serde_json::to_string(&Frequency::Monthly).unwrap();
        assert_eq!(json, "12");
        let parsed: Frequency = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, Frequency::Annual);
        assert!(serde_json::from_str::<Frequency>("5").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Frequency::SemiAnnual.to_string(), "Semi-Annual");
    }
}
