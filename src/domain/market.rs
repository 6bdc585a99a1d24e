use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Market phase regime. Selects which signal branch applies:
/// TTR is pure trend-line-touch + pattern, BTR/Sideways use adaptive zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum Phase {
    #[strum(serialize = "TTR")]
    Ttr,
    #[strum(serialize = "BTR")]
    Btr,
    #[strum(serialize = "SIDEWAYS")]
    Sideways,
    /// Anything we failed to parse. Zones stay undefined but processing continues.
    Unknown,
}

impl Phase {
    /// Parse a user-supplied phase string. Unknown inputs are kept (as `Unknown`)
    /// rather than rejected so the zone layer can warn and carry on.
    pub fn parse_lossy(text: &str) -> Phase {
        match text.trim().parse::<Phase>() {
            Ok(phase) => phase,
            Err(_) => {
                log::warn!("Unknown phase '{}': zones will be skipped.", text.trim());
                Phase::Unknown
            }
        }
    }

    pub fn uses_zones(&self) -> bool {
        matches!(self, Phase::Btr | Phase::Sideways)
    }
}

/// Directional bias gating which signal side is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Sideways,
}

impl Trend {
    /// Invalid trend strings silently normalize to sideways (with a warning).
    pub fn parse_lossy(text: &str) -> Trend {
        match text.trim().parse::<Trend>() {
            Ok(trend) => trend,
            Err(_) => {
                log::warn!(
                    "Invalid trend '{}', defaulting to 'sideways'.",
                    text.trim()
                );
                Trend::Sideways
            }
        }
    }
}

/// The discrete output of the pattern evaluator for one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum EntrySignal {
    #[strum(serialize = "BUY")]
    Buy,
    #[strum(serialize = "SELL")]
    Sell,
    #[strum(serialize = "NONE")]
    None,
}

impl EntrySignal {
    /// Only BUY/SELL are worth alerting on.
    pub fn is_actionable(&self) -> bool {
        matches!(self, EntrySignal::Buy | EntrySignal::Sell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_parses_case_insensitively() {
        assert_eq!(Phase::parse_lossy("ttr"), Phase::Ttr);
        assert_eq!(Phase::parse_lossy("  BTR "), Phase::Btr);
        assert_eq!(Phase::parse_lossy("Sideways"), Phase::Sideways);
        assert_eq!(Phase::parse_lossy("consolidation"), Phase::Unknown);
    }

    #[test]
    fn invalid_trend_normalizes_to_sideways() {
        assert_eq!(Trend::parse_lossy("Bullish"), Trend::Bullish);
        assert_eq!(Trend::parse_lossy("BEARISH"), Trend::Bearish);
        assert_eq!(Trend::parse_lossy("upwards"), Trend::Sideways);
    }

    #[test]
    fn signal_display_matches_alert_wire_format() {
        assert_eq!(EntrySignal::Buy.to_string(), "BUY");
        assert_eq!(EntrySignal::Sell.to_string(), "SELL");
        assert_eq!(EntrySignal::None.to_string(), "NONE");
        assert!(EntrySignal::Buy.is_actionable());
        assert!(!EntrySignal::None.is_actionable());
    }
}
