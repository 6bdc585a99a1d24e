use crate::config::analysis::AdaptiveSettings;
use crate::domain::Phase;
use crate::models::{IndicatorColumns, ZoneColumns};

/// Derive buy/sell entry zones from the band edges and the adaptive
/// percentage.
///
/// TTR removes zones entirely: that phase triggers on trend-line touch plus
/// patterns alone. BTR and Sideways wrap a ±pct interval around each band
/// edge. An unrecognized phase also yields no zones, but is only a warning
/// (already surfaced at parse time), never a hard failure.
pub fn compute_zones(
    ind: &IndicatorColumns,
    pct_dynamic: &[f64],
    phase: Phase,
    cfg: &AdaptiveSettings,
) -> ZoneColumns {
    let n = ind.lower_band.len();
    let mut zones = ZoneColumns::undefined(n);

    if !phase.uses_zones() {
        if phase == Phase::Unknown {
            log::warn!("Unknown phase: skipping zone logic.");
        }
        return zones;
    }

    for i in 0..n {
        // pct_dynamic is back-filled upstream, but guard with the floor in
        // case a caller hands in a short column.
        let pct = pct_dynamic.get(i).copied().unwrap_or(cfg.min_pct);
        if let Some(lower) = ind.lower_band[i] {
            zones.buy_zone_low[i] = Some(lower * (1.0 - pct));
            zones.buy_zone_high[i] = Some(lower * (1.0 + pct));
        }
        if let Some(upper) = ind.upper_band[i] {
            zones.sell_zone_low[i] = Some(upper * (1.0 - pct));
            zones.sell_zone_high[i] = Some(upper * (1.0 + pct));
        }
    }

    zones
}
