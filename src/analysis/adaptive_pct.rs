use crate::config::analysis::AdaptiveSettings;
use crate::models::IndicatorColumns;
use crate::utils::maths_utils::{backfill, ema};

/// Adaptive zone percentage: a bounded fractional width that sizes the entry
/// zones. Band-width driven so zones widen with volatility, with an ATR term
/// so they never vanish in quiet markets, and a band-relative limiter so they
/// never swallow the band itself.
pub fn compute_adaptive_pct(ind: &IndicatorColumns, cfg: &AdaptiveSettings) -> Vec<f64> {
    let n = ind.trend_line.len();

    let mut raw_pct = vec![None; n];
    let mut scaled = vec![None; n];
    for i in 0..n {
        if let (Some(up), Some(lo), Some(mid)) =
            (ind.upper_band[i], ind.lower_band[i], ind.trend_line[i])
        {
            let ratio = (up - lo) / mid;
            raw_pct[i] = Some(ratio);
            scaled[i] = Some(ratio * cfg.base_scale);
        }
    }

    let smoothed = ema(&scaled, cfg.ema_span);

    let mut pct = vec![None; n];
    for i in 0..n {
        let (Some(raw), Some(sc), Some(sm)) = (raw_pct[i], scaled[i], smoothed[i]) else {
            continue;
        };
        let Some(mid) = ind.trend_line[i] else {
            continue;
        };
        let Some(atr) = ind.atr[i] else {
            continue;
        };
        let atr_term = (atr / mid) * cfg.atr_weight;

        let blended = cfg.raw_weight * sc + cfg.smoothed_weight * sm + atr_term;
        let clipped = blended.clamp(cfg.min_pct, cfg.max_pct);
        // Band-relative limiter, then re-apply the floor
        let limited = clipped.min(cfg.band_cap_ratio * raw).max(cfg.min_pct);
        pct[i] = Some(limited);
    }

    // Undefined rows take the nearest later defined value; a trailing gap
    // defaults to the floor.
    backfill(&pct, cfg.min_pct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PIPELINE;

    fn columns(n: usize, mid: f64, half_width: f64, atr: f64) -> IndicatorColumns {
        IndicatorColumns {
            trend_line: vec![Some(mid); n],
            upper_band: vec![Some(mid + half_width); n],
            lower_band: vec![Some(mid - half_width); n],
            atr: vec![Some(atr); n],
        }
    }

    #[test]
    fn result_stays_within_bounds() {
        let cfg = &PIPELINE.adaptive;
        // Very wide bands and large ATR would push way past the ceiling
        let ind = columns(30, 100.0, 50.0, 20.0);
        let pct = compute_adaptive_pct(&ind, cfg);
        for (i, p) in pct.iter().enumerate() {
            assert!(
                (cfg.min_pct..=cfg.max_pct).contains(p),
                "pct {p} out of bounds at row {i}"
            );
        }
    }

    #[test]
    fn quiet_market_floors_at_min_pct() {
        let cfg = &PIPELINE.adaptive;
        // Nearly flat bands: raw ratio tiny, limiter caps below min, floor wins
        let ind = columns(10, 100.0, 0.01, 0.001);
        let pct = compute_adaptive_pct(&ind, cfg);
        for p in &pct {
            assert_eq!(*p, cfg.min_pct);
        }
    }

    #[test]
    fn band_relative_limiter_caps_the_zone() {
        let cfg = &PIPELINE.adaptive;
        // raw ratio = 1.0 / 100.0 = 0.01, cap = 0.6 * 0.01 = 0.006.
        // ATR pushes the blend to the 0.018 ceiling, limiter takes over.
        let ind = columns(10, 100.0, 0.5, 10.0);
        let pct = compute_adaptive_pct(&ind, cfg);
        for p in &pct {
            assert!((p - 0.006).abs() < 1e-12, "limiter not applied: {p}");
        }
    }

    #[test]
    fn undefined_head_is_backfilled_from_first_defined_row() {
        let cfg = &PIPELINE.adaptive;
        let mut ind = columns(10, 100.0, 0.9, 0.5);
        for i in 0..4 {
            ind.upper_band[i] = None;
            ind.lower_band[i] = None;
        }
        let pct = compute_adaptive_pct(&ind, cfg);
        // Head rows carry the first computed value, not the floor
        assert_eq!(pct[0], pct[4]);
        assert!(pct[0] > cfg.min_pct);
    }

    #[test]
    fn all_undefined_defaults_to_floor() {
        let cfg = &PIPELINE.adaptive;
        let ind = IndicatorColumns {
            trend_line: vec![None; 5],
            upper_band: vec![None; 5],
            lower_band: vec![None; 5],
            atr: vec![None; 5],
        };
        assert_eq!(compute_adaptive_pct(&ind, cfg), vec![cfg.min_pct; 5]);
    }
}
