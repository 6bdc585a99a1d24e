use argminmax::ArgMinMax;
use statrs::statistics::Statistics;

pub fn get_max(vec: &[f64]) -> f64 {
    let max_index: usize = vec.argmax();
    vec[max_index]
}

pub fn get_min(vec: &[f64]) -> f64 {
    let min_index: usize = vec.argmin();
    vec[min_index]
}

/// Exponential moving average with `alpha = 2 / (span + 1)`, seeded with the
/// first defined sample. Leading `None`s stay `None`; once the state exists it
/// is carried forward, so interior gaps output the previous average.
pub fn ema(values: &[Option<f64>], span: usize) -> Vec<Option<f64>> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut state: Option<f64> = None;
    values
        .iter()
        .map(|value| {
            if let Some(x) = value {
                state = Some(match state {
                    None => *x,
                    Some(prev) => alpha * x + (1.0 - alpha) * prev,
                });
            }
            state
        })
        .collect()
}

/// Rolling sample standard deviation over `window` samples.
/// A row is defined only once the trailing window is fully defined.
pub fn rolling_std(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling_apply(values, window, |w| w.std_dev())
}

/// Rolling mean over `window` samples, same definedness rule as `rolling_std`.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling_apply(values, window, |w| w.mean())
}

fn rolling_apply<F>(values: &[Option<f64>], window: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> f64,
{
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }
    let mut buf = Vec::with_capacity(window);
    for i in (window - 1)..values.len() {
        let slice = &values[i + 1 - window..=i];
        if slice.iter().all(|v| v.is_some()) {
            buf.clear();
            buf.extend(slice.iter().flatten());
            out[i] = Some(f(&buf));
        }
    }
    out
}

/// Fill `None` gaps from the nearest later defined value; any trailing gap
/// (no later value exists) falls back to `default`.
pub fn backfill(values: &[Option<f64>], default: f64) -> Vec<f64> {
    let mut out = vec![default; values.len()];
    let mut next_defined = default;
    for i in (0..values.len()).rev() {
        if let Some(x) = values[i] {
            next_defined = x;
        }
        out[i] = next_defined;
    }
    out
}
