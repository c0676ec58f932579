//! Deterministic value sequences
//!
//! Linear interpolation (`steps`), channel-wise color interpolation and a
//! seeded linear-congruential generator (`random`). Results depend only on
//! the arguments, except when `random` is given no seed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use mandala_paint::{round_half_up, Color, ColorResolutionError, ColorResolver};
use tracing::debug;

const LCG_MULTIPLIER: u64 = (1 << 13) + 1;
const LCG_INCREMENT: u64 = 1987;
const LCG_MODULUS: u64 = 1 << 32;
const SEED_SPREAD: u64 = 0x9e37_79b9;

/// `count` evenly spaced values from `from` to `to`, both ends included.
///
/// A count of 0 or 1 yields `[from]`.
pub fn steps(from: f64, to: f64, count: usize) -> Vec<f64> {
    if count <= 1 {
        return vec![from];
    }
    let last = count - 1;
    let magnitude = (to - from).abs();
    let direction = if from < to { 1.0 } else { -1.0 };
    (0..count)
        .map(|i| {
            if i == last {
                to
            } else {
                from + magnitude * (i as f64 / last as f64) * direction
            }
        })
        .collect()
}

/// `steps` with the count left open, for use as a sequence generator
pub fn steps_fn(from: f64, to: f64) -> impl Fn(usize) -> Vec<f64> {
    move |count| steps(from, to, count)
}

/// Interpolate every channel between two resolved color strings
pub fn color_steps<R>(
    from: &str,
    to: &str,
    count: usize,
    resolver: &R,
) -> Result<Vec<Color>, ColorResolutionError>
where
    R: ColorResolver + ?Sized,
{
    let start = resolver.resolve(from)?;
    let end = resolver.resolve(to)?;

    let r = steps(start.r, end.r, count);
    let g = steps(start.g, end.g, count);
    let b = steps(start.b, end.b, count);
    let a = steps(start.a, end.a, count);

    Ok((0..r.len())
        .map(|i| Color::new(r[i], g[i], b[i], a[i]))
        .collect())
}

/// Options for [`random`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RandomOptions {
    pub count: usize,
    /// Fixed seed; the wall clock is used when absent
    pub seed: Option<u64>,
    /// Round every value to the nearest integer
    pub as_int: bool,
}

impl Default for RandomOptions {
    fn default() -> Self {
        Self {
            count: 1,
            seed: None,
            as_int: false,
        }
    }
}

impl RandomOptions {
    pub fn seeded(seed: u64, count: usize) -> Self {
        Self {
            count,
            seed: Some(seed),
            as_int: false,
        }
    }

    pub fn as_int(self) -> Self {
        Self {
            as_int: true,
            ..self
        }
    }
}

/// `options.count` pseudo-random values in `[min, max)`
pub fn random(min: f64, max: f64, options: &RandomOptions) -> Vec<f64> {
    let mut state = options.seed.unwrap_or_else(clock_seed);
    let mut values = Vec::with_capacity(options.count);
    for _ in 0..options.count {
        state = next_state(state);
        let normalized = state as f64 / LCG_MODULUS as f64;
        let value = min + normalized * (max - min);
        values.push(if options.as_int {
            round_half_up(value)
        } else {
            value
        });
    }
    values
}

fn next_state(seed: u64) -> u64 {
    seed.wrapping_mul(LCG_MULTIPLIER).wrapping_add(LCG_INCREMENT) % LCG_MODULUS
}

/// Wall-clock seed; the call counter keeps calls within one clock tick apart
fn clock_seed() -> u64 {
    static CALLS: AtomicU64 = AtomicU64::new(0);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let call = CALLS.fetch_add(1, Ordering::Relaxed);
    let seed = nanos.wrapping_add(call.wrapping_mul(SEED_SPREAD)) % LCG_MODULUS;
    debug!(seed, "no random seed supplied, using wall clock");
    seed
}

/// Inclusive range from `from` to `to`; non-positive steps fall back to 1.
///
/// Non-finite bounds give an empty range.
pub fn range(from: f64, to: f64, step: f64) -> Vec<f64> {
    if !(from.is_finite() && to.is_finite()) {
        return Vec::new();
    }
    let step = if step > 0.0 && step.is_finite() { step } else { 1.0 };
    let mut values = Vec::new();
    let mut value = from;
    let mut i = 0usize;
    while value <= to {
        values.push(value);
        i += 1;
        value = from + step * i as f64;
    }
    values
}
