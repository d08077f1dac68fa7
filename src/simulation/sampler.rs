use anyhow::{bail, Result};
use chrono::Duration;
use rand::Rng;

/// Maps a uniform draw `u` in `[0, 1)` to an index into a history of `len`
/// samples, oldest first, biased toward the end.
///
/// The distance back from the most recent sample follows a truncated
/// geometric distribution with `P(d = k + 1) = weight * P(d = k)`. For
/// `0 < weight < 1` it is obtained in closed form as
/// `floor(log_w(1 - (1 - w^len) * u))`.
pub fn pick_index(len: usize, weight: f64, u: f64) -> usize {
    debug_assert!(len > 0);
    let last = len - 1;

    if weight <= 0.0 {
        return last;
    }

    if weight >= 1.0 {
        return ((u * len as f64) as usize).min(last);
    }

    let roll = (1.0 - (1.0 - weight.powf(len as f64)) * u).log(weight);
    let distance = if roll < 0.0 {
        0
    } else if roll >= last as f64 {
        last
    } else {
        roll.floor() as usize
    };

    last - distance
}

/// Draws one duration from `history`, favouring recent attempts.
pub fn sample<'a, R: Rng + ?Sized>(
    history: &'a [Duration],
    weight: f64,
    rng: &mut R,
) -> Result<&'a Duration> {
    if history.is_empty() {
        bail!("cannot sample a segment with no recorded history");
    }

    let u: f64 = rng.gen();
    Ok(&history[pick_index(history.len(), weight, u)])
}
