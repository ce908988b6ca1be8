//! Weighted random selection.

use rand::Rng;
use rand::rngs::StdRng;

/// Pick an entry proportionally to its weight.
///
/// Entries with non-positive weight are never selected. Returns `None`
/// when the weights sum to zero or the slice is empty.
pub fn pick_weighted<'a, T>(rng: &mut StdRng, entries: &'a [(T, f64)]) -> Option<&'a T> {
    let total: f64 = entries.iter().map(|(_, w)| w.max(0.0)).sum();
    if total <= 0.0 {
        return None;
    }
    let mut roll = rng.random_range(0.0..total);
    for (item, weight) in entries {
        if *weight <= 0.0 {
            continue;
        }
        if roll < *weight {
            return Some(item);
        }
        roll -= weight;
    }
    // Floating-point edge: fall back to the last selectable entry.
    entries
        .iter()
        .rev()
        .find(|(_, w)| *w > 0.0)
        .map(|(item, _)| item)
}
