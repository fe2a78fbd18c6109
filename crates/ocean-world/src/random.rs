//! Source of randomness used by the engine.

use rand::Rng;

/// The two random draws the engine needs. Given the same sequence of
/// answers, a world evolves identically.
pub trait Randomness {
    /// Uniform integer in `low..=high`
    fn uniform(&mut self, low: u32, high: u32) -> u32;

    /// Uniform choice from a slice, `None` when the slice is empty
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.uniform(0, (items.len() - 1) as u32) as usize;
        items.get(index)
    }
}

impl<R: Rng> Randomness for R {
    fn uniform(&mut self, low: u32, high: u32) -> u32 {
        self.gen_range(low..=high)
    }
}
