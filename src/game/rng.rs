use rand::rngs::{OsRng, StdRng};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Source of uniform random numbers for fruit placement.
pub trait CellRng {
    /// Uniform value in `0..bound`; `bound` is never zero.
    fn next_below(&mut self, bound: u32) -> u32;

    /// Uniformly chosen element, `None` for an empty slice.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_below(items.len() as u32) as usize)
    }
}

/// `StdRng` seeded once from the OS (`crypto.getRandomValues` on wasm32).
#[derive(Clone, Debug)]
pub struct EntropyRng {
    rng: StdRng,
}

impl EntropyRng {
    pub fn new() -> Result<Self, rand::Error> {
        Ok(Self {
            rng: StdRng::from_rng(OsRng)?,
        })
    }
}

impl CellRng for EntropyRng {
    fn next_below(&mut self, bound: u32) -> u32 {
        self.rng.gen_range(0..bound)
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entropy_stays_in_bounds() {
        let mut rng = EntropyRng::new().unwrap();
        for bound in [1, 2, 7, 20, 400] {
            for _ in 0..200 {
                assert!(rng.next_below(bound) < bound);
            }
        }
    }

    #[test]
    fn pick_returns_member_or_none() {
        let mut rng = EntropyRng::new().unwrap();
        let cells = [3, 5, 8];
        for _ in 0..50 {
            assert!(cells.contains(rng.pick(&cells).unwrap()));
        }
        let empty: [u8; 0] = [];
        assert_eq!(rng.pick(&empty), None);
    }
}
