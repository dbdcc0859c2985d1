//! RNG module - seedable item selection
//!
//! Items are drawn uniformly, with replacement, from the catalog. The random
//! source is injected so tests and replays can pin the sequence with a seed.
//!
//! Provides a simple LCG for deterministic play and a [`RandomSource`]
//! implementation for `fastrand` when no seed is configured.

use crate::catalog::CATALOG;
use crate::error::SessionError;
use crate::types::Item;

/// Anything that can pick a uniform index.
pub trait RandomSource {
    /// Uniform index in `[0, len)`. Callers never pass `len == 0`.
    fn next_index(&mut self, len: usize) -> usize;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Multiply-shift keeps the high bits; the low bits of a 2^32 LCG cycle quickly.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

impl RandomSource for SimpleRng {
    fn next_index(&mut self, len: usize) -> usize {
        self.next_range(len as u32) as usize
    }
}

impl RandomSource for fastrand::Rng {
    fn next_index(&mut self, len: usize) -> usize {
        self.usize(..len)
    }
}

/// Draws items from a fixed catalog.
///
/// Stateless: every call to [`ItemSupplier::next`] is independent and only
/// consumes randomness from the source it is handed.
#[derive(Debug, Clone, Copy)]
pub struct ItemSupplier {
    catalog: &'static [Item],
}

impl ItemSupplier {
    /// Supplier over a custom catalog.
    pub fn try_new(catalog: &'static [Item]) -> Result<Self, SessionError> {
        if catalog.is_empty() {
            return Err(SessionError::EmptyCatalog);
        }
        Ok(Self { catalog })
    }

    /// Supplier over the built-in catalog.
    pub fn standard() -> Self {
        Self { catalog: &CATALOG }
    }

    pub fn catalog(&self) -> &'static [Item] {
        self.catalog
    }

    /// Pick one item uniformly at random.
    pub fn next<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Item {
        self.catalog[rng.next_index(self.catalog.len())]
    }
}

impl Default for ItemSupplier {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_zero_seed_is_remapped() {
        assert_eq!(SimpleRng::new(0), SimpleRng::new(1));
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..10_000 {
            assert!(rng.next_range(15) < 15);
        }
    }

    #[test]
    fn test_supplier_same_seed_same_sequence() {
        let supplier = ItemSupplier::standard();
        let mut a = SimpleRng::new(2024);
        let mut b = SimpleRng::new(2024);

        // Far more draws than catalog entries.
        for _ in 0..1_000 {
            assert_eq!(supplier.next(&mut a), supplier.next(&mut b));
        }
    }

    #[test]
    fn test_supplier_reaches_every_item() {
        let supplier = ItemSupplier::standard();
        let mut rng = SimpleRng::new(99);
        let mut seen = [false; crate::catalog::CATALOG_LEN];

        for _ in 0..2_000 {
            let item = supplier.next(&mut rng);
            let idx = CATALOG.iter().position(|c| *c == item).unwrap();
            seen[idx] = true;
        }

        assert!(seen.iter().all(|s| *s), "every catalog entry should be drawn");
    }

    #[test]
    fn test_supplier_draws_with_replacement() {
        static ONE: [Item; 1] = [Item::new(Category::Glass, "Jar", "🍯")];
        let supplier = ItemSupplier::try_new(&ONE).unwrap();
        let mut rng = SimpleRng::new(5);

        for _ in 0..10 {
            assert_eq!(supplier.next(&mut rng).label, "Jar");
        }
    }

    #[test]
    fn test_supplier_rejects_empty_catalog() {
        static EMPTY: [Item; 0] = [];
        assert_eq!(
            ItemSupplier::try_new(&EMPTY).unwrap_err(),
            SessionError::EmptyCatalog
        );
    }

    #[test]
    fn test_fastrand_source_in_bounds() {
        let supplier = ItemSupplier::standard();
        let mut rng = fastrand::Rng::with_seed(42);
        for _ in 0..100 {
            let item = supplier.next(&mut rng);
            assert!(CATALOG.contains(&item));
        }
    }
}
