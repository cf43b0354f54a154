use std::ops::Range;

use glam::IVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::color::Color;

const INT_RANGE: Range<i32> = -25..25;
const COORD_RANGE: Range<i32> = -50..50;

/// Pseudo-random source for colors, integers and points.
///
/// Every range is half-open, so `random_int(3..7)` never yields 7 and
/// color channels stay below 255.
#[derive(Debug, Clone)]
pub struct Randomizer {
    rng: StdRng,
}

impl Randomizer {
    /// Creates a randomizer seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a reproducible randomizer.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn random_color(&mut self) -> Color {
        Color::new(
            self.rng.gen_range(0..255),
            self.rng.gen_range(0..255),
            self.rng.gen_range(0..255),
        )
    }

    pub fn random_int(&mut self, range: Range<i32>) -> i32 {
        self.rng.gen_range(range)
    }

    /// Integer in the default `[-25, 25)` span.
    pub fn random_small_int(&mut self) -> i32 {
        self.random_int(INT_RANGE)
    }

    /// Integer in `[0, max)`.
    pub fn random_below(&mut self, max: i32) -> i32 {
        self.random_int(0..max)
    }

    /// Point with every coordinate in `[-50, 50)`.
    pub fn random_point(&mut self) -> IVec3 {
        IVec3::new(
            self.random_int(COORD_RANGE),
            self.random_int(COORD_RANGE),
            self.random_int(COORD_RANGE),
        )
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_stay_in_range() {
        let mut rando = Randomizer::seeded(7);
        for _ in 0..500 {
            let value = rando.random_int(3..7);
            assert!((3..7).contains(&value));
            assert!(INT_RANGE.contains(&rando.random_small_int()));
            assert!((0..4).contains(&rando.random_below(4)));
            let point = rando.random_point();
            for coord in point.to_array() {
                assert!(COORD_RANGE.contains(&coord));
            }
            let color = rando.random_color();
            assert!(color.r < 255 && color.g < 255 && color.b < 255);
        }
    }

    #[test]
    fn seeded_randomizers_repeat() {
        let mut a = Randomizer::seeded(42);
        let mut b = Randomizer::seeded(42);
        for _ in 0..16 {
            assert_eq!(a.random_point(), b.random_point());
        }
    }
}
