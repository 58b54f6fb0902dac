use rand::seq::SliceRandom;
use rand::RngExt;

use crate::cell::{Cell, Color, Fill, Shape};

pub const DECK_SIZE: usize = 27;

/// The fixed 27-cell universe, shape-major then color then fill.
pub fn all_cells() -> [Cell; DECK_SIZE] {
    let mut cells = [Cell {
        shape: Shape::Square,
        color: Color::Red,
        fill: Fill::Full,
    }; DECK_SIZE];

    let mut idx = 0;
    for &shape in Shape::all() {
        for &color in Color::all() {
            for &fill in Fill::all() {
                cells[idx] = Cell { shape, color, fill };
                idx += 1;
            }
        }
    }
    cells
}

/// Draw `n` cells uniformly at random, without replacement, from the
/// universe minus `exclude` (the cells currently in play).
///
/// Asking for more cells than remain is an internal invariant breach,
/// not a user-facing error: with 27 cells, a 9-cell grid and at most 3
/// replacements per round, the pool can never run dry.
pub fn sample<R: RngExt>(rng: &mut R, n: usize, exclude: &[Cell]) -> Vec<Cell> {
    let mut pool: Vec<Cell> = all_cells()
        .into_iter()
        .filter(|cell| !exclude.contains(cell))
        .collect();

    assert!(
        n <= pool.len(),
        "asked for {} cells but only {} remain outside play",
        n,
        pool.len()
    );

    pool.shuffle(rng);
    pool.truncate(n);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn universe_has_27_distinct_cells() {
        let cells = all_cells();
        let distinct: HashSet<Cell> = cells.iter().copied().collect();
        assert_eq!(distinct.len(), DECK_SIZE);
    }

    #[test]
    fn sample_returns_distinct_cells() {
        let mut rng = StdRng::seed_from_u64(1);
        let drawn = sample(&mut rng, 9, &[]);
        let distinct: HashSet<Cell> = drawn.iter().copied().collect();
        assert_eq!(drawn.len(), 9);
        assert_eq!(distinct.len(), 9);
    }

    #[test]
    fn sample_never_draws_excluded_cells() {
        let mut rng = StdRng::seed_from_u64(2);
        let in_play: Vec<Cell> = all_cells()[..9].to_vec();

        for _ in 0..100 {
            let drawn = sample(&mut rng, 3, &in_play);
            for cell in &drawn {
                assert!(!in_play.contains(cell));
            }
        }
    }

    #[test]
    fn sample_can_exhaust_the_remaining_pool() {
        let mut rng = StdRng::seed_from_u64(3);
        let in_play: Vec<Cell> = all_cells()[..9].to_vec();
        let drawn = sample(&mut rng, DECK_SIZE - 9, &in_play);
        assert_eq!(drawn.len(), DECK_SIZE - 9);
    }

    #[test]
    #[should_panic]
    fn oversampling_is_an_invariant_breach() {
        let mut rng = StdRng::seed_from_u64(4);
        let _ = sample(&mut rng, DECK_SIZE + 1, &[]);
    }
}
