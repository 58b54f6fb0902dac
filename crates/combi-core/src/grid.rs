use rand::RngExt;
use thiserror::Error;

use crate::cell::{Grid, GRID_SIZE};
use crate::combination::{find_valid_combinations, Combination};
use crate::deck;

/// Valid 9-cell grids are common, so rejection sampling converges
/// almost immediately. The bound exists so a broken validity rule
/// fails loudly instead of spinning forever.
pub const MAX_ATTEMPTS: usize = 10_000;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("no grid with a valid combination after {0} attempts")]
    AttemptsExhausted(usize),
}

/// Sample 9 distinct cells from the deck until the grid contains at
/// least one valid combination. Returns the grid together with its
/// valid-combination list so the caller never recomputes it.
pub fn generate_initial<R: RngExt>(rng: &mut R) -> Result<(Grid, Vec<Combination>), GridError> {
    for _ in 0..MAX_ATTEMPTS {
        let drawn = deck::sample(rng, GRID_SIZE, &[]);
        let grid: Grid = std::array::from_fn(|i| drawn[i]);

        let valid = find_valid_combinations(&grid);
        if !valid.is_empty() {
            return Ok((grid, valid));
        }
    }
    Err(GridError::AttemptsExhausted(MAX_ATTEMPTS))
}

/// Replace the matched positions with fresh cells drawn from the
/// unused pool (everything outside the current grid, the matched cells
/// included — they are leaving play). Redraws until the new grid has
/// at least one valid combination.
pub fn regenerate<R: RngExt>(
    rng: &mut R,
    grid: &Grid,
    matched: &Combination,
) -> Result<(Grid, Vec<Combination>), GridError> {
    for _ in 0..MAX_ATTEMPTS {
        let fresh = deck::sample(rng, matched.len(), grid);

        let mut next = *grid;
        for (&pos, &cell) in matched.iter().zip(fresh.iter()) {
            next[pos] = cell;
        }

        let valid = find_valid_combinations(&next);
        if !valid.is_empty() {
            return Ok((next, valid));
        }
    }
    Err(GridError::AttemptsExhausted(MAX_ATTEMPTS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn initial_grid_has_9_distinct_cells_and_a_valid_combination() {
        for seed in 0..1000 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (grid, valid) = generate_initial(&mut rng).unwrap();

            let distinct: HashSet<Cell> = grid.iter().copied().collect();
            assert_eq!(distinct.len(), GRID_SIZE);
            assert!(!valid.is_empty());
        }
    }

    #[test]
    fn regenerate_keeps_unmatched_positions_untouched() {
        let mut rng = StdRng::seed_from_u64(11);
        let (grid, valid) = generate_initial(&mut rng).unwrap();
        let matched = valid[0];

        let (next, _) = regenerate(&mut rng, &grid, &matched).unwrap();
        for pos in 0..GRID_SIZE {
            if !matched.contains(&pos) {
                assert_eq!(next[pos], grid[pos]);
            }
        }
    }

    #[test]
    fn regenerate_replaces_matched_cells_with_unused_ones() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (grid, valid) = generate_initial(&mut rng).unwrap();
            let matched = valid[0];

            let (next, next_valid) = regenerate(&mut rng, &grid, &matched).unwrap();

            // Fresh cells come from outside the old grid entirely.
            for &pos in &matched {
                assert!(!grid.contains(&next[pos]));
            }

            let distinct: HashSet<Cell> = next.iter().copied().collect();
            assert_eq!(distinct.len(), GRID_SIZE);
            assert!(!next_valid.is_empty());
        }
    }
}
