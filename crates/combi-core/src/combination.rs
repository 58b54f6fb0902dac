use thiserror::Error;

use crate::cell::{Cell, Grid, GRID_SIZE};

pub const COMBINATION_SIZE: usize = 3;

/// An unordered triple of grid positions, stored with indices ascending
/// so each of the C(9,3) = 84 triples has one canonical form.
pub type Combination = [usize; COMBINATION_SIZE];

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error("expected exactly 3 positions, got {0}")]
    WrongCount(usize),
    #[error("position {0} picked more than once")]
    DuplicatePosition(usize),
    #[error("position {0} is outside the grid")]
    OutOfRange(usize),
}

/// All 84 ascending index-triples over the 9 grid positions.
pub fn all_combinations() -> Vec<Combination> {
    let mut combinations = Vec::with_capacity(84);
    for i in 0..GRID_SIZE {
        for j in i + 1..GRID_SIZE {
            for k in j + 1..GRID_SIZE {
                combinations.push([i, j, k]);
            }
        }
    }
    combinations
}

/// For one attribute, the three values must be all identical or all
/// pairwise different. With a 3-valued attribute that rules out
/// exactly the "one matching pair" case.
fn attribute_ok<T: PartialEq>(a: T, b: T, c: T) -> bool {
    let all_same = a == b && b == c;
    let all_different = a != b && b != c && a != c;
    all_same || all_different
}

/// A triple of cells is valid iff every attribute independently passes
/// the all-same-or-all-different rule. Symmetric in its arguments.
pub fn is_combination_valid(a: Cell, b: Cell, c: Cell) -> bool {
    attribute_ok(a.shape, b.shape, c.shape)
        && attribute_ok(a.color, b.color, c.color)
        && attribute_ok(a.fill, b.fill, c.fill)
}

/// Every valid combination on the grid, in ascending triple order.
pub fn find_valid_combinations(grid: &Grid) -> Vec<Combination> {
    all_combinations()
        .into_iter()
        .filter(|&[i, j, k]| is_combination_valid(grid[i], grid[j], grid[k]))
        .collect()
}

/// Check a player-chosen triple: exactly 3 distinct in-range positions,
/// then the validity rule on the cells at those positions.
pub fn check(grid: &Grid, positions: &[usize]) -> Result<bool, CheckError> {
    if positions.len() != COMBINATION_SIZE {
        return Err(CheckError::WrongCount(positions.len()));
    }
    for (i, &pos) in positions.iter().enumerate() {
        if pos >= GRID_SIZE {
            return Err(CheckError::OutOfRange(pos));
        }
        if positions[..i].contains(&pos) {
            return Err(CheckError::DuplicatePosition(pos));
        }
    }
    Ok(is_combination_valid(
        grid[positions[0]],
        grid[positions[1]],
        grid[positions[2]],
    ))
}
