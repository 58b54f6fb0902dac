pub mod cell;
pub mod combination;
pub mod deck;
pub mod grid;

pub use cell::{Cell, Color, Fill, Grid, Shape, GRID_SIZE};
pub use combination::{
    all_combinations, check, find_valid_combinations, is_combination_valid, CheckError,
    Combination, COMBINATION_SIZE,
};
pub use deck::{all_cells, sample, DECK_SIZE};
pub use grid::{generate_initial, regenerate, GridError};
