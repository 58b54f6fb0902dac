use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    Square,
    Triangle,
    Circle,
}

impl Shape {
    pub fn all() -> &'static [Shape] {
        &[Shape::Square, Shape::Triangle, Shape::Circle]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
}

impl Color {
    pub fn all() -> &'static [Color] {
        &[Color::Red, Color::Green, Color::Blue]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fill {
    Full,
    Half,
    Empty,
}

impl Fill {
    pub fn all() -> &'static [Fill] {
        &[Fill::Full, Fill::Half, Fill::Empty]
    }
}

/// One card face: three independent attributes, three values each.
/// Equality is structural, so exactly 27 distinct cells exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub shape: Shape,
    pub color: Color,
    pub fill: Fill,
}

pub const GRID_SIZE: usize = 9;

/// The 9 cells in play, positionally addressed 0..8.
/// Always mutually distinct while the game is playable.
pub type Grid = [Cell; GRID_SIZE];
