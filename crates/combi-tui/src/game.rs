use std::time::{Duration, Instant};

use combi_core::{check, generate_initial, regenerate, Combination, Grid, GridError};

/// Fixed key label per grid position, left to right, top to bottom.
/// The right-hand home block plus the row below it, so a triple can be
/// typed without moving the hand.
pub const KEYS: [char; 9] = ['u', 'i', 'o', 'j', 'k', 'l', 'm', ',', '.'];

/// Grid position for a label key, if the character is one.
pub fn key_position(c: char) -> Option<usize> {
    KEYS.iter().position(|&k| k == c)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeBudget {
    Short,
    Standard,
    Long,
}

impl TimeBudget {
    pub fn label(&self) -> &str {
        match self {
            TimeBudget::Short => "1:00",
            TimeBudget::Standard => "2:00",
            TimeBudget::Long => "5:00",
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            TimeBudget::Short => Duration::from_secs(60),
            TimeBudget::Standard => Duration::from_secs(120),
            TimeBudget::Long => Duration::from_secs(300),
        }
    }

    pub fn next(&self) -> TimeBudget {
        match self {
            TimeBudget::Short => TimeBudget::Standard,
            TimeBudget::Standard => TimeBudget::Long,
            TimeBudget::Long => TimeBudget::Short,
        }
    }

    pub fn prev(&self) -> TimeBudget {
        match self {
            TimeBudget::Short => TimeBudget::Long,
            TimeBudget::Standard => TimeBudget::Short,
            TimeBudget::Long => TimeBudget::Standard,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Menu,
    Playing,
    Ended,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    TimeUp,
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Message {
    None,
    Found,
    Wrong,
    InvalidInput,
}

impl Message {
    pub fn label(&self) -> &str {
        match self {
            Message::None => "",
            Message::Found => "OK!",
            Message::Wrong => "WRONG!",
            Message::InvalidInput => "INVALID INPUT!",
        }
    }
}

/// One timed round: the grid in play plus everything counted against it.
pub struct Round {
    pub grid: Grid,
    pub valid_combinations: Vec<Combination>,
    pub found: u32,
    pub started: Instant,
    pub selection: Vec<usize>,
    pub message: Message,
}

pub struct Game {
    pub state: GameState,
    pub budget: TimeBudget,
    pub round: Option<Round>,
    pub end_reason: EndReason,
}

impl Game {
    pub fn new() -> Self {
        Self {
            state: GameState::Menu,
            budget: TimeBudget::Standard,
            round: None,
            end_reason: EndReason::TimeUp,
        }
    }

    pub fn start_round(&mut self) -> Result<(), GridError> {
        let mut rng = rand::rng();
        let (grid, valid_combinations) = generate_initial(&mut rng)?;

        self.round = Some(Round {
            grid,
            valid_combinations,
            found: 0,
            started: Instant::now(),
            selection: Vec::new(),
            message: Message::None,
        });
        self.state = GameState::Playing;
        Ok(())
    }

    pub fn back_to_menu(&mut self) {
        self.round = None;
        self.state = GameState::Menu;
    }

    /// Remaining time in the current round, zero once the budget is spent.
    pub fn time_left(&self) -> Duration {
        match &self.round {
            Some(round) => self.budget.duration().saturating_sub(round.started.elapsed()),
            None => self.budget.duration(),
        }
    }

    /// `M:SS`, floored, so the display never exceeds the true remainder.
    pub fn format_time_left(&self) -> String {
        let secs = self.time_left().as_secs();
        format!("{}:{:02}", secs / 60, secs % 60)
    }

    /// Called every loop iteration: the round ends within one poll
    /// interval of the budget elapsing, input or no input.
    pub fn tick(&mut self) {
        if self.state == GameState::Playing && self.time_left().is_zero() {
            self.end(EndReason::TimeUp);
        }
    }

    pub fn end(&mut self, reason: EndReason) {
        self.state = GameState::Ended;
        self.end_reason = reason;
        if let Some(round) = &mut self.round {
            round.selection.clear();
        }
    }

    /// Toggle a cell in or out of the selection. The third selected
    /// cell submits the triple immediately.
    pub fn toggle_select(&mut self, pos: usize) -> Result<(), GridError> {
        if self.state != GameState::Playing {
            return Ok(());
        }
        let Some(round) = &mut self.round else {
            return Ok(());
        };

        round.message = Message::None;
        if let Some(i) = round.selection.iter().position(|&p| p == pos) {
            round.selection.remove(i);
            return Ok(());
        }
        round.selection.push(pos);

        if round.selection.len() == 3 {
            return self.submit_selection();
        }
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        if let Some(round) = &mut self.round {
            round.selection.clear();
            round.message = Message::None;
        }
    }

    /// Evaluate whatever is selected. Anything other than 3 distinct
    /// positions is malformed input; a wrong triple leaves the grid
    /// unchanged; a valid one replaces the matched cells.
    pub fn submit_selection(&mut self) -> Result<(), GridError> {
        if self.state != GameState::Playing {
            return Ok(());
        }
        let Some(round) = &mut self.round else {
            return Ok(());
        };

        match check(&round.grid, &round.selection) {
            Ok(true) => {
                let mut matched: Combination =
                    [round.selection[0], round.selection[1], round.selection[2]];
                matched.sort();

                let mut rng = rand::rng();
                let (grid, valid_combinations) = regenerate(&mut rng, &round.grid, &matched)?;

                round.grid = grid;
                round.valid_combinations = valid_combinations;
                round.found += 1;
                round.message = Message::Found;
            }
            Ok(false) => {
                round.message = Message::Wrong;
            }
            Err(_) => {
                round.message = Message::InvalidInput;
            }
        }
        round.selection.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combi_core::{all_cells, find_valid_combinations};

    /// First 9 deck cells: [0, 1, 2] is a valid combination
    /// (same shape, same color, fills all different).
    fn fixture_round() -> Round {
        let cells = all_cells();
        let grid: Grid = std::array::from_fn(|i| cells[i]);
        let valid_combinations = find_valid_combinations(&grid);
        Round {
            grid,
            valid_combinations,
            found: 0,
            started: Instant::now(),
            selection: Vec::new(),
            message: Message::None,
        }
    }

    fn playing_game() -> Game {
        let mut game = Game::new();
        game.round = Some(fixture_round());
        game.state = GameState::Playing;
        game
    }

    #[test]
    fn budget_cycling_wraps_both_ways() {
        let mut budget = TimeBudget::Standard;
        for _ in 0..3 {
            budget = budget.next();
        }
        assert_eq!(budget, TimeBudget::Standard);
        for _ in 0..3 {
            budget = budget.prev();
        }
        assert_eq!(budget, TimeBudget::Standard);
    }

    #[test]
    fn toggling_a_selected_cell_deselects_it() {
        let mut game = playing_game();
        game.toggle_select(4).unwrap();
        game.toggle_select(7).unwrap();
        game.toggle_select(4).unwrap();
        assert_eq!(game.round.as_ref().unwrap().selection, vec![7]);
    }

    #[test]
    fn third_selection_submits_a_valid_triple() {
        let mut game = playing_game();
        let old_grid = game.round.as_ref().unwrap().grid;

        game.toggle_select(2).unwrap();
        game.toggle_select(0).unwrap();
        game.toggle_select(1).unwrap();

        let round = game.round.as_ref().unwrap();
        assert_eq!(round.message, Message::Found);
        assert_eq!(round.found, 1);
        assert!(round.selection.is_empty());
        assert!(!round.valid_combinations.is_empty());

        // Matched positions replaced with cells from outside the old grid.
        for pos in [0, 1, 2] {
            assert!(!old_grid.contains(&round.grid[pos]));
        }
        for pos in 3..9 {
            assert_eq!(round.grid[pos], old_grid[pos]);
        }
    }

    #[test]
    fn wrong_triple_leaves_the_grid_unchanged() {
        let mut game = playing_game();
        let old_grid = game.round.as_ref().unwrap().grid;

        // (Sq,R,Full), (Sq,R,Half), (Sq,G,Full): one matching pair on
        // both color and fill.
        game.toggle_select(0).unwrap();
        game.toggle_select(1).unwrap();
        game.toggle_select(3).unwrap();

        let round = game.round.as_ref().unwrap();
        assert_eq!(round.message, Message::Wrong);
        assert_eq!(round.found, 0);
        assert_eq!(round.grid, old_grid);
        assert!(round.selection.is_empty());
    }

    #[test]
    fn submitting_a_short_selection_is_malformed_input() {
        let mut game = playing_game();
        game.toggle_select(0).unwrap();
        game.submit_selection().unwrap();

        let round = game.round.as_ref().unwrap();
        assert_eq!(round.message, Message::InvalidInput);
        assert!(round.selection.is_empty());
    }

    #[test]
    fn tick_ends_an_expired_round() {
        let mut game = playing_game();
        let budget = game.budget.duration();
        let Some(expired) = Instant::now().checked_sub(budget) else {
            return; // monotonic clock too close to boot to back-date
        };
        game.round.as_mut().unwrap().started = expired;

        game.tick();
        assert_eq!(game.state, GameState::Ended);
        assert_eq!(game.end_reason, EndReason::TimeUp);
    }

    #[test]
    fn selection_is_ignored_after_the_round_ends() {
        let mut game = playing_game();
        game.end(EndReason::TimeUp);
        game.toggle_select(0).unwrap();
        assert!(game.round.as_ref().unwrap().selection.is_empty());
    }

    #[test]
    fn label_keys_cover_all_9_positions() {
        for (pos, &key) in KEYS.iter().enumerate() {
            assert_eq!(key_position(key), Some(pos));
        }
        assert_eq!(key_position('q'), None);
    }
}
