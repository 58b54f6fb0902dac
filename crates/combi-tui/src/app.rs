use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::game::{key_position, EndReason, Game, GameState};
use crate::ui;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Set up panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut game = Game::new();
    let result = run_loop(&mut terminal, &mut game);

    // Clean up terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Expire the round before drawing or reading keys, so no input
        // lands after the budget is spent.
        game.tick();

        terminal.draw(|f| ui::draw(f, game))?;

        // Poll with 250ms timeout for timer updates
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                // Only handle Press events (crossterm sends Press+Release on Windows)
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if handle_key(game, key)? {
                    return Ok(());
                }
            }
        }
    }
}

/// Handle a key event. Returns true if the app should quit.
fn handle_key(game: &mut Game, key: KeyEvent) -> Result<bool, Box<dyn std::error::Error>> {
    // Ctrl+C quits from anywhere, same as a terminal interrupt.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    match game.state {
        GameState::Menu => handle_menu_key(game, key),
        GameState::Playing => handle_playing_key(game, key),
        GameState::Ended => Ok(handle_ended_key(game, key)),
    }
}

fn handle_menu_key(game: &mut Game, key: KeyEvent) -> Result<bool, Box<dyn std::error::Error>> {
    match key.code {
        KeyCode::Up | KeyCode::Left => {
            game.budget = game.budget.prev();
        }
        KeyCode::Down | KeyCode::Right => {
            game.budget = game.budget.next();
        }
        KeyCode::Enter => {
            game.start_round()?;
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            return Ok(true);
        }
        _ => {}
    }
    Ok(false)
}

fn handle_playing_key(game: &mut Game, key: KeyEvent) -> Result<bool, Box<dyn std::error::Error>> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            // Graceful interrupt, not a failure: straight to the final screen.
            game.end(EndReason::Stopped);
        }

        KeyCode::Char(c) => {
            if let Some(pos) = key_position(c) {
                game.toggle_select(pos)?;
            }
        }

        KeyCode::Enter => {
            game.submit_selection()?;
        }

        KeyCode::Backspace | KeyCode::Delete => game.clear_selection(),

        _ => {}
    }
    Ok(false)
}

fn handle_ended_key(game: &mut Game, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter | KeyCode::Char('n') => {
            game.back_to_menu();
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            return true;
        }
        _ => {}
    }
    false
}
