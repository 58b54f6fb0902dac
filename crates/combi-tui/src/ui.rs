use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph},
    Frame,
};

use combi_core::{Cell, Fill, Shape};
use combi_core::Color as CellColor;

use crate::game::{EndReason, Game, GameState, Message, Round, KEYS};

// ── Public entry point ───────────────────────────────────────────────────────

pub fn draw(f: &mut Frame, game: &Game) {
    match game.state {
        GameState::Menu => draw_menu(f, game),
        GameState::Playing => draw_playing(f, game),
        GameState::Ended => draw_ended(f, game),
    }
}

// ── Cell appearance ──────────────────────────────────────────────────────────

/// Unicode glyph for a cell: one of nine shape/fill forms.
fn glyph(cell: Cell) -> &'static str {
    match (cell.shape, cell.fill) {
        (Shape::Square, Fill::Full) => "■",
        (Shape::Square, Fill::Half) => "◧",
        (Shape::Square, Fill::Empty) => "□",
        (Shape::Triangle, Fill::Full) => "▲",
        (Shape::Triangle, Fill::Half) => "◭",
        (Shape::Triangle, Fill::Empty) => "△",
        (Shape::Circle, Fill::Full) => "●",
        (Shape::Circle, Fill::Half) => "◐",
        (Shape::Circle, Fill::Empty) => "○",
    }
}

fn glyph_color(cell: Cell) -> Color {
    match cell.color {
        CellColor::Red => Color::Red,
        CellColor::Green => Color::Green,
        CellColor::Blue => Color::Blue,
    }
}

// ── Menu screen ──────────────────────────────────────────────────────────────

fn draw_menu(f: &mut Frame, game: &Game) {
    let area = f.area();

    let chunks = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(4),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(7),
        Constraint::Min(0),
    ])
    .split(center_rect(60, 20, area));

    let title = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Search ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled("for ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::styled(
                "Combinations!",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Pick 3 cells: each attribute all same or all different.",
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[1]);

    let selector_line = Line::from(vec![
        Span::styled("◄  ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("  {}  ", game.budget.label()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ►", Style::default().fg(Color::DarkGray)),
    ]);
    let selector = Paragraph::new(vec![
        Line::from(Span::styled("Time budget", Style::default().fg(Color::White))),
        Line::from(""),
        selector_line,
    ])
    .alignment(Alignment::Center);
    f.render_widget(selector, chunks[3]);

    let controls = Paragraph::new(vec![
        Line::from(Span::styled(
            "Controls",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("←/→", Style::default().fg(Color::Yellow)),
            Span::styled("  Change time budget", Style::default().fg(Color::Gray)),
        ]),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::styled("  Start game", Style::default().fg(Color::Gray)),
        ]),
        Line::from(vec![
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::styled("  Quit", Style::default().fg(Color::Gray)),
        ]),
    ])
    .alignment(Alignment::Center);
    f.render_widget(controls, chunks[5]);
}

// ── Playing screen ───────────────────────────────────────────────────────────

fn draw_playing(f: &mut Frame, game: &Game) {
    let Some(round) = &game.round else {
        return;
    };

    let area = f.area();

    let outer = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);
    let main_area = outer[0];
    let bottom_area = outer[1];

    let h_chunks = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(18),
        Constraint::Length(2),
        Constraint::Length(26),
        Constraint::Min(0),
    ])
    .split(main_area);

    let grid_v = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(9),
        Constraint::Min(0),
    ])
    .split(h_chunks[1]);

    draw_grid(f, round, grid_v[1]);

    let panel_v = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(11),
        Constraint::Min(0),
    ])
    .split(h_chunks[3]);

    draw_info_panel(f, game, round, panel_v[1]);

    draw_key_hints(f, bottom_area);
}

// ── Grid rendering ───────────────────────────────────────────────────────────

fn draw_grid(f: &mut Frame, round: &Round, area: Rect) {
    let mut lines: Vec<Line> = vec![Line::from("")];

    for row in 0..3 {
        let mut spans: Vec<Span> = vec![Span::raw(" ")];

        for col in 0..3 {
            let pos = row * 3 + col;
            let cell = round.grid[pos];
            let selected = round.selection.contains(&pos);

            let label_style = if selected {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let cell_style = if selected {
                Style::default().fg(glyph_color(cell)).bg(Color::Yellow)
            } else {
                Style::default().fg(glyph_color(cell))
            };

            spans.push(Span::styled(KEYS[pos].to_string(), label_style));
            spans.push(Span::styled(glyph(cell), cell_style));
            if col < 2 {
                spans.push(Span::raw("  "));
            }
        }

        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    let block = Block::bordered()
        .title(" Grid ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::White));

    let grid_paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(grid_paragraph, area);
}

// ── Info panel ───────────────────────────────────────────────────────────────

fn draw_info_panel(f: &mut Frame, game: &Game, round: &Round, area: Rect) {
    let block = Block::bordered()
        .title(" Info ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::White));

    let picked: String = round
        .selection
        .iter()
        .map(|&pos| format!("{} ", KEYS[pos]))
        .collect();

    let message_style = match round.message {
        Message::Found => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Message::Wrong => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Message::InvalidInput => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        Message::None => Style::default(),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(" Found:     ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", round.found),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Time left: ", Style::default().fg(Color::Gray)),
            Span::styled(
                game.format_time_left(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Available: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", round.valid_combinations.len()),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Picked:    ", Style::default().fg(Color::Gray)),
            Span::styled(picked, Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw(" "),
            Span::styled(round.message.label(), message_style),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(block);
    f.render_widget(paragraph, area);
}

// ── Key hints (bottom status bar) ────────────────────────────────────────────

fn draw_key_hints(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::styled(" u i o j k l m , .", Style::default().fg(Color::Yellow)),
        Span::styled(" Pick  ", Style::default().fg(Color::Gray)),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::styled(" Submit  ", Style::default().fg(Color::Gray)),
        Span::styled("Bksp", Style::default().fg(Color::Yellow)),
        Span::styled(" Clear  ", Style::default().fg(Color::Gray)),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::styled(" Stop", Style::default().fg(Color::Gray)),
    ]);

    let bar = Paragraph::new(hints).style(Style::default().bg(Color::DarkGray));
    f.render_widget(bar, area);
}

// ── Final screen ─────────────────────────────────────────────────────────────

fn draw_ended(f: &mut Frame, game: &Game) {
    let area = f.area();

    let bg = Paragraph::new("").style(Style::default().bg(Color::Black));
    f.render_widget(bg, area);

    let popup = center_rect(40, 11, area);
    f.render_widget(Clear, popup);

    let (title, headline) = match game.end_reason {
        EndReason::TimeUp => (" Time's up! ", "No time left!"),
        EndReason::Stopped => (" Stopped ", "Stopped."),
    };

    let found = game.round.as_ref().map(|r| r.found).unwrap_or(0);

    let block = Block::bordered()
        .title(title)
        .border_type(BorderType::Double)
        .style(Style::default().fg(Color::Green));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            headline,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Found:  ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{} combinations", found),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Budget: ", Style::default().fg(Color::Gray)),
            Span::styled(game.budget.label(), Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter for new game, Q to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(block)
    .alignment(Alignment::Center);

    f.render_widget(text, popup);
}

// ── Layout helpers ───────────────────────────────────────────────────────────

fn center_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vert = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(height),
        Constraint::Min(0),
    ])
    .split(area);

    let horiz = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(width),
        Constraint::Min(0),
    ])
    .split(vert[1]);

    horiz[1]
}
