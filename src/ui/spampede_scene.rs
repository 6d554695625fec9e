//! Spampede game screen.
//!
//! Uses half-block pixel rendering. Each board cell maps to a colored pixel;
//! pairs of vertical pixels are packed into one terminal row using the `▀`
//! (upper half block) character with fg=top, bg=bottom colors. The board's
//! own perimeter walls act as the frame.
//!
//! ```text
//! ┌─ Spampede ─────────────────────┬─ Info ─────────────┐
//! │   [board]                      │  mode, length, ... │
//! │ [status + controls, 2 lines]   │  legend            │
//! └────────────────────────────────┴────────────────────┘
//! ```

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use spampede::core::{CellKind, CollisionCause, ControlMode, Position, SpampedeGame};

const HALF_TOP: char = '\u{2580}'; // ▀ fg fills top half, bg fills bottom half
const FULL_BLOCK: char = '\u{2588}'; // █

const HEAD_COLOR: Color = Color::Rgb(100, 255, 100);
const BODY_BRIGHT: (f64, f64, f64) = (50.0, 220.0, 50.0);
const BODY_DIM: (f64, f64, f64) = (20.0, 80.0, 20.0);
const WALL_COLOR: Color = Color::Rgb(90, 90, 110);
const EMPTY_BG: Color = Color::Rgb(12, 12, 18);

const INFO_WIDTH: u16 = 22;
const STATUS_HEIGHT: u16 = 2;
const BANNER_HEIGHT: u16 = 4;

const RUNNING_KEYS: &[(&str, &str)] = &[
    ("[r]", "Reverse"),
    ("[a/m]", "AI/Manual"),
    ("[s]", "Spam!"),
    ("[q]", "Quit"),
];
const GAME_OVER_KEYS: &[(&str, &str)] = &[("[n]", "New game"), ("[q]", "Quit")];

/// Where each part of the screen goes, inside the outer border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScreenAreas {
    board: Rect,
    status: Rect,
    info: Rect,
}

fn split_screen(inner: Rect) -> ScreenAreas {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(INFO_WIDTH)])
        .split(inner);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(STATUS_HEIGHT)])
        .split(columns[0]);
    ScreenAreas {
        board: left[0],
        status: left[1],
        info: columns[1],
    }
}

/// Border and status color: green while steering by hand, yellow on
/// autopilot, red once the game is over.
fn phase_color(game: &SpampedeGame) -> Color {
    if game.is_game_over() {
        return Color::Red;
    }
    match game.mode() {
        ControlMode::Manual => Color::LightGreen,
        ControlMode::Ai => Color::Yellow,
    }
}

fn status_text(game: &SpampedeGame) -> &'static str {
    if game.is_game_over() {
        return "Game over";
    }
    match game.mode() {
        ControlMode::Manual => "Steer with i j k l",
        ControlMode::Ai => "Hunting spam...",
    }
}

fn key_hints(game: &SpampedeGame) -> &'static [(&'static str, &'static str)] {
    if game.is_game_over() {
        GAME_OVER_KEYS
    } else {
        RUNNING_KEYS
    }
}

/// Render the whole game screen. `last_cause` is how the last game ended.
pub fn render_spampede_scene(
    frame: &mut Frame,
    area: Rect,
    game: &SpampedeGame,
    last_cause: Option<CollisionCause>,
) {
    frame.render_widget(Clear, area);
    let outer = Block::default()
        .title(" Spampede ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(phase_color(game)));
    let areas = split_screen(outer.inner(area));
    frame.render_widget(outer, area);

    render_play_field(frame, areas.board, game);
    render_status(frame, areas.status, game);
    render_info_panel(frame, areas.info, game);

    if game.is_game_over() {
        render_game_over(frame, areas.board, game, last_cause);
    }
}

/// Calculate interpolated RGB color for a snake body segment.
fn body_color(index: usize, snake_len: usize) -> Color {
    let t = index as f64 / (snake_len - 1).max(1) as f64;
    let r = (BODY_BRIGHT.0 * (1.0 - t) + BODY_DIM.0 * t) as u8;
    let g = (BODY_BRIGHT.1 * (1.0 - t) + BODY_DIM.1 * t) as u8;
    let b = (BODY_BRIGHT.2 * (1.0 - t) + BODY_DIM.2 * t) as u8;
    Color::Rgb(r, g, b)
}

/// Pulsing orange-red for spam, keyed off the tick counter.
fn spam_color(tick: u64) -> Color {
    let pulse = ((tick % 20) as f64 / 20.0 * std::f64::consts::PI * 2.0).sin();
    let g = (80.0 + pulse * 30.0) as u8;
    let b = (40.0 + pulse * 20.0) as u8;
    Color::Rgb(255, g, b)
}

/// Color grid for the board, indexed `[row][col]`.
fn board_pixels(game: &SpampedeGame) -> Vec<Vec<Color>> {
    let board = game.board();
    let spam = spam_color(game.tick_count());
    let mut pixels: Vec<Vec<Color>> = (0..board.rows())
        .map(|row| {
            (0..board.cols())
                .map(|col| match board.kind(Position::new(row, col)) {
                    CellKind::Wall => WALL_COLOR,
                    CellKind::Spam => spam,
                    CellKind::Open | CellKind::Body => EMPTY_BG,
                })
                .collect()
        })
        .collect();

    let snake = game.snake();
    for (i, seg) in snake.body().iter().enumerate() {
        if let Some(cell) = pixels.get_mut(seg.row).and_then(|r| r.get_mut(seg.col)) {
            *cell = if i == 0 {
                HEAD_COLOR
            } else {
                body_color(i, snake.len())
            };
        }
    }
    pixels
}

/// Render the board using half-block pixels, centered in `area`.
fn render_play_field(frame: &mut Frame, area: Rect, game: &SpampedeGame) {
    if area.height < 3 || area.width < 5 {
        return;
    }

    let pixels = board_pixels(game);
    let grid_w = game.board().cols();
    let content_rows = pixels.len().div_ceil(2);
    let render_w = (grid_w as u16).min(area.width);
    let x_off = area.x + area.width.saturating_sub(render_w) / 2;

    let empty_row = vec![EMPTY_BG; grid_w];
    for term_row in 0..content_rows {
        let row_y = area.y + term_row as u16;
        if row_y >= area.y + area.height {
            break;
        }
        let top_row = &pixels[term_row * 2];
        let bot_row = pixels.get(term_row * 2 + 1).unwrap_or(&empty_row);

        // Batch consecutive cells with the same style
        let mut spans: Vec<Span> = Vec::new();
        let mut cur_fg = Color::Reset;
        let mut cur_bg = Color::Reset;
        let mut cur_text = String::new();

        for (&fg, &bg) in top_row.iter().zip(bot_row.iter()) {
            if fg != cur_fg || bg != cur_bg {
                if !cur_text.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut cur_text),
                        Style::default().fg(cur_fg).bg(cur_bg),
                    ));
                }
                cur_fg = fg;
                cur_bg = bg;
            }
            cur_text.push(HALF_TOP);
        }
        if !cur_text.is_empty() {
            spans.push(Span::styled(
                cur_text,
                Style::default().fg(cur_fg).bg(cur_bg),
            ));
        }

        let line = Paragraph::new(Line::from(spans));
        frame.render_widget(line, Rect::new(x_off, row_y, render_w, 1));
    }
}

/// Status message on the first line, key hints on the second.
fn render_status(frame: &mut Frame, area: Rect, game: &SpampedeGame) {
    if area.height == 0 {
        return;
    }
    let status = Paragraph::new(status_text(game))
        .style(Style::default().fg(phase_color(game)))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height < STATUS_HEIGHT {
        return;
    }
    let mut spans = Vec::new();
    for (i, (key, action)) in key_hints(game).iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let hints = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(
        hints,
        Rect {
            y: area.y + 1,
            height: 1,
            ..area
        },
    );
}

/// Render the info panel on the right side.
fn render_info_panel(frame: &mut Frame, area: Rect, game: &SpampedeGame) {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let config = game.config();
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);

    let lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Mode: ", label),
            Span::styled(game.mode().name(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled("Length: ", label),
            Span::styled(
                game.snake().len().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Spam: ", label),
            Span::styled(game.board().food_count().to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Tick: ", label),
            Span::styled(game.tick_count().to_string(), value),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Grid: ", label),
            Span::styled(format!("{}x{}", config.cols, config.rows), value),
        ]),
        Line::from(vec![
            Span::styled("Step: ", label),
            Span::styled(
                format!("{}ms", config.tick_interval_ms * config.movement_cadence),
                value,
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Legend:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        legend_line(HEAD_COLOR, "Head"),
        legend_line(
            Color::Rgb(
                BODY_BRIGHT.0 as u8,
                BODY_BRIGHT.1 as u8,
                BODY_BRIGHT.2 as u8,
            ),
            "Body",
        ),
        legend_line(Color::Rgb(255, 80, 40), "Spam"),
        legend_line(WALL_COLOR, "Wall"),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn legend_line(color: Color, name: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {FULL_BLOCK} "), Style::default().fg(color)),
        Span::styled(name, Style::default().fg(Color::DarkGray)),
    ])
}

fn game_over_message(cause: Option<CollisionCause>, growth: usize) -> String {
    let how = match cause {
        Some(CollisionCause::Wall) => "The spampede hit a wall",
        Some(CollisionCause::Body) => "The spampede bit itself",
        Some(CollisionCause::NoLegalMove) => "The spampede had nowhere to go",
        None => "The spampede stopped",
    };
    format!("{how} after eating {growth} spam.")
}

/// Banner over the bottom of the board. The final board stays visible above it.
fn render_game_over(
    frame: &mut Frame,
    area: Rect,
    game: &SpampedeGame,
    cause: Option<CollisionCause>,
) {
    let height = BANNER_HEIGHT.min(area.height);
    let banner = Rect {
        y: area.y + area.height - height,
        height,
        ..area
    };
    frame.render_widget(Clear, banner);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(banner);
    frame.render_widget(block, banner);

    let message = Line::from(vec![
        Span::styled(
            "SPLAT",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" - "),
        Span::styled(
            game_over_message(cause, game.growth()),
            Style::default().fg(Color::White),
        ),
    ]);
    frame.render_widget(Paragraph::new(message).alignment(Alignment::Center), inner);
}
