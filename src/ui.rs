//! Terminal UI rendering with ratatui

use crate::board::{BOARD_HEIGHT, BOARD_WIDTH, Cell};
use crate::display::{DisplayConfig, Language};
use crate::game::{Mode, Snapshot};
use crate::input::{KeyBindings, key_to_string};
use crate::menu::{Menu, MenuItem, MenuItemType};
use crate::piece::Piece;
use crate::tetromino::filled_cells;
use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const EMPTY: &str = "  ";

/// Board (10*2 + 2 borders) + side panel
const GAME_WIDTH: u16 = 22 + 20;
/// Board (20) + 2 for borders
const GAME_HEIGHT: u16 = BOARD_HEIGHT as u16 + 2;

const MENU_WIDTH: u16 = 40;
const MENU_HEIGHT: u16 = 16;

/// Render the main menu
pub fn render_menu(frame: &mut Frame, menu: &Menu, display: &DisplayConfig) {
    let menu_area = center_rect(frame.area(), MENU_WIDTH, MENU_HEIGHT);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(6)])
        .split(menu_area);

    let title = Paragraph::new(Line::styled(
        "TERTIS v3.0",
        Style::default().fg(Color::Cyan).bold(),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(ratatui::widgets::BorderType::Double)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(title, layout[0]);

    let block = Block::default()
        .title(format!(" {} ", display.text().title))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let mut lines = vec![Line::raw("")];
    for (i, item) in menu.items.iter().enumerate() {
        lines.push(render_menu_item(item, i == menu.selected));
        lines.push(Line::raw(""));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, layout[1]);
}

fn render_menu_item(item: &MenuItem, is_selected: bool) -> Line<'static> {
    let prefix = if is_selected { "▶ " } else { "  " };
    let text = match &item.item_type {
        MenuItemType::Button(_) => item.label.clone(),
        MenuItemType::Cycle {
            options, current, ..
        } => {
            let value = options.get(*current).map(String::as_str).unwrap_or("");
            // Language codes read better upper-cased
            let value = if Language::from_code(value).is_some() {
                value.to_uppercase()
            } else {
                value.to_string()
            };
            format!("{}: ◀ {} ▶", item.label, value)
        }
    };

    let style = if is_selected {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::styled(format!("{}{}", prefix, text), style)
}

/// Render the game screen from a snapshot
pub fn render_game(
    frame: &mut Frame,
    snapshot: &Snapshot<'_>,
    display: &DisplayConfig,
    keys: &KeyBindings,
) {
    let area = frame.area();
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BOARD_WIDTH as u16 * 2 + 2),
            Constraint::Length(20),
        ])
        .split(game_area);

    render_board(frame, main_layout[0], snapshot, display);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Stats
            Constraint::Length(6), // Next
            Constraint::Min(4),    // Controls
        ])
        .split(main_layout[1]);

    render_stats(frame, right_layout[0], snapshot, display);
    render_next(frame, right_layout[1], snapshot.next, display);
    render_controls(frame, right_layout[2], keys);

    let text = display.text();
    match snapshot.mode {
        Mode::Paused => render_overlay(frame, area, &[text.paused], &[text.press_p, text.press_q]),
        Mode::GameOver => {
            let score = format!("{}: {}", text.score, snapshot.score);
            render_overlay(
                frame,
                area,
                &[text.game_over],
                &[score.as_str(), text.press_q, text.press_enter],
            );
        }
        Mode::Running => {}
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the game board with the falling piece on top
fn render_board(frame: &mut Frame, area: Rect, snapshot: &Snapshot<'_>, display: &DisplayConfig) {
    let block = Block::default()
        .title(" TERTIS ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(ratatui::widgets::BorderType::Double)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let piece = snapshot.current;
    let piece_cells: Vec<(i32, i32)> = piece.cells().collect();

    let lines: Vec<Line> = snapshot
        .board
        .rows()
        .iter()
        .enumerate()
        .map(|(row, cells)| {
            let spans: Vec<Span> = cells
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    if piece_cells.contains(&(col as i32, row as i32)) {
                        return Span::styled(display.block, Style::default().fg(piece.kind.color()));
                    }
                    match cell {
                        Cell::Filled(kind) => {
                            Span::styled(display.block, Style::default().fg(kind.color()))
                        }
                        Cell::Empty => Span::raw(EMPTY),
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render score, level and lines
fn render_stats(frame: &mut Frame, area: Rect, snapshot: &Snapshot<'_>, display: &DisplayConfig) {
    let text = display.text();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let stat = |label: &str, value: String, color: Color| {
        Line::from(vec![
            Span::styled(format!("{}: ", label), Style::default().fg(Color::Gray)),
            Span::styled(value, Style::default().fg(color).bold()),
        ])
    };

    let lines = vec![
        stat(text.score, snapshot.score.to_string(), Color::Yellow),
        Line::raw(""),
        stat(text.level, snapshot.level.to_string(), Color::Cyan),
        Line::raw(""),
        stat(text.lines, snapshot.lines.to_string(), Color::Green),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the next piece preview
fn render_next(frame: &mut Frame, area: Rect, next: &Piece, display: &DisplayConfig) {
    let block = Block::default()
        .title(format!(" {} ", display.text().next))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let shape = next.shape();
    let cells: Vec<(i32, i32)> = filled_cells(shape).collect();
    let style = Style::default().fg(next.kind.color());

    let lines: Vec<Line> = (0..shape.len() as i32)
        .map(|row| {
            let spans: Vec<Span> = (0..shape[row as usize].len() as i32)
                .map(|col| {
                    if cells.contains(&(col, row)) {
                        Span::styled(display.block, style)
                    } else {
                        Span::raw(EMPTY)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Key hints, built from the active bindings
fn render_controls(frame: &mut Frame, area: Rect, keys: &KeyBindings) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let moves = [keys.move_left.as_slice(), keys.move_right.as_slice()].concat();
    let lines = vec![
        key_hint("move", &moves),
        key_hint("turn", &keys.rotate),
        key_hint("down", &keys.soft_drop),
        key_hint("drop", &keys.hard_drop),
        key_hint("pause", &keys.pause),
        key_hint("quit", &keys.quit),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn key_hint(label: &str, codes: &[KeyCode]) -> Line<'static> {
    let names: Vec<String> = codes.iter().map(|code| key_to_string(*code)).collect();
    Line::from(vec![
        Span::styled(format!("{:<6}", label), Style::default().fg(Color::DarkGray)),
        Span::styled(names.join("/"), Style::default().fg(Color::Gray)),
    ])
}

/// Render an overlay (for pause/game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &[&str], subtitle: &[&str]) {
    let popup_width = 28u16;
    let popup_height = (title.len() + subtitle.len()) as u16 + 3;
    let popup_area = center_rect(area, popup_width, popup_height);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut text: Vec<Line> = title
        .iter()
        .map(|t| Line::styled(t.to_string(), Style::default().fg(Color::Yellow).bold()))
        .collect();
    text.push(Line::raw(""));
    text.extend(
        subtitle
            .iter()
            .map(|s| Line::styled(s.to_string(), Style::default().fg(Color::Gray))),
    );

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
