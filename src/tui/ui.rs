//! Stateless UI rendering for the tile grid.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use strictly_2048::{GridState, Score, Tile};

use super::app::App;

const CELL_WIDTH: u16 = 8;
const CELL_HEIGHT: u16 = 3;

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App, grid: &GridState, score: Score) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title + score
            Constraint::Min(0),    // Grid
            Constraint::Length(3), // Status
            Constraint::Length(3), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new(format!(
        "Strictly 2048    Score: {}    Moves: {}    Last gain: {}",
        score,
        app.moves(),
        app.last_gain()
    ))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    draw_grid(frame, chunks[1], grid);

    let status_style = if app.game_over() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let status = Paragraph::new(app.status_message())
        .style(status_style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, chunks[2]);

    let help = Paragraph::new("Arrows/WASD/hjkl: Move | R: New game | Q: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[3]);
}

/// Draws the grid with row 0 at the top and column 0 on the left.
fn draw_grid(frame: &mut Frame, area: Rect, grid: &GridState) {
    let n = grid.dimension() as u16;
    let grid_area = center_rect(area, n * CELL_WIDTH, n * CELL_HEIGHT);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CELL_HEIGHT); n as usize])
        .split(grid_area);

    for (row, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(CELL_WIDTH); n as usize])
            .split(*row_area);

        for (column, cell_area) in cols.iter().enumerate() {
            let value = grid.get(column, row).unwrap_or(0);
            draw_cell(frame, *cell_area, value);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, value: Tile) {
    let label = if value == 0 {
        String::new()
    } else {
        value.to_string()
    };

    let style = Style::default()
        .fg(Color::Black)
        .bg(tile_color(value))
        .add_modifier(Modifier::BOLD);

    let paragraph = Paragraph::new(Line::from(Span::styled(label, style)))
        .style(style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(paragraph, area);
}

/// Background color for a tile value.
fn tile_color(value: Tile) -> Color {
    match value {
        0 => Color::Rgb(205, 193, 180),
        2 => Color::Rgb(238, 228, 218),
        4 => Color::Rgb(237, 224, 200),
        8 => Color::Rgb(242, 177, 121),
        16 => Color::Rgb(245, 149, 99),
        32 => Color::Rgb(246, 124, 95),
        64 => Color::Rgb(246, 94, 59),
        128 => Color::Rgb(237, 207, 114),
        256 => Color::Rgb(237, 204, 97),
        512 => Color::Rgb(237, 200, 80),
        1024 => Color::Rgb(237, 197, 63),
        2048 => Color::Rgb(237, 194, 46),
        _ => Color::Rgb(60, 58, 50),
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
