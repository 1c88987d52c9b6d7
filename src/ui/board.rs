use super::UiState;
use merge_clinic::core::session::Session;
use merge_clinic::view::CellView;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draws the grid, one bordered box per cell.
pub fn draw_board(frame: &mut Frame, area: Rect, session: &Session, ui: &UiState) {
    let rows = session.rules.balance.rows;
    let cols = session.rules.balance.cols;
    if rows == 0 || cols == 0 {
        return;
    }

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    for (row, row_area) in row_areas.iter().enumerate() {
        let cell_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, cols as u32); cols])
            .split(*row_area);
        for (col, cell_area) in cell_areas.iter().enumerate() {
            let index = row * cols + col;
            draw_cell(frame, *cell_area, session.cell(index), index, ui);
        }
    }
}

/// One-based tier label, e.g. "T3" or "T5 max".
fn tier_label(tier: u8, can_upgrade: bool) -> String {
    let shown = u16::from(tier) + 1;
    if can_upgrade {
        format!("T{}", shown)
    } else {
        format!("T{} max", shown)
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, cell: CellView, index: usize, ui: &UiState) {
    let border_color = if ui.picked == Some(index) {
        Color::Cyan
    } else if ui.cursor == index {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let mut border_style = Style::default().fg(border_color);
    if ui.cursor == index {
        border_style = border_style.add_modifier(Modifier::BOLD);
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines = match cell {
        CellView::Locked => vec![Line::from("🔒")],
        CellView::Empty => vec![Line::from("·")],
        CellView::Occupied {
            tier,
            name,
            icon,
            can_upgrade,
            ..
        } => {
            vec![
                Line::from(icon),
                Line::from(name),
                Line::styled(tier_label(tier, can_upgrade), Style::default().fg(Color::Green)),
            ]
        }
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
