//! Terminal rendering for the clinic.

mod board;
mod panel;

use merge_clinic::core::session::Session;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};
use std::collections::VecDeque;

/// Messages kept in the log panel.
const MESSAGE_LOG_SIZE: usize = 8;

/// Input-side state the rules never see: cursor, held entity, message log.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub cursor: usize,
    /// Cell picked up with Enter/space, waiting for a drop target
    pub picked: Option<usize>,
    pub messages: VecDeque<String>,
}

impl UiState {
    pub fn push_message(&mut self, message: impl Into<String>) {
        self.messages.push_front(message.into());
        self.messages.truncate(MESSAGE_LOG_SIZE);
    }

    /// Moves the cursor by one cell, clamped to the grid.
    pub fn move_cursor(&mut self, d_row: i32, d_col: i32, rows: usize, cols: usize) {
        if rows == 0 || cols == 0 {
            return;
        }
        let row = (self.cursor / cols) as i32 + d_row;
        let col = (self.cursor % cols) as i32 + d_col;
        let row = row.clamp(0, rows as i32 - 1) as usize;
        let col = col.clamp(0, cols as i32 - 1) as usize;
        self.cursor = row * cols + col;
    }
}

/// Main UI drawing function: board on the left, HUD and log on the right.
pub fn draw_ui(frame: &mut Frame, session: &Session, ui: &UiState, now: i64) {
    let size = frame.size();
    let block = Block::default()
        .title(" Merge Clinic ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(size);
    frame.render_widget(block, size);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(36), Constraint::Length(40)])
        .split(inner);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(12), Constraint::Length(3)])
        .split(h_chunks[0]);

    board::draw_board(frame, left[0], session, ui);
    panel::draw_controls(frame, left[1]);
    panel::draw_side_panel(frame, h_chunks[1], session, ui, now);
}
