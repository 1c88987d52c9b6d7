use super::UiState;
use merge_clinic::bonus::BonusPhase;
use merge_clinic::core::session::Session;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// HUD, store and message log stacked on the right.
pub fn draw_side_panel(frame: &mut Frame, area: Rect, session: &Session, ui: &UiState, now: i64) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(12), // HUD
            Constraint::Length(6),  // Store
            Constraint::Min(4),     // Log
        ])
        .split(area);

    draw_hud(frame, chunks[0], session, now);
    draw_store(frame, chunks[1], session, now);
    draw_log(frame, chunks[2], ui);
}

fn label(text: &str) -> Span<'static> {
    Span::styled(text.to_string(), Style::default().fg(Color::Gray))
}

fn draw_hud(frame: &mut Frame, area: Rect, session: &Session, now: i64) {
    let hud = session.hud(now);
    let xp_pct = if hud.xp_needed > 0 {
        hud.xp as f64 / hud.xp_needed as f64 * 100.0
    } else {
        0.0
    };

    let queue_text = match &hud.queue_head {
        Some(head) => format!("{} {} ({}/{})", head.icon, head.name, hud.queue_len, hud.queue_max),
        None => format!("empty ({}/{})", hud.queue_len, hud.queue_max),
    };

    let bonus_text = match hud.bonus_phase {
        BonusPhase::Active => format!("⚡ 2x active {}s", hud.bonus_remaining_seconds),
        BonusPhase::Cooldown => format!("cooldown {}s", hud.bonus_cooldown_seconds),
        BonusPhase::Idle => "ready (b)".to_string(),
    };

    let free_gift = if hud.gift_free_remaining_seconds == 0 {
        "ready (f)".to_string()
    } else {
        format!("in {}s", hud.gift_free_remaining_seconds)
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("Level {}", hud.level),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(
                format!("XP {}/{} ({:.0}%)", hud.xp, hud.xp_needed, xp_pct),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(vec![
            label("Coins: "),
            Span::styled(
                format!("🪙 {}", hud.coins),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            label("Income: "),
            Span::raw(format!(
                "{:.1}/s x{}",
                hud.income_per_second, hud.multiplier
            )),
        ]),
        Line::from(vec![label("Queue: "), Span::raw(queue_text)]),
        Line::from(vec![
            label("Next patient: "),
            Span::raw(format!(
                "{}s (every {}s)",
                hud.spawn_countdown_seconds, hud.spawn_interval_seconds
            )),
        ]),
        Line::from(vec![label("Bonus: "), Span::raw(bonus_text)]),
        Line::from(vec![label("Free gift: "), Span::raw(free_gift)]),
        Line::from(vec![
            label("Paid gift (g): "),
            Span::raw(format!("🪙 {}", hud.gift_paid_cost)),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Clinic"));
    frame.render_widget(paragraph, area);
}

fn draw_store(frame: &mut Frame, area: Rect, session: &Session, now: i64) {
    let hud = session.hud(now);
    let lines: Vec<Line> = hud
        .store_prices
        .iter()
        .enumerate()
        .map(|(i, (item, price))| {
            let affordable = hud.coins >= *price;
            let color = if affordable { Color::White } else { Color::DarkGray };
            Line::from(vec![
                Span::styled(format!("{} ", i + 1), Style::default().fg(Color::Cyan)),
                Span::styled(format!("{:<20}", item.name()), Style::default().fg(color)),
                Span::styled(format!("🪙 {}", price), Style::default().fg(Color::Yellow)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Store"));
    frame.render_widget(paragraph, area);
}

fn draw_log(frame: &mut Frame, area: Rect, ui: &UiState) {
    let lines: Vec<Line> = ui
        .messages
        .iter()
        .enumerate()
        .map(|(i, msg)| {
            let style = if i == 0 {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::styled(msg.clone(), style)
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Log"))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

pub fn draw_controls(frame: &mut Frame, area: Rect) {
    let text = "Arrows move | Enter pick/drop | p place | x sell | b 2x | f/g gift | 1-3 buy | q quit";
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
