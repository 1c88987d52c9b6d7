mod ui;

use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use merge_clinic::catalog::{Catalog, StoreItem};
use merge_clinic::core::constants::{FRAME_POLL_MS, LOG_FILE_NAME};
use merge_clinic::core::ruleset::Ruleset;
use merge_clinic::core::session::Session;
use merge_clinic::gift::GiftMode;
use merge_clinic::grid::MoveOutcome;
use merge_clinic::spawn::PlaceOutcome;
use merge_clinic::utils::build_info::version_line;
use merge_clinic::utils::persistence::{
    balance_path, data_path, delete_session, load_balance, load_session, save_session,
    session_path,
};
use rand::Rng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use ui::UiState;

fn print_help() {
    println!("Merge Clinic - a terminal merge game\n");
    println!("Usage: merge_clinic [option]\n");
    println!("Options:");
    println!("  --reset    Discard the saved session and start over");
    println!("  --version  Show version information");
    println!("  --help     Show this help message");
}

/// Logs go to ~/.merge_clinic/merge_clinic.log so the TUI owns the terminal.
fn init_tracing() {
    let Ok(path) = data_path(LOG_FILE_NAME) else {
        return;
    };
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("merge_clinic=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn to_io(e: merge_clinic::utils::persistence::PersistenceError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e)
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let mut reset = false;

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!("{}", version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--reset" => reset = true,
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'merge_clinic --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    init_tracing();

    let save_file = session_path().map_err(to_io)?;
    if reset {
        delete_session(&save_file).map_err(to_io)?;
        tracing::info!(target: "merge_clinic::persistence", "session reset");
    }

    let balance = load_balance(&balance_path().map_err(to_io)?);
    let rules = Ruleset::new(Catalog::builtin(), balance);
    let mut rng = rand::thread_rng();
    let now = Utc::now().timestamp_millis();

    let state = load_session(&save_file, &rules, now);
    let mut session = Session::from_state(state, rules);
    let mut ui_state = UiState::default();
    let report = session.bootstrap(now, &mut rng);
    if let Some(first) = report.first_level {
        ui_state.push_message(format!("Welcome! {}", first.summary()));
    }
    if report.discarded > 0 {
        ui_state.push_message(format!("{} patient(s) had no bed and left", report.discarded));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut session, &mut ui_state, &save_file, &mut rng);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut Session,
    ui_state: &mut UiState,
    save_file: &Path,
    rng: &mut impl Rng,
) -> io::Result<()> {
    let mut last_frame = Utc::now().timestamp_millis();
    let mut last_autosave = last_frame;

    loop {
        let now = Utc::now().timestamp_millis();
        let elapsed_seconds = (now - last_frame) as f64 / 1000.0;
        last_frame = now;
        session.tick(elapsed_seconds, now, rng);

        terminal.draw(|f| ui::draw_ui(f, session, ui_state, now))?;

        if event::poll(Duration::from_millis(FRAME_POLL_MS))? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press
                    && !handle_key(key_event.code, session, ui_state, now, rng)
                {
                    break;
                }
            }
        }

        if now - last_autosave >= session.rules.balance.autosave_interval_ms as i64 {
            if let Err(e) = save_session(save_file, &session.state) {
                tracing::warn!(target: "merge_clinic::persistence", error = %e, "autosave failed");
            }
            last_autosave = now;
        }
    }

    save_session(save_file, &session.state).map_err(to_io)
}

/// Applies one key press. Returns false when the player quits.
fn handle_key(
    code: KeyCode,
    session: &mut Session,
    ui_state: &mut UiState,
    now: i64,
    rng: &mut impl Rng,
) -> bool {
    let rows = session.rules.balance.rows;
    let cols = session.rules.balance.cols;

    match code {
        KeyCode::Char('q') | KeyCode::Esc => return false,
        KeyCode::Up => ui_state.move_cursor(-1, 0, rows, cols),
        KeyCode::Down => ui_state.move_cursor(1, 0, rows, cols),
        KeyCode::Left => ui_state.move_cursor(0, -1, rows, cols),
        KeyCode::Right => ui_state.move_cursor(0, 1, rows, cols),
        KeyCode::Enter | KeyCode::Char(' ') => match ui_state.picked.take() {
            None => {
                if session.state.grid.get(ui_state.cursor).is_some_and(Option::is_some) {
                    ui_state.picked = Some(ui_state.cursor);
                }
            }
            Some(from) => {
                let report = session.move_entity(from, ui_state.cursor, now, rng);
                if report.outcome == MoveOutcome::Locked {
                    ui_state.picked = Some(from);
                }
                if let Some(msg) = report.message() {
                    ui_state.push_message(msg);
                }
                for level_up in &report.level_ups {
                    ui_state.push_message(format!("{} {}", level_up.title(), level_up.summary()));
                }
            }
        },
        KeyCode::Char('p') => {
            let outcome = session.place_from_queue(now, rng);
            if let PlaceOutcome::Placed { index, .. } = &outcome {
                ui_state.cursor = *index;
            }
            if let Some(msg) = outcome.message() {
                ui_state.push_message(msg);
            }
        }
        KeyCode::Char('x') => {
            if let Some(msg) = session.sell_at(ui_state.cursor).message() {
                ui_state.push_message(msg);
            }
            if ui_state.picked == Some(ui_state.cursor) {
                ui_state.picked = None;
            }
        }
        KeyCode::Char('b') => {
            let outcome = session.activate_bonus(now);
            ui_state.push_message(outcome.message());
        }
        KeyCode::Char('f') | KeyCode::Char('g') => {
            let mode = if code == KeyCode::Char('f') {
                GiftMode::Free
            } else {
                GiftMode::Paid
            };
            match session.roll_gift(mode, now, rng) {
                Ok(roll) => ui_state.push_message(format!(
                    "🎁 {} gift: {}",
                    roll.rarity.name(),
                    roll.prize.label
                )),
                Err(failure) => ui_state.push_message(failure.message()),
            }
        }
        KeyCode::Char(c @ '1'..='3') => {
            let items = StoreItem::all();
            let index = (c as usize) - ('1' as usize);
            if let Some(&item) = items.get(index) {
                let outcome = session.buy(item, now, rng);
                ui_state.push_message(outcome.message());
            }
        }
        _ => {}
    }
    true
}
