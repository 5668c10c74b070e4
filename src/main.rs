use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use rust_i18n::t;
use tracing::{error, info};

use milim::app::{App, AppOptions, AppScreen};
use milim::config::Config;
use milim::event::{AppEvent, EventHandler};
use milim::leaderboard::{FileLeaderboard, LeaderboardBackend};
use milim::logging;
use milim::session::machine::Phase;
use milim::store::JsonStore;
use milim::ui::components::leaderboard_table::LeaderboardTable;
use milim::ui::components::player_setup::PlayerSetup;
use milim::ui::components::progress_bar::ProgressBar;
use milim::ui::components::question_card::QuestionCard;
use milim::ui::components::review_card::ReviewCard;
use milim::ui::components::scoreboard::Scoreboard;
use milim::ui::components::summary::Summary;
use milim::ui::layout::{AppLayout, centered_rect, pack_hint_lines};

rust_i18n::i18n!("locales", fallback = "en");

#[derive(Parser)]
#[command(name = "milim", version, about = "Daily Hebrew vocabulary quiz for the terminal")]
struct Cli {
    #[arg(short, long, help = "Source language (en, jp, es)")]
    lang: Option<String>,

    #[arg(short, long, help = "Load words from a CSV file instead of the bundled list")]
    words: Option<PathBuf>,

    #[arg(long, help = "Answers between adaptive reviews (0 disables review)")]
    threshold: Option<u32>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Discard today's game and start over")]
    reset: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print today's leaderboard and exit
    Leaderboard {
        #[arg(short = 'n', long, help = "Number of entries to show")]
        top: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Command::Leaderboard { top }) = cli.command {
        logging::init_stderr_logging();
        return print_leaderboard(top);
    }

    let log_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("milim")
        .join("logs");
    let _log_guard = logging::init_file_logging(&log_dir);
    info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let mut app = App::new(AppOptions {
        language: cli.lang,
        words_path: cli.words,
        review_threshold: cli.threshold,
        theme: cli.theme,
        reset: cli.reset,
    });

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!(error = ?err, "ui loop failed");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn print_leaderboard(top: Option<usize>) -> Result<()> {
    let config = Config::load().unwrap_or_default();
    rust_i18n::set_locale(&config.ui_locale);
    let store = JsonStore::new()?;
    let board = FileLeaderboard::new(store.base_dir().join("leaderboard"))?;
    let today = Local::now().date_naive();
    let entries = board.top_n(today, top.unwrap_or(config.leaderboard_size))?;

    println!("{}", t!("leaderboard.title", date = today));
    if entries.is_empty() {
        println!("{}", t!("leaderboard.empty"));
        return Ok(());
    }
    for (i, entry) in entries.iter().enumerate() {
        println!(
            "{:>3}. {:<24} {:>6.0} {:>4}%",
            i + 1,
            entry.name,
            entry.score.round(),
            entry.accuracy_percent()
        );
    }
    let players = board.daily_player_count(today)?;
    println!("{}", t!("leaderboard.players_today", count = players));
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        if app.take_bell() {
            let mut out = io::stdout();
            out.write_all(b"\x07")?;
            out.flush()?;
        }

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick(now) => app.tick(now),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::PlayerSetup => app.setup_key(key),
        AppScreen::Game => handle_game_key(app, key),
        AppScreen::Summary => handle_summary_key(app, key),
        AppScreen::Leaderboard => handle_leaderboard_key(app, key),
    }
}

fn handle_game_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('f') | KeyCode::Esc => app.pause(),
        KeyCode::Char('R') => app.restart(),
        KeyCode::Char('m') => app.toggle_sound(),
        KeyCode::Char('L') => app.cycle_language(),
        KeyCode::Char('l') => app.open_leaderboard(),
        KeyCode::Char('p') => app.speak_prompt(),
        _ if app.session.phase() == Phase::AdaptiveReview => match key.code {
            KeyCode::Char('r') => app.reveal(),
            KeyCode::Char('n') => app.skip_review_word(),
            KeyCode::Char('x') => app.skip_review(),
            _ => {}
        },
        KeyCode::Char(ch @ '1'..='3') => app.answer(ch as usize - '1' as usize),
        KeyCode::Char('?') => app.dont_know(),
        KeyCode::Enter | KeyCode::Char(' ') => app.continue_dwell(),
        _ => {}
    }
}

fn handle_summary_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Enter | KeyCode::Esc => app.resume(),
        KeyCode::Char('R') => app.restart(),
        KeyCode::Char('l') => app.open_leaderboard(),
        KeyCode::Char('e') => app.edit_player(),
        KeyCode::Char('m') => app.toggle_sound(),
        KeyCode::Char('L') => app.cycle_language(),
        _ => {}
    }
}

fn handle_leaderboard_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('l') => app.close_leaderboard(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()).fg(colors.fg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::PlayerSetup => render_setup(frame, app),
        AppScreen::Game => render_game(frame, app),
        AppScreen::Summary => render_summary(frame, app),
        AppScreen::Leaderboard => render_leaderboard(frame, app),
    }
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, hints: &str, area: Rect) {
    let lines: Vec<Line> = pack_hint_lines(hints, area.width as usize)
        .into_iter()
        .map(|line| {
            Line::from(Span::styled(
                line,
                Style::default().fg(app.theme.colors.text_dim()),
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_setup(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(area);

    let form = PlayerSetup {
        name: &app.setup.name,
        gender: app.setup.gender,
        error: app.setup.error.as_deref(),
        theme: app.theme,
    };
    frame.render_widget(form, centered_rect(60, 60, layout[0]));
    render_footer(frame, app, &t!("hints.setup"), layout[1]);
}

fn render_game(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let app_layout = AppLayout::new(area);
    let tier = app_layout.tier;
    let state = app.session.state();
    let pool_len = app.session.pool().map_or(0, |p| p.len());

    let title = format!("{} · {}", t!("app.title"), app.language.label);
    let scoreboard = Scoreboard {
        title: &title,
        state,
        pool_len,
        sound_enabled: app.prefs.sound_enabled,
        compact: !tier.show_progress_bars(area.height),
        theme: app.theme,
    };
    frame.render_widget(scoreboard, app_layout.header);

    let show_progress = tier.show_progress_bars(area.height);
    let mut constraints = Vec::new();
    if show_progress {
        constraints.push(Constraint::Length(2));
        constraints.push(Constraint::Length(2));
    }
    constraints.push(Constraint::Min(6));
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(app_layout.main);

    let card_area = if show_progress {
        let progress = ProgressBar::new(&t!("game.progress"), state.progress(pool_len), app.theme)
            .caption(t!("game.answered", answered = state.answered, total = pool_len).to_string());
        frame.render_widget(progress, main[0]);
        let accuracy = ProgressBar::new(&t!("game.accuracy"), state.accuracy() / 100.0, app.theme)
            .caption(
                t!("game.correct_of", correct = state.correct, answered = state.answered)
                    .to_string(),
            );
        frame.render_widget(accuracy, main[1]);
        main[2]
    } else {
        main[0]
    };

    let hints = match app.session.phase() {
        Phase::AdaptiveReview => t!("hints.review"),
        _ => t!("hints.game"),
    };

    if let Some(reason) = &app.load_error {
        let text = Paragraph::new(t!("game.load_failed", reason = reason).to_string())
            .style(Style::default().fg(colors.warning()))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(text, card_area);
    } else if app.session.phase() == Phase::Loading {
        let text = Paragraph::new(t!("game.loading").to_string())
            .style(Style::default().fg(colors.text_dim()))
            .alignment(Alignment::Center);
        frame.render_widget(text, card_area);
    } else if let Some(review) = app.session.review() {
        let card = ReviewCard {
            review,
            last_completed: app.session.last_review_word(),
            bonus: app.session.settings().scoring.review_bonus,
            theme: app.theme,
        };
        frame.render_widget(card, card_area);
    } else if let Some(round) = app.session.round() {
        let card = QuestionCard {
            round,
            feedback: app.session.feedback(),
            message: app.message.as_deref(),
            theme: app.theme,
        };
        frame.render_widget(card, card_area);
    }

    if let Some(sidebar) = app_layout.sidebar {
        let table = LeaderboardTable {
            title: t!("leaderboard.title", date = app.today).to_string(),
            entries: &app.board_rows,
            player_id: app.player.as_ref().map(|p| p.id),
            players_today: app.players_today,
            theme: app.theme,
        };
        frame.render_widget(table, sidebar);
    }

    render_footer(frame, app, &hints, app_layout.footer);
}

fn render_summary(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(area);

    let complete = app.session.phase() == Phase::Finished;
    let summary = Summary {
        player_name: app.player.as_ref().map_or("", |p| p.name.as_str()),
        state: app.session.state(),
        complete,
        theme: app.theme,
    };
    frame.render_widget(summary, centered_rect(60, 70, layout[0]));

    let hints = if complete {
        t!("hints.finished")
    } else {
        t!("hints.summary")
    };
    render_footer(frame, app, &hints, layout[1]);
}

fn render_leaderboard(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    let header = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", t!("app.title")),
        Style::default()
            .fg(app.theme.colors.header_fg())
            .bg(app.theme.colors.header_bg())
            .add_modifier(Modifier::BOLD),
    )))
    .style(Style::default().bg(app.theme.colors.header_bg()));
    frame.render_widget(header, layout[0]);

    let table = LeaderboardTable {
        title: t!("leaderboard.title", date = app.today).to_string(),
        entries: &app.board_rows,
        player_id: app.player.as_ref().map(|p| p.id),
        players_today: app.players_today,
        theme: app.theme,
    };
    frame.render_widget(table, centered_rect(70, 90, layout[1]));
    render_footer(frame, app, &t!("hints.leaderboard"), layout[2]);
}
