mod app;

use std::io;
use std::time::Duration;

use app::{
    format_countdown, format_created_at, format_outcome, strength_bar, truncate, AppState,
    ConnectionStatus, SignalResponse,
};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table},
    Frame, Terminal,
};

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> io::Result<()> {
    let base_url = std::env::var("API_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .map_err(io::Error::other)?;

    let mut app = AppState::new(base_url);

    // Initial fetch before rendering
    app.refresh(&client).await;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, &client).await;

    // Restore terminal regardless of result
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    client: &reqwest::Client,
) -> io::Result<()> {
    let refresh_interval = Duration::from_secs(2);
    // Redraw at least once a second so the clock and countdown tick.
    let frame_interval = Duration::from_secs(1);
    let mut last_tick = std::time::Instant::now();

    loop {
        terminal.draw(|f| render(f, app))?;

        let timeout = refresh_interval
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO)
            .min(frame_interval);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            app.refresh(client).await;
                            last_tick = std::time::Instant::now();
                        }
                        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
                        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
                        KeyCode::Char('g') | KeyCode::Enter => {
                            app.generate(client).await;
                            app.refresh(client).await;
                            last_tick = std::time::Instant::now();
                        }
                        KeyCode::Char('w') => app.set_result(client, "WIN").await,
                        KeyCode::Char('l') => app.set_result(client, "LOSS").await,
                        KeyCode::Char('f') => app.send_feedback(client, "WORKED").await,
                        KeyCode::Char('n') => app.send_feedback(client, "DID_NOT_WORK").await,
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= refresh_interval {
            app.refresh(client).await;
            last_tick = std::time::Instant::now();
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render(f: &mut Frame, app: &AppState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(0),    // body
            Constraint::Length(1), // footer
        ])
        .split(area);

    render_header(f, app, chunks[0]);
    render_body(f, app, chunks[1]);
    render_footer(f, app, chunks[2]);
}

fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let (status_text, status_color) = match &app.status {
        ConnectionStatus::Connected => ("● connected".to_string(), Color::Green),
        ConnectionStatus::Connecting => ("◌ connecting".to_string(), Color::Yellow),
        ConnectionStatus::Error(e) => (format!("✗ {}", truncate(e, 40)), Color::Red),
    };

    let (paying_text, paying_color) = if app.clock.in_profitable_hours {
        ("PAYING HOURS", Color::Green)
    } else {
        ("outside paying hours", Color::DarkGray)
    };

    let latency = app
        .latency
        .p99_ms
        .map_or("—".to_string(), |v| format!("p99 {v:.1}ms"));

    let title_spans = vec![
        Span::styled(
            " Slot Signals  ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(status_text, Style::default().fg(status_color)),
        Span::raw("  │  "),
        Span::styled(
            format!("{} {} (UTC-3)", app.clock.date, app.clock.time),
            Style::default().fg(Color::White),
        ),
        Span::raw("  │  "),
        Span::styled(paying_text, Style::default().fg(paying_color).add_modifier(Modifier::BOLD)),
        Span::raw("  │  "),
        Span::styled(latency, Style::default().fg(Color::White)),
    ];

    let paragraph = Paragraph::new(Line::from(title_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(paragraph, area);
}

fn render_body(f: &mut Frame, app: &AppState, area: Rect) {
    // games (30%) | signal + history (70%)
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(8)])
        .split(halves[0]);
    render_games(f, app, left[0]);
    render_schedule(f, app, left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(0)])
        .split(halves[1]);
    render_current_signal(f, app, right[0]);
    render_history(f, app, right[1]);
}

fn titled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
}

fn render_games(f: &mut Frame, app: &AppState, area: Rect) {
    let items: Vec<ListItem> = app
        .games
        .iter()
        .map(|g| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", g.emoji)),
                Span::raw(truncate(&g.display_name, 18)),
                Span::styled(
                    format!("  {}%", g.assertiveness_level),
                    Style::default().fg(Color::Green),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(titled_block(" GAMES "))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    if !app.games.is_empty() {
        state.select(Some(app.selected));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn render_schedule(f: &mut Frame, app: &AppState, area: Rect) {
    let mut lines: Vec<Line> = app
        .clock
        .upcoming_slots
        .iter()
        .map(|s| {
            Line::from(vec![
                Span::styled("◷ ", Style::default().fg(Color::Yellow)),
                Span::raw(format!("{} – {}", s.start, s.end)),
            ])
        })
        .collect();
    let s = &app.stats;
    lines.push(Line::from(Span::styled(
        format!("{} signals  {}W/{}L  {}%", s.total_signals, s.wins, s.losses, s.win_rate),
        Style::default().fg(Color::White),
    )));
    f.render_widget(Paragraph::new(lines).block(titled_block(" WINDOWS ")), area);
}

fn render_current_signal(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(signal) = &app.current else {
        let hint = Paragraph::new("press [g] to generate a signal for the selected game")
            .style(Style::default().fg(Color::DarkGray))
            .block(titled_block(" SIGNAL "));
        f.render_widget(hint, area);
        return;
    };

    let (countdown, countdown_color) = match app.seconds_remaining() {
        Some(0) | None => ("expired".to_string(), Color::Red),
        Some(secs) => (format_countdown(secs), Color::Green),
    };
    let rec_color = if signal.recommendation == "PLAY" { Color::Green } else { Color::Yellow };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                app.game_label(signal.game_id),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  #{}  ", signal.id)),
            Span::styled(countdown, Style::default().fg(countdown_color)),
        ]),
        Line::from(vec![
            Span::styled(strength_bar(signal.strength_level), Style::default().fg(Color::Magenta)),
            Span::raw(format!(" {}  ", signal.strength)),
            Span::styled(signal.recommendation.clone(), Style::default().fg(rec_color)),
        ]),
        Line::from(format!(
            "confidence {}%  assertiveness {}%",
            signal.confidence, signal.assertiveness
        )),
        Line::from(format!(
            "spins {} normal / {} turbo  auto {}",
            signal.normal_spins,
            signal.turbo_spins,
            if signal.auto_mode { "on" } else { "off" }
        )),
        Line::from(format!(
            "window {} – {}",
            signal.profitable_time_start, signal.profitable_time_end
        )),
        Line::from(format!("houses {}", signal.betting_houses.join(", "))),
        Line::from(Span::styled(
            signal.algorithm.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(format!(
            "result {}  feedback {}",
            format_outcome(signal.result.as_deref()),
            signal.user_feedback.as_deref().unwrap_or("—")
        )),
    ];
    f.render_widget(Paragraph::new(lines).block(titled_block(" SIGNAL ")), area);
}

fn render_history(f: &mut Frame, app: &AppState, area: Rect) {
    let header_cells = ["Time", "Game", "Strength", "Conf", "Window", "Result"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app.recent.iter().map(|s| history_row(app, s)).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Min(10),
            Constraint::Length(8),
            Constraint::Length(5),
            Constraint::Length(13),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(titled_block(" RECENT SIGNALS "));

    f.render_widget(table, area);
}

fn history_row(app: &AppState, s: &SignalResponse) -> Row<'static> {
    let outcome = format_outcome(s.result.as_deref());
    let outcome_color = match outcome {
        "WIN" => Color::Green,
        "LOSS" => Color::Red,
        _ => Color::DarkGray,
    };
    Row::new(vec![
        Cell::from(format_created_at(&s.created_at)).style(Style::default().fg(Color::DarkGray)),
        Cell::from(truncate(&app.game_label(s.game_id), 18)),
        Cell::from(strength_bar(s.strength_level)).style(Style::default().fg(Color::Magenta)),
        Cell::from(format!("{}%", s.confidence)),
        Cell::from(format!("{}–{}", s.profitable_time_start, s.profitable_time_end)),
        Cell::from(outcome).style(Style::default().fg(outcome_color)),
    ])
}

fn render_footer(f: &mut Frame, app: &AppState, area: Rect) {
    let mut spans = vec![
        Span::styled(" [q] ", Style::default().fg(Color::Yellow)),
        Span::raw("quit  "),
        Span::styled("[↑↓ / j k] ", Style::default().fg(Color::Yellow)),
        Span::raw("game  "),
        Span::styled("[g] ", Style::default().fg(Color::Yellow)),
        Span::raw("generate  "),
        Span::styled("[w/l] ", Style::default().fg(Color::Yellow)),
        Span::raw("win/loss  "),
        Span::styled("[f/n] ", Style::default().fg(Color::Yellow)),
        Span::raw("worked/didn't  "),
        Span::styled("[r] ", Style::default().fg(Color::Yellow)),
        Span::raw("refresh  "),
    ];
    if let Some(notice) = &app.notice {
        spans.push(Span::styled(truncate(notice, 48), Style::default().fg(Color::Cyan)));
    }
    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}
