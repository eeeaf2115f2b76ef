//! TUI rendering with ratatui
//!
//! Draws the gallows, the masked word and the session panels from a single
//! engine snapshot per frame.

use super::app::{App, MessageStyle};
use crate::engine::{GameState, SessionSnapshot};
use crate::output::formatters::{TimeUrgency, gallows, letter_list, time_urgency};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let snapshot = app.engine.snapshot();
    let time_limit = app.engine.config().time_limit_secs;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Main content
            Constraint::Length(3), // Timer
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, &snapshot, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55), // Gallows and word
            Constraint::Percentage(45), // Info and messages
        ])
        .split(chunks[1]);

    render_board(f, &snapshot, main_chunks[0]);
    render_info_panel(f, app, &snapshot, main_chunks[1]);
    render_timer(f, &snapshot, time_limit, chunks[2]);
    render_status(f, app, &snapshot, chunks[3]);
}

fn render_header(f: &mut Frame, snapshot: &SessionSnapshot, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "🪢 HANGMAN",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  Category: "),
        Span::styled(
            snapshot.category.clone(),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, snapshot: &SessionSnapshot, area: Rect) {
    let figure_color = match snapshot.wrong_guesses {
        0..=2 => Color::White,
        3..=4 => Color::Yellow,
        _ => Color::Red,
    };

    let mut lines: Vec<Line> = gallows(snapshot.wrong_guesses)
        .iter()
        .map(|l| Line::styled(*l, Style::default().fg(figure_color)))
        .collect();

    lines.push(Line::from(""));

    // Reveal the answer once the round is lost
    let word_line = if snapshot.state == GameState::Lost {
        Line::styled(
            spaced(&snapshot.word),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else {
        let color = if snapshot.state == GameState::Won {
            Color::Green
        } else {
            Color::Yellow
        };
        Line::styled(
            snapshot.display_word.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )
    };
    lines.push(word_line);

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Gallows ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );

    f.render_widget(paragraph, area);
}

fn render_info_panel(f: &mut Frame, app: &App, snapshot: &SessionSnapshot, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50), // Round info
            Constraint::Percentage(50), // Messages
        ])
        .split(area);

    render_round_info(f, snapshot, chunks[0]);
    render_messages(f, app, chunks[1]);
}

fn render_round_info(f: &mut Frame, snapshot: &SessionSnapshot, area: Rect) {
    let content = vec![
        Line::from(vec![
            Span::raw("Score:   "),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   Level: "),
            Span::styled(
                snapshot.level.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!(
            "Wrong:   {}/{}",
            snapshot.wrong_guesses, snapshot.max_wrong_guesses
        )),
        Line::from(format!(
            "Hints:   {} left",
            snapshot.max_hints.saturating_sub(snapshot.hints_used)
        )),
        Line::from(vec![
            Span::raw("Guessed: "),
            Span::styled(
                letter_list(&snapshot.guessed_letters),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .title(" Round ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_timer(f: &mut Frame, snapshot: &SessionSnapshot, time_limit: u32, area: Rect) {
    let remaining = snapshot.time_remaining_secs;
    let percent = if time_limit == 0 {
        0
    } else {
        (u64::from(remaining) * 100 / u64::from(time_limit)).min(100) as u16
    };

    let color = match time_urgency(remaining) {
        TimeUrgency::Relaxed => Color::Green,
        TimeUrgency::Hurry => Color::Yellow,
        TimeUrgency::Critical => Color::Red,
    };

    let label = if snapshot.state == GameState::Paused {
        format!("⏸ {remaining}s (paused)")
    } else {
        format!("{remaining}s")
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Time ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(color))
        .percent(percent)
        .label(label);

    f.render_widget(gauge, area);
}

fn render_status(f: &mut Frame, app: &App, snapshot: &SessionSnapshot, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(35),
            Constraint::Percentage(40),
        ])
        .split(area);

    let mode_text = match snapshot.state {
        GameState::Active => "Mode: Playing",
        GameState::Paused => "Mode: Paused",
        GameState::Won => "Mode: Won",
        GameState::Lost => "Mode: Lost",
    };
    let mode = Paragraph::new(mode_text).alignment(Alignment::Center);
    f.render_widget(mode, chunks[0]);

    let stats_text = format!(
        "Rounds: {} | Win Rate: {:.0}%",
        app.stats.rounds_played,
        app.stats.win_rate()
    );
    let stats = Paragraph::new(stats_text).alignment(Alignment::Center);
    f.render_widget(stats, chunks[1]);

    let help_text = if snapshot.is_game_over() {
        "Enter: New Round | Esc: Quit"
    } else {
        "A-Z: Guess | ?: Hint | Space: Pause | Esc: Quit"
    };

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}

fn spaced(word: &str) -> String {
    word.chars()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}
