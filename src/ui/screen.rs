use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use campustype::game::{Phase, GAME_DURATION_SECS};

use super::{
    difficulty_color, format_clock, timer_color, word_spans, HORIZONTAL_MARGIN, VERTICAL_MARGIN,
};
use crate::App;

const HOW_TO_PLAY: [&str; 4] = [
    "You have 60 seconds to type as many words as possible",
    "Words are related to your chosen academic theme",
    "Type faster and build streaks for bonus points",
    "Difficulty automatically increases with performance",
];

/// A UI Screen boundary: one per game phase
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Theme picker shown while idle
pub struct ThemeSelectScreen;

impl Screen for ThemeSelectScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let themes = app.game.bank().themes();
        let bold = Style::default().add_modifier(Modifier::BOLD);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1),                       // title
                Constraint::Length(1),                       // tagline
                Constraint::Length(1),                       // padding
                Constraint::Length(themes.len() as u16 + 2), // theme list
                Constraint::Length(HOW_TO_PLAY.len() as u16 + 2),
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(
            "Campus Typing Challenge",
            bold.fg(Color::Cyan),
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        Paragraph::new(format!(
            "Choose your major theme and type for {GAME_DURATION_SECS} seconds!"
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        let lines = themes
            .iter()
            .enumerate()
            .map(|(idx, theme)| {
                let label = format!("{}. {}", idx + 1, theme.name);
                if idx == app.selected {
                    Line::from(vec![
                        Span::styled(format!("> {label}"), bold.add_modifier(Modifier::REVERSED)),
                        Span::styled(format!("  {}", theme.key), Style::default().fg(Color::Gray)),
                    ])
                } else {
                    Line::from(vec![
                        Span::raw(format!("  {label}")),
                        Span::styled(
                            format!("  {}", theme.key),
                            Style::default().add_modifier(Modifier::DIM),
                        ),
                    ])
                }
            })
            .collect::<Vec<Line>>();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Choose Your Theme"),
            )
            .render(chunks[3], buf);

        Paragraph::new(
            HOW_TO_PLAY
                .iter()
                .map(|rule| Line::from(*rule))
                .collect::<Vec<Line>>(),
        )
        .block(Block::default().borders(Borders::ALL).title("How to Play"))
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true })
        .render(chunks[4], buf);

        Paragraph::new(Span::styled(
            "(↑/↓) choose / (enter) or (1-9) start / (esc)ape",
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .render(chunks[6], buf);
    }
}

/// The running round
pub struct RoundScreen;

impl Screen for RoundScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let session = app.game.session();
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let dim = Style::default().add_modifier(Modifier::DIM);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // timer
                Constraint::Length(1), // theme + level
                Constraint::Length(1), // padding
                Constraint::Length(1), // stats bar
                Constraint::Min(0),
                Constraint::Length(1), // prompt label
                Constraint::Length(1), // word
                Constraint::Length(3), // input box
                Constraint::Length(1), // feedback
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(
            format_clock(session.time_remaining),
            bold.fg(timer_color(session.time_remaining)),
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        let theme_name = app.game.theme().map_or("", |t| t.name.as_str());
        Paragraph::new(Line::from(vec![
            Span::styled(theme_name.to_string(), bold),
            Span::raw("  "),
            Span::styled(
                format!("{} Level", session.difficulty),
                Style::default().fg(difficulty_color(session.difficulty)),
            ),
        ]))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        let full = format!(
            "Score {}   Streak {}   Avg WPM {}   Accuracy {}%",
            session.score,
            session.streak,
            session.stats.average_wpm,
            session.accuracy()
        );
        let stats = if full.width() <= chunks[3].width as usize {
            full
        } else {
            format!(
                "{} pts  x{}  {} wpm  {}%",
                session.score,
                session.streak,
                session.stats.average_wpm,
                session.accuracy()
            )
        };
        Paragraph::new(Span::styled(stats, bold))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        Paragraph::new(Span::styled("Type this word:", dim))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);

        Paragraph::new(Line::from(word_spans(
            &session.current_word,
            &session.user_input,
        )))
        .alignment(Alignment::Center)
        .render(chunks[6], buf);

        let input = if session.user_input.is_empty() {
            Span::styled("Start typing...", dim)
        } else {
            Span::raw(session.user_input.clone())
        };
        Paragraph::new(input)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center)
            .render(chunks[7], buf);

        Paragraph::new(Span::styled(
            session.feedback.to_string(),
            Style::default().fg(Color::Green),
        ))
        .alignment(Alignment::Center)
        .render(chunks[8], buf);

        Paragraph::new(Span::styled(
            "(enter) submit / (esc) change theme / (ctrl-c) quit",
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .render(chunks[10], buf);
    }
}

/// Final results after the clock runs out
pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let session = app.game.session();
        let bold = Style::default().add_modifier(Modifier::BOLD);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1), // heading
                Constraint::Length(1), // theme
                Constraint::Length(1), // padding
                Constraint::Length(3), // score boxes
                Constraint::Length(1), // feedback
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled("Final Results", bold.fg(Color::Cyan)))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        let theme_name = app.game.theme().map_or("", |t| t.name.as_str());
        Paragraph::new(format!("Theme: {theme_name}"))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        let boxes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(chunks[4]);

        let results = [
            ("Final Score", session.score.to_string(), Color::Yellow),
            (
                "Words Completed",
                session.stats.words_completed.to_string(),
                Color::Green,
            ),
            (
                "Average WPM",
                session.stats.average_wpm.to_string(),
                Color::Blue,
            ),
        ];
        for ((title, value, color), rect) in results.into_iter().zip(boxes.iter()) {
            Paragraph::new(Span::styled(value, bold.fg(color)))
                .block(Block::default().borders(Borders::ALL).title(title))
                .alignment(Alignment::Center)
                .render(*rect, buf);
        }

        Paragraph::new(Span::styled(
            session.feedback.to_string(),
            Style::default().fg(Color::Red),
        ))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);

        Paragraph::new(Span::styled(
            "(enter) try another theme / (esc)ape",
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .render(chunks[7], buf);
    }
}

/// Helper to construct the appropriate screen for the current phase
pub fn current_screen(phase: Phase) -> Box<dyn Screen> {
    match phase {
        Phase::Idle => Box::new(ThemeSelectScreen),
        Phase::Playing => Box::new(RoundScreen),
        Phase::Ended => Box::new(ResultsScreen),
    }
}
