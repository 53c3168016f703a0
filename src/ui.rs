pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Widget,
    Frame,
};

use campustype::game::Difficulty;

use crate::App;
use screen::Screen;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

/// Remaining time at or below which the clock turns yellow, then red.
const TIMER_WARN_SECS: u32 = 30;
const TIMER_URGENT_SECS: u32 = 10;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen(self.phase()).render(self, area, buf);
    }
}

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

/// `m:ss`
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub fn timer_color(secs: u32) -> Color {
    if secs <= TIMER_URGENT_SECS {
        Color::Red
    } else if secs <= TIMER_WARN_SECS {
        Color::Yellow
    } else {
        Color::Green
    }
}

pub fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Red,
    }
}

/// Target word coloured against what has been typed so far.
pub fn word_spans(word: &str, input: &str) -> Vec<Span<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let typed: Vec<char> = input.chars().collect();

    word.chars()
        .enumerate()
        .map(|(idx, expected)| {
            let style = match typed.get(idx) {
                Some(&c) if c == expected => bold.fg(Color::Green),
                Some(_) => bold.fg(Color::Red).bg(Color::Rgb(80, 20, 20)),
                None if idx == typed.len() => bold.add_modifier(Modifier::UNDERLINED),
                None => bold.add_modifier(Modifier::DIM),
            };
            Span::styled(expected.to_string(), style)
        })
        .collect()
}
