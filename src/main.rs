mod ui;

use campustype::{
    app_dirs::AppDirs,
    game::{GameEvent, Phase},
    logging::FileLogger,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    Game, WordBank,
};
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::{info, LevelFilter};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};

/// campus typing challenge: pick a major, type its words for 60 seconds
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Pick an academic theme and type as many of its words as you can in 60 seconds. Longer and harder words, fast typing and unbroken streaks earn more points, and the words get harder as you keep up the pace."
)]
pub struct Cli {
    /// theme to start with, skipping the picker (see --list-themes)
    #[clap(short = 't', long)]
    theme: Option<String>,

    /// seed for word selection, for reproducible rounds
    #[clap(short = 's', long)]
    seed: Option<u64>,

    /// print the available themes and exit
    #[clap(long)]
    list_themes: bool,

    /// write a log file at this level
    #[clap(long, value_enum, default_value_t = LogLevel::Off)]
    log_level: LogLevel,

    /// log file location (defaults to the app state directory)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Copy, Clone, PartialEq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(AppDirs::log_path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

/// View-side state: the game plus the theme picker cursor.
#[derive(Debug)]
pub struct App {
    pub game: Game,
    pub selected: usize,
}

impl App {
    pub fn new(game: Game) -> Self {
        Self { game, selected: 0 }
    }

    pub fn phase(&self) -> Phase {
        self.game.session().phase
    }

    fn theme_count(&self) -> usize {
        self.game.bank().themes().len()
    }

    fn start_selected(&mut self) {
        if let Some(theme) = self.game.bank().themes().get(self.selected) {
            let key = theme.key.clone();
            self.game.dispatch(GameEvent::SelectTheme(key));
        }
    }

    fn edit_input(&mut self, edit: impl FnOnce(&mut String)) {
        let mut value = self.game.session().user_input.clone();
        edit(&mut value);
        self.game.dispatch(GameEvent::Input(value));
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        match self.phase() {
            Phase::Idle => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
                KeyCode::Up | KeyCode::Char('k') => {
                    self.selected = self.selected.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if self.selected + 1 < self.theme_count() {
                        self.selected += 1;
                    }
                }
                KeyCode::Enter => self.start_selected(),
                KeyCode::Char(c @ '1'..='9') => {
                    let idx = (c as usize) - ('1' as usize);
                    if idx < self.theme_count() {
                        self.selected = idx;
                        self.start_selected();
                    }
                }
                _ => {}
            },
            Phase::Playing => match key.code {
                // "change theme"
                KeyCode::Esc => {
                    self.game.dispatch(GameEvent::Reset);
                }
                KeyCode::Enter => {
                    self.game.dispatch(GameEvent::Commit);
                }
                KeyCode::Backspace => self.edit_input(|value| {
                    value.pop();
                }),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.edit_input(|value| value.push(c))
                }
                _ => {}
            },
            Phase::Ended => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
                KeyCode::Enter | KeyCode::Char('r') => {
                    self.game.dispatch(GameEvent::Reset);
                }
                _ => {}
            },
        }

        Flow::Continue
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let bank = WordBank::bundled()?;

    if cli.list_themes {
        for theme in bank.themes() {
            println!("{:<28} {}", theme.key, theme.name);
        }
        return Ok(());
    }

    if let Some(theme) = cli.theme.as_deref() {
        if !bank.contains(theme) {
            let mut cmd = Cli::command();
            cmd.error(
                ErrorKind::InvalidValue,
                format!("unknown theme {theme:?}, see --list-themes"),
            )
            .exit();
        }
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if cli.log_level != LogLevel::Off {
        if let Some(path) = cli.log_path() {
            FileLogger::open(&path, cli.log_level.as_filter())?.install()?;
            info!("logging to {}", path.display());
        }
    }

    let mut app = App::new(Game::new(bank, cli.seed));
    if let Some(theme) = cli.theme {
        app.game.dispatch(GameEvent::SelectTheme(theme));
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        match runner.step_within(app.game.until_next_tick()) {
            AppEvent::Key(key) => {
                if app.on_key(key) == Flow::Quit {
                    break;
                }
            }
            AppEvent::Resize | AppEvent::Tick => {}
        }

        app.game.pump_timer();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app() -> App {
        App::new(Game::new(WordBank::bundled().unwrap(), Some(3)))
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.on_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["campustype"]);

        assert_eq!(cli.theme, None);
        assert_eq!(cli.seed, None);
        assert!(!cli.list_themes);
        assert_eq!(cli.log_level, LogLevel::Off);
        assert_eq!(cli.log_file, None);
    }

    #[test]
    fn test_cli_theme_and_seed() {
        let cli = Cli::parse_from(["campustype", "-t", "Hukum", "-s", "42"]);
        assert_eq!(cli.theme.as_deref(), Some("Hukum"));
        assert_eq!(cli.seed, Some(42));

        let cli = Cli::parse_from(["campustype", "--theme", "Teknik dan Informatika"]);
        assert_eq!(cli.theme.as_deref(), Some("Teknik dan Informatika"));
    }

    #[test]
    fn test_cli_log_options() {
        let cli = Cli::parse_from(["campustype", "--log-level", "debug", "--log-file", "/tmp/x.log"]);
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert_eq!(cli.log_level.as_filter(), LevelFilter::Debug);
        assert_eq!(cli.log_path(), Some(PathBuf::from("/tmp/x.log")));
    }

    #[test]
    fn test_cli_rejects_unknown_log_level() {
        assert!(Cli::try_parse_from(["campustype", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevel::Off.to_string(), "off");
        assert_eq!(LogLevel::Trace.to_string(), "trace");
    }

    #[test]
    fn test_picker_navigation_is_clamped() {
        let mut app = test_app();

        app.on_key(key(KeyCode::Up));
        assert_eq!(app.selected, 0);

        for _ in 0..20 {
            app.on_key(key(KeyCode::Down));
        }
        assert_eq!(app.selected, app.game.bank().themes().len() - 1);
        assert_eq!(app.phase(), Phase::Idle);
    }

    #[test]
    fn test_enter_starts_selected_theme() {
        let mut app = test_app();
        app.on_key(key(KeyCode::Down));
        app.on_key(key(KeyCode::Enter));

        assert_eq!(app.phase(), Phase::Playing);
        assert_eq!(
            app.game.session().theme.as_deref(),
            Some("Teknik dan Informatika")
        );
    }

    #[test]
    fn test_digit_starts_theme() {
        let mut app = test_app();
        app.on_key(key(KeyCode::Char('3')));

        assert_eq!(app.game.session().theme.as_deref(), Some("Hukum"));
        assert_eq!(app.selected, 2);
    }

    #[test]
    fn test_typing_builds_buffer_and_completes() {
        let mut app = test_app();
        app.on_key(key(KeyCode::Char('2')));
        let word = app.game.session().current_word.clone();

        let (head, tail) = word.split_at(1);
        type_str(&mut app, head);
        assert_eq!(app.game.session().user_input, head);

        type_str(&mut app, tail);
        assert_eq!(app.game.session().user_input, "");
        assert_eq!(app.game.session().stats.words_completed, 1);
        assert_eq!(app.game.session().streak, 1);
    }

    #[test]
    fn test_backspace_recovers_from_typo() {
        let mut app = test_app();
        app.on_key(key(KeyCode::Char('1')));
        let word = app.game.session().current_word.clone();

        type_str(&mut app, "#");
        assert_eq!(app.game.session().user_input, "#");
        app.on_key(key(KeyCode::Backspace));
        assert_eq!(app.game.session().user_input, "");

        type_str(&mut app, &word);
        assert_eq!(app.game.session().stats.words_completed, 1);
    }

    #[test]
    fn test_esc_while_playing_changes_theme() {
        let mut app = test_app();
        app.on_key(key(KeyCode::Char('1')));
        assert_eq!(app.on_key(key(KeyCode::Esc)), Flow::Continue);
        assert_eq!(app.phase(), Phase::Idle);
        assert!(!app.game.countdown().is_armed());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        assert_eq!(
            app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Flow::Quit
        );
        assert_eq!(app.on_key(key(KeyCode::Esc)), Flow::Quit);
    }

    #[test]
    fn test_q_is_typed_while_playing() {
        let mut app = test_app();
        app.on_key(key(KeyCode::Char('1')));
        assert_eq!(app.on_key(key(KeyCode::Char('q'))), Flow::Continue);
        assert_eq!(app.phase(), Phase::Playing);
    }
}
