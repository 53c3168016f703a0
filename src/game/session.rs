use std::fmt;

use log::{debug, info, trace, warn};
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use super::accuracy::accuracy;
use super::difficulty::Difficulty;
use super::scoring::{self, WordScore};
use crate::word_bank::WordBank;

/// Length of a round.
pub const GAME_DURATION_SECS: u32 = 60;

pub const PLACEHOLDER_FEEDBACK: &str = "This is where the point will be shown";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Playing,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameStats {
    pub words_completed: u32,
    pub total_time_ms: u64,
    pub average_wpm: u32,
}

impl GameStats {
    fn record(&mut self, time_taken_ms: u64) {
        self.words_completed += 1;
        self.total_time_ms += time_taken_ms;
        self.average_wpm = scoring::average_wpm(self.words_completed, self.total_time_ms);
    }
}

/// Message shown under the word.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Feedback {
    #[default]
    Placeholder,
    Points {
        points: u32,
        wpm: u32,
        level_up: bool,
    },
    TimeUp,
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Placeholder => f.write_str(PLACEHOLDER_FEEDBACK),
            Feedback::Points {
                points,
                wpm,
                level_up,
            } => {
                write!(f, "+{points} pts! ({wpm} WPM)")?;
                if *level_up {
                    f.write_str(" Level up!")?;
                }
                Ok(())
            }
            Feedback::TimeUp => f.write_str("Time's up!"),
        }
    }
}

/// Everything a round knows about itself.
///
/// Transitions consume the session and hand back the next one; nothing here
/// touches a clock or a terminal. Time comes in as `now_ms` and randomness
/// as a borrowed RNG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub theme: Option<String>,
    pub phase: Phase,
    pub current_word: String,
    pub user_input: String,
    pub score: u64,
    pub streak: u32,
    pub difficulty: Difficulty,
    pub time_remaining: u32,
    pub stats: GameStats,
    /// Clock reading when `current_word` was presented.
    pub word_started_at_ms: u64,
    pub feedback: Feedback,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            theme: None,
            phase: Phase::Idle,
            current_word: String::new(),
            user_input: String::new(),
            score: 0,
            streak: 0,
            difficulty: Difficulty::Easy,
            time_remaining: GAME_DURATION_SECS,
            stats: GameStats::default(),
            word_started_at_ms: 0,
            feedback: Feedback::Placeholder,
        }
    }
}

fn draw_word<R: Rng + ?Sized>(
    bank: &WordBank,
    theme: &str,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<String> {
    bank.words(theme, difficulty)?.choose(rng).cloned()
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn has_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// Live accuracy of the input buffer.
    pub fn accuracy(&self) -> u32 {
        accuracy(&self.user_input, &self.current_word)
    }

    /// Begin a fresh round on `theme`. Unknown themes and an ended round are left alone.
    pub fn start<R: Rng + ?Sized>(
        self,
        bank: &WordBank,
        theme: &str,
        rng: &mut R,
        now_ms: u64,
    ) -> Self {
        if self.has_ended() {
            trace!("theme selection ignored, round has ended");
            return self;
        }
        if !bank.contains(theme) {
            warn!("unknown theme {theme:?}");
            return self;
        }

        let mut next = Self {
            theme: Some(theme.to_string()),
            phase: Phase::Playing,
            ..Self::default()
        };
        next.present_word(bank, rng, now_ms);
        info!("started round on {theme:?}, first word {:?}", next.current_word);
        next
    }

    /// A text-change event from the view carrying the whole buffer.
    pub fn apply_input<R: Rng + ?Sized>(
        mut self,
        bank: &WordBank,
        value: String,
        rng: &mut R,
        now_ms: u64,
    ) -> Self {
        if !self.is_playing() {
            trace!("input ignored in phase {}", self.phase);
            return self;
        }

        self.user_input = value;
        if !self.current_word.is_empty() && self.user_input == self.current_word {
            self.complete_word(bank, rng, now_ms);
        } else if !self.current_word.starts_with(self.user_input.as_str()) {
            if self.streak > 0 {
                debug!("typo in {:?}, streak {} lost", self.current_word, self.streak);
            }
            self.streak = 0;
        }
        self
    }

    /// Explicit submit. Only completes when the buffer matches exactly.
    pub fn commit<R: Rng + ?Sized>(mut self, bank: &WordBank, rng: &mut R, now_ms: u64) -> Self {
        if self.is_playing() && !self.current_word.is_empty() && self.user_input == self.current_word
        {
            self.complete_word(bank, rng, now_ms);
        }
        self
    }

    /// One second of the countdown.
    pub fn tick(mut self) -> Self {
        if !self.is_playing() {
            return self;
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            self.phase = Phase::Ended;
            self.feedback = Feedback::TimeUp;
            info!(
                "time's up: score {}, {} words, {} avg wpm",
                self.score, self.stats.words_completed, self.stats.average_wpm
            );
        }
        self
    }

    /// Abort whatever is going on and return to theme selection.
    pub fn reset(self) -> Self {
        debug!("reset from phase {}", self.phase);
        Self::default()
    }

    fn present_word<R: Rng + ?Sized>(&mut self, bank: &WordBank, rng: &mut R, now_ms: u64) {
        let Some(theme) = self.theme.as_deref() else {
            return;
        };
        match draw_word(bank, theme, self.difficulty, rng) {
            Some(word) => self.current_word = word,
            None => warn!("no {} words for theme {theme:?}", self.difficulty),
        }
        self.word_started_at_ms = now_ms;
    }

    fn complete_word<R: Rng + ?Sized>(&mut self, bank: &WordBank, rng: &mut R, now_ms: u64) {
        let time_taken_ms = scoring::clamp_elapsed(now_ms.saturating_sub(self.word_started_at_ms));
        let WordScore { total, wpm, .. } =
            scoring::score_word(&self.current_word, self.difficulty, time_taken_ms, self.streak);

        self.score += u64::from(total);
        self.streak += 1;
        self.stats.record(time_taken_ms);

        let level_up = scoring::should_level_up(self.streak, wpm, self.difficulty);
        if level_up {
            if let Some(next) = self.difficulty.next() {
                debug!("level up: {} -> {next}", self.difficulty);
                self.difficulty = next;
            }
        }

        debug!(
            "completed {:?} in {time_taken_ms}ms: +{total} ({wpm} wpm), streak {}",
            self.current_word, self.streak
        );
        self.feedback = Feedback::Points {
            points: total,
            wpm,
            level_up,
        };
        self.user_input.clear();
        self.present_word(bank, rng, now_ms);
    }
}
