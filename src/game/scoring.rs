//! Points for a completed word.
//!
//! Everything here is a pure function of the word, the tier it was drawn
//! from, how long it took, and the streak going into the completion. The
//! constants are fixed; there is no runtime tuning.

use super::difficulty::Difficulty;

pub const BASE_SCORE_EASY: u32 = 15;
pub const BASE_SCORE_MEDIUM: u32 = 35;
pub const BASE_SCORE_HARD: u32 = 60;
/// Points per character of the word.
pub const LENGTH_BONUS: u32 = 3;

/// Standard "5 characters = 1 word" convention.
pub const CHARS_PER_WORD: f64 = 5.0;
/// Reference typist used for the speed bonus.
pub const TARGET_WPM: f64 = 40.0;
pub const SPEED_BONUS_FACTOR: f64 = 25.0;
pub const STREAK_BONUS: u32 = 8;

/// Streak multiple at which a level-up is considered.
pub const LEVEL_UP_STREAK: u32 = 4;
/// WPM the completing word must exceed for a level-up.
pub const LEVEL_UP_MIN_WPM: u32 = 35;

/// Floor applied to elapsed time so the speed and WPM math never divides by zero.
pub const MIN_ELAPSED_MS: u64 = 1;

const MS_PER_MINUTE: f64 = 60_000.0;

/// Breakdown of the points awarded for one completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordScore {
    pub complexity: u32,
    pub speed_bonus: u32,
    pub streak_bonus: u32,
    pub total: u32,
    pub wpm: u32,
}

pub fn base_score(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Easy => BASE_SCORE_EASY,
        Difficulty::Medium => BASE_SCORE_MEDIUM,
        Difficulty::Hard => BASE_SCORE_HARD,
    }
}

fn word_len(word: &str) -> u32 {
    word.chars().count() as u32
}

pub fn clamp_elapsed(time_taken_ms: u64) -> u64 {
    time_taken_ms.max(MIN_ELAPSED_MS)
}

pub fn complexity_score(word: &str, difficulty: Difficulty) -> u32 {
    base_score(difficulty) + LENGTH_BONUS * word_len(word)
}

/// Milliseconds a `TARGET_WPM` typist needs for `word`.
pub fn target_time_ms(word: &str) -> f64 {
    word_len(word) as f64 * MS_PER_MINUTE / (CHARS_PER_WORD * TARGET_WPM)
}

/// Zero when slower than the reference typist. Not capped from above.
pub fn speed_bonus(word: &str, time_taken_ms: u64) -> u32 {
    let taken = clamp_elapsed(time_taken_ms) as f64;
    let target = target_time_ms(word);

    if taken <= target {
        ((target / taken) * SPEED_BONUS_FACTOR).floor() as u32
    } else {
        0
    }
}

pub fn streak_bonus(streak: u32) -> u32 {
    streak * STREAK_BONUS
}

pub fn words_per_minute(word: &str, time_taken_ms: u64) -> u32 {
    let taken = clamp_elapsed(time_taken_ms) as f64;
    (word_len(word) as f64 * MS_PER_MINUTE / (CHARS_PER_WORD * taken)).round() as u32
}

/// Session-wide average, counting every completed word as five characters.
pub fn average_wpm(words_completed: u32, total_time_ms: u64) -> u32 {
    if total_time_ms == 0 {
        return 0;
    }
    (words_completed as f64 * CHARS_PER_WORD * MS_PER_MINUTE / total_time_ms as f64).round() as u32
}

/// `streak` is the value after the completion has been counted.
pub fn should_level_up(streak: u32, wpm: u32, difficulty: Difficulty) -> bool {
    streak > 0 && streak % LEVEL_UP_STREAK == 0 && wpm > LEVEL_UP_MIN_WPM && !difficulty.is_hardest()
}

/// Score a completion. `streak` is the value going into this completion.
pub fn score_word(word: &str, difficulty: Difficulty, time_taken_ms: u64, streak: u32) -> WordScore {
    let complexity = complexity_score(word, difficulty);
    let speed_bonus = speed_bonus(word, time_taken_ms);
    let streak_bonus = streak_bonus(streak);

    WordScore {
        complexity,
        speed_bonus,
        streak_bonus,
        total: complexity + speed_bonus + streak_bonus,
        wpm: words_per_minute(word, time_taken_ms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complexity_score() {
        assert_eq!(complexity_score("code", Difficulty::Easy), 15 + 12);
        assert_eq!(complexity_score("python", Difficulty::Medium), 35 + 18);
        assert_eq!(complexity_score("algorithm", Difficulty::Hard), 60 + 27);
    }

    #[test]
    fn test_complexity_score_always_positive() {
        for difficulty in Difficulty::ALL {
            assert!(complexity_score("", difficulty) > 0);
        }
    }

    #[test]
    fn test_target_time() {
        // four characters at 40 wpm: 0.8 words * 1500 ms
        assert_eq!(target_time_ms("code"), 1200.0);
        assert_eq!(target_time_ms("money"), 1500.0);
    }

    #[test]
    fn test_speed_bonus_at_and_under_target() {
        assert_eq!(speed_bonus("code", 1200), 25);
        assert_eq!(speed_bonus("code", 600), 50);
        assert_eq!(speed_bonus("money", 1000), 37);
    }

    #[test]
    fn test_speed_bonus_zero_when_slow() {
        assert_eq!(speed_bonus("code", 1201), 0);
        assert_eq!(speed_bonus("code", 60_000), 0);
    }

    #[test]
    fn test_speed_bonus_zero_duration_is_clamped() {
        // 1200 ms target against the 1 ms floor
        assert_eq!(speed_bonus("code", 0), 30_000);
        assert_eq!(speed_bonus("code", 0), speed_bonus("code", 1));
    }

    #[test]
    fn test_streak_bonus() {
        assert_eq!(streak_bonus(0), 0);
        assert_eq!(streak_bonus(3), 24);
    }

    #[test]
    fn test_words_per_minute() {
        assert_eq!(words_per_minute("code", 600), 80);
        assert_eq!(words_per_minute("money", 1500), 40);
        assert_eq!(words_per_minute("code", 0), 48_000);
    }

    #[test]
    fn test_average_wpm() {
        assert_eq!(average_wpm(0, 0), 0);
        assert_eq!(average_wpm(1, 1500), 200);
        assert_eq!(average_wpm(2, 6000), 100);
    }

    #[test]
    fn test_average_wpm_is_order_independent() {
        let a = average_wpm(1, 700);
        let ab = average_wpm(2, 700 + 2300);
        let ba = average_wpm(2, 2300 + 700);
        assert_eq!(ab, ba);
        assert_ne!(a, ab);
    }

    #[test]
    fn test_should_level_up() {
        assert!(should_level_up(4, 36, Difficulty::Easy));
        assert!(should_level_up(8, 100, Difficulty::Medium));
        assert!(!should_level_up(4, 35, Difficulty::Easy));
        assert!(!should_level_up(3, 100, Difficulty::Easy));
        assert!(!should_level_up(0, 100, Difficulty::Easy));
        assert!(!should_level_up(4, 100, Difficulty::Hard));
    }

    #[test]
    fn test_score_word_breakdown() {
        let score = score_word("code", Difficulty::Easy, 600, 2);
        assert_eq!(score.complexity, 27);
        assert_eq!(score.speed_bonus, 50);
        assert_eq!(score.streak_bonus, 16);
        assert_eq!(score.total, 93);
        assert_eq!(score.wpm, 80);
    }
}
