use crate::game::Difficulty;
use include_dir::{include_dir, Dir};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static THEME_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/themes");

#[derive(Debug, Error)]
pub enum WordBankError {
    #[error("theme file {file} is not valid: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("theme file {0} is not utf-8")]
    Encoding(String),
    #[error("duplicate theme key {0:?}")]
    DuplicateTheme(String),
    #[error("theme {theme:?} has no {difficulty} words")]
    EmptyList { theme: String, difficulty: Difficulty },
    #[error("theme {theme:?} contains {word:?}, words must be lowercase a-z")]
    InvalidWord { theme: String, word: String },
    #[error("word bank has no themes")]
    NoThemes,
}

/// One academic theme with its three tiers of words.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Theme {
    pub key: String,
    pub name: String,
    pub easy: Vec<String>,
    pub medium: Vec<String>,
    pub hard: Vec<String>,
}

impl Theme {
    pub fn words(&self, difficulty: Difficulty) -> &[String] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    fn validate(&self) -> Result<(), WordBankError> {
        for difficulty in Difficulty::ALL {
            let words = self.words(difficulty);
            if words.is_empty() {
                return Err(WordBankError::EmptyList {
                    theme: self.key.clone(),
                    difficulty,
                });
            }
            if let Some(word) = words
                .iter()
                .find(|w| w.is_empty() || !w.chars().all(|c| c.is_ascii_lowercase()))
            {
                return Err(WordBankError::InvalidWord {
                    theme: self.key.clone(),
                    word: word.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Immutable theme lookup, in presentation order.
#[derive(Clone, Debug)]
pub struct WordBank {
    themes: Vec<Theme>,
}

impl WordBank {
    /// The themes shipped inside the binary.
    pub fn bundled() -> Result<Self, WordBankError> {
        let themes = THEME_DIR
            .files()
            .sorted_by(|a, b| a.path().cmp(b.path()))
            .map(|file| {
                let name = file.path().display().to_string();
                let contents = file
                    .contents_utf8()
                    .ok_or_else(|| WordBankError::Encoding(name.clone()))?;
                serde_json::from_str::<Theme>(contents)
                    .map_err(|source| WordBankError::Parse { file: name, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_themes(themes)
    }

    pub fn from_themes(themes: Vec<Theme>) -> Result<Self, WordBankError> {
        if themes.is_empty() {
            return Err(WordBankError::NoThemes);
        }
        if let Some(dup) = themes.iter().map(|t| &t.key).duplicates().next() {
            return Err(WordBankError::DuplicateTheme(dup.clone()));
        }
        for theme in &themes {
            theme.validate()?;
        }
        Ok(Self { themes })
    }

    pub fn get(&self, key: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.themes.iter().map(|t| t.key.as_str())
    }

    pub fn words(&self, key: &str, difficulty: Difficulty) -> Option<&[String]> {
        self.get(key).map(|t| t.words(difficulty))
    }
}
