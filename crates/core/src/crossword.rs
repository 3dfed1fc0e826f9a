//! Crossword puzzle model, request parameters, and response shape validation.
//!
//! The grid itself is constructed by the backend; this module only describes
//! what a generated puzzle looks like and checks that a decoded response has
//! that shape before it is accepted.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Letter value marking a blocked (non-playable) square.
pub const BLOCKED: &str = "#";

/// Smallest grid the backend will build.
pub const MIN_SIZE: usize = 10;
/// Largest grid the backend will build.
pub const MAX_SIZE: usize = 20;
/// Grid size used when the caller does not choose one.
pub const DEFAULT_SIZE: usize = 15;

/// Fewest words that may be requested.
pub const MIN_WORD_COUNT: u32 = 5;
/// Most words that may be requested.
pub const MAX_WORD_COUNT: u32 = 20;
/// Word count used when the caller does not choose one.
pub const DEFAULT_WORD_COUNT: u32 = 10;

/// Themes the backend advertises out of the box.
pub const PREDEFINED_THEMES: &[&str] = &["Lifestyle", "Travel", "Entertainment", "Technology"];

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// A single grid square.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// One uppercase letter, or [`BLOCKED`].
    pub letter: String,
    /// Clue number when a word starts in this square.
    #[serde(default)]
    pub number: Option<u32>,
}

impl Cell {
    /// A blocked square.
    pub fn blocked() -> Self {
        Self {
            letter: BLOCKED.to_string(),
            number: None,
        }
    }

    /// A playable square holding `letter`.
    pub fn open(letter: char, number: Option<u32>) -> Self {
        Self {
            letter: letter.to_string(),
            number,
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.letter == BLOCKED
    }
}

/// A numbered clue and its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    pub number: u32,
    pub clue: String,
    pub answer: String,
}

/// A generated puzzle as returned by `POST /api/crossword/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrosswordPuzzle {
    /// Row-major `size x size` matrix.
    pub grid: Vec<Vec<Cell>>,
    /// Across clues, ordered by clue number.
    pub across: Vec<Clue>,
    /// Down clues, ordered by clue number.
    pub down: Vec<Clue>,
    pub theme: String,
    pub size: usize,
    /// Number of words the backend managed to place.
    pub word_count: u32,
    pub ai_generated: bool,
}

impl CrosswordPuzzle {
    /// Check the decoded puzzle against the model invariants.
    ///
    /// Rules:
    /// - The grid has exactly `size` rows of exactly `size` cells.
    /// - Every cell holds a single character.
    /// - Blocked cells carry no clue number; clue numbers are positive.
    /// - Every clue has a positive number and a non-empty answer.
    ///
    /// Whether a clue number matches the number of its start cell is left to
    /// the backend.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.size == 0 {
            return Err(CoreError::Validation(
                "Puzzle size must be positive".to_string(),
            ));
        }

        if self.grid.len() != self.size {
            return Err(CoreError::Validation(format!(
                "Grid has {} rows, expected {}",
                self.grid.len(),
                self.size
            )));
        }

        for (r, row) in self.grid.iter().enumerate() {
            if row.len() != self.size {
                return Err(CoreError::Validation(format!(
                    "Grid row {r} has {} cells, expected {}",
                    row.len(),
                    self.size
                )));
            }

            for (c, cell) in row.iter().enumerate() {
                if cell.letter.chars().count() != 1 {
                    return Err(CoreError::Validation(format!(
                        "Cell ({r}, {c}) must hold exactly one character, got '{}'",
                        cell.letter
                    )));
                }
                match cell.number {
                    Some(_) if cell.is_blocked() => {
                        return Err(CoreError::Validation(format!(
                            "Blocked cell ({r}, {c}) must not carry a clue number"
                        )));
                    }
                    Some(0) => {
                        return Err(CoreError::Validation(format!(
                            "Cell ({r}, {c}) has clue number 0"
                        )));
                    }
                    _ => {}
                }
            }
        }

        for (direction, clues) in [("across", &self.across), ("down", &self.down)] {
            for clue in clues {
                if clue.number == 0 {
                    return Err(CoreError::Validation(format!(
                        "{direction} clue '{}' has number 0",
                        clue.clue
                    )));
                }
                if clue.answer.trim().is_empty() {
                    return Err(CoreError::Validation(format!(
                        "{direction} clue {} has an empty answer",
                        clue.number
                    )));
                }
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Request parameters
// ---------------------------------------------------------------------------

/// Body of `POST /api/crossword/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrosswordParams {
    pub theme: String,
    pub size: usize,
    pub word_count: u32,
    pub use_ai: bool,
}

impl CrosswordParams {
    /// Parameters for `theme` with default size, word count, and AI words.
    pub fn new(theme: impl Into<String>) -> Self {
        Self {
            theme: theme.into(),
            size: DEFAULT_SIZE,
            word_count: DEFAULT_WORD_COUNT,
            use_ai: true,
        }
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_word_count(mut self, word_count: u32) -> Self {
        self.word_count = word_count;
        self
    }

    /// Reject parameters the backend would refuse.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.theme.trim().is_empty() {
            return Err(CoreError::Validation(
                "Theme must not be empty".to_string(),
            ));
        }
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(CoreError::Validation(format!(
                "Grid size must be between {MIN_SIZE} and {MAX_SIZE}, got {}",
                self.size
            )));
        }
        if !(MIN_WORD_COUNT..=MAX_WORD_COUNT).contains(&self.word_count) {
            return Err(CoreError::Validation(format!(
                "Word count must be between {MIN_WORD_COUNT} and {MAX_WORD_COUNT}, got {}",
                self.word_count
            )));
        }
        Ok(())
    }
}
