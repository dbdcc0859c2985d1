//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no I/O, making them usable in any context
//! (session logic, terminal rendering, persistence).
//!
//! # Rule Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SESSION_SECONDS` | 60 | Countdown at session start |
//! | `CORRECT_POINTS` | 10 | Score for a correct drop |
//! | `INCORRECT_PENALTY` | 5 | Score removed for a wrong drop (floored at 0) |
//! | `STREAK_BONUS_EVERY` | 5 | Streak milestone that grants bonus time |
//! | `STREAK_BONUS_SECONDS` | 5 | Seconds added at each milestone |
//! | `SCORE_CAP` | 100 | Winning score when the score cap policy is on |
//! | `TIME_WARNING_SECONDS` | 10 | Countdown threshold for the warning state |
//!
//! # Examples
//!
//! ```
//! use eco_sorter_types::{format_clock, Category};
//!
//! let category = Category::from_str("plastic").unwrap();
//! assert_eq!(category, Category::Plastic);
//! assert_eq!(category.as_str(), "plastic");
//!
//! assert_eq!(format_clock(65), "01:05");
//! ```

use serde::{Deserialize, Serialize};

/// Countdown length of a fresh session, in seconds.
pub const SESSION_SECONDS: u32 = 60;

/// Points awarded for a correct drop.
pub const CORRECT_POINTS: u32 = 10;

/// Points removed for an incorrect drop.
pub const INCORRECT_PENALTY: u32 = 5;

/// Every N-th consecutive correct drop grants bonus time.
pub const STREAK_BONUS_EVERY: u32 = 5;

/// Bonus seconds granted at each streak milestone.
pub const STREAK_BONUS_SECONDS: u32 = 5;

/// Score that ends the session when the score cap policy is enabled.
pub const SCORE_CAP: u32 = 100;

/// Remaining seconds at or below which the countdown is flagged as urgent.
pub const TIME_WARNING_SECONDS: u32 = 10;

/// Timer period (one tick per second).
pub const TICK_MS: u32 = 1000;

/// Waste categories (one bin per category).
///
/// The set is closed: external names are validated with [`Category::from_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Paper,
    Plastic,
    Glass,
    Organic,
    Metal,
}

impl Category {
    /// All categories, in bin order.
    pub const ALL: [Category; 5] = [
        Category::Paper,
        Category::Plastic,
        Category::Glass,
        Category::Organic,
        Category::Metal,
    ];

    /// Parse category from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use eco_sorter_types::Category;
    ///
    /// assert_eq!(Category::from_str("Glass"), Some(Category::Glass));
    /// assert_eq!(Category::from_str(" metal "), Some(Category::Metal));
    /// assert_eq!(Category::from_str("styrofoam"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "paper" => Some(Category::Paper),
            "plastic" => Some(Category::Plastic),
            "glass" => Some(Category::Glass),
            "organic" => Some(Category::Organic),
            "metal" => Some(Category::Metal),
            _ => None,
        }
    }

    /// Convert to lowercase identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Paper => "paper",
            Category::Plastic => "plastic",
            Category::Glass => "glass",
            Category::Organic => "organic",
            Category::Metal => "metal",
        }
    }

    /// Human-readable name, used in feedback messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Paper => "Paper",
            Category::Plastic => "Plastic",
            Category::Glass => "Glass",
            Category::Organic => "Organic",
            Category::Metal => "Metal",
        }
    }

    /// Zero-based bin slot (matches [`Category::ALL`]).
    pub fn index(&self) -> usize {
        match self {
            Category::Paper => 0,
            Category::Plastic => 1,
            Category::Glass => 2,
            Category::Organic => 3,
            Category::Metal => 4,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A piece of trash waiting to be sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Item {
    pub category: Category,
    pub label: &'static str,
    pub glyph: &'static str,
}

impl Item {
    pub const fn new(category: Category, label: &'static str, glyph: &'static str) -> Self {
        Self {
            category,
            label,
            glyph,
        }
    }
}

/// A bin only matters to the session through the category it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bin {
    pub accepted: Category,
}

impl Bin {
    pub fn new(accepted: Category) -> Self {
        Self { accepted }
    }

    pub fn accepts(&self, category: Category) -> bool {
        self.accepted == category
    }
}

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Playing,
    Ended,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    TimedOut,
    Won,
    Aborted,
}

impl EndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::TimedOut => "timed_out",
            EndReason::Won => "won",
            EndReason::Aborted => "aborted",
        }
    }

    /// Headline shown on the end screen.
    pub fn title(&self) -> &'static str {
        match self {
            EndReason::TimedOut => "Time's up!",
            EndReason::Won => "You win!",
            EndReason::Aborted => "Game stopped",
        }
    }
}

/// Player intent, independent of the input device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerAction {
    /// Start a new session (restarts a running one)
    Start,
    /// Drop the current item into the bin for this category
    Drop(Category),
    /// Let go of the item outside every bin
    Discard,
    End,
    FunFact,
}

/// Render a second count as `MM:SS`.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
