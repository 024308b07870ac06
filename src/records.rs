//! Core data structures for the mindmate application.
//!
//! This module contains the tracked record types: mood entries, journal
//! entries, and habits, together with their fixed enumerations.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The fixed five-value mood scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mood {
    Terrible,
    NotGreat,
    Okay,
    Good,
    Excellent,
}

impl Mood {
    /// Numeric score on the 1-5 scale used by the analytics functions.
    pub fn score(self) -> u8 {
        match self {
            Mood::Terrible => 1,
            Mood::NotGreat => 2,
            Mood::Okay => 3,
            Mood::Good => 4,
            Mood::Excellent => 5,
        }
    }

    /// The label stored on disk and shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            Mood::Terrible => "Terrible",
            Mood::NotGreat => "Not Great",
            Mood::Okay => "Okay",
            Mood::Good => "Good",
            Mood::Excellent => "Excellent",
        }
    }

    /// Parses a stored label. Unrecognized labels fall back to the neutral
    /// mood rather than failing, so one odd record cannot poison a collection.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Terrible" => Mood::Terrible,
            "Not Great" => Mood::NotGreat,
            "Okay" => Mood::Okay,
            "Good" => Mood::Good,
            "Excellent" => Mood::Excellent,
            _ => Mood::Okay,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Terrible => "😢",
            Mood::NotGreat => "😕",
            Mood::Okay => "😐",
            Mood::Good => "😊",
            Mood::Excellent => "😄",
        }
    }

    /// Short encouragement shown next to today's mood.
    pub fn message(self) -> &'static str {
        match self {
            Mood::Terrible => "You are not alone 💙",
            Mood::NotGreat => "This too shall pass 🌈",
            Mood::Okay => "Tomorrow is yours to shape! 🌅",
            Mood::Good => "Great going! You're doing wonderful! 🌟",
            Mood::Excellent => "You're absolutely glowing! ✨",
        }
    }

    pub fn all() -> [Mood; 5] {
        [
            Mood::Excellent,
            Mood::Good,
            Mood::Okay,
            Mood::NotGreat,
            Mood::Terrible,
        ]
    }
}

impl Serialize for Mood {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Mood {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Mood::from_label(&label))
    }
}

/// A single mood check-in. The UI assumes one per day but nothing below it
/// enforces that; duplicate days are possible and the streak logic tolerates
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodEntry {
    pub mood: Mood,
    /// Free-text note accompanying the check-in
    pub note: String,
    /// When the mood was logged
    pub date: DateTime<Utc>,
    /// Owning user, stamped at creation and never reassigned
    pub user_id: String,
}

/// A dated journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub title: String,
    pub content: String,
    pub date: DateTime<Utc>,
    pub user_id: String,
}

/// Fixed habit categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum HabitCategory {
    Health,
    Productivity,
    Mindfulness,
    Social,
    Learning,
    Creative,
}

impl HabitCategory {
    pub fn label(self) -> &'static str {
        match self {
            HabitCategory::Health => "Health",
            HabitCategory::Productivity => "Productivity",
            HabitCategory::Mindfulness => "Mindfulness",
            HabitCategory::Social => "Social",
            HabitCategory::Learning => "Learning",
            HabitCategory::Creative => "Creative",
        }
    }
}

/// A tracked habit. The streak is a toggle counter, not a calendar streak:
/// completing bumps it, un-completing decrements it floored at zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier for the habit
    pub id: String,
    pub name: String,
    pub category: HabitCategory,
    /// Whether the habit is currently checked off
    pub completed: bool,
    /// Always >= 0
    pub streak: u32,
    /// Set when the habit was last marked complete
    pub last_completed: Option<DateTime<Utc>>,
    pub user_id: String,
}

impl Habit {
    /// Creates a new unchecked habit owned by the given user.
    pub fn new(name: String, category: HabitCategory, user_id: String) -> Self {
        let now = Utc::now();
        // Generate a unique ID using timestamp and name
        let id = format!(
            "{}-{}",
            now.timestamp_millis(),
            name.to_lowercase().replace(' ', "-")
        );

        Habit {
            id,
            name,
            category,
            completed: false,
            streak: 0,
            last_completed: None,
            user_id,
        }
    }
}
