//! Shared types for the mindmate application.
//!
//! This module contains the crate-wide Result alias and the CLI command
//! surface consumed by the application handler.

use std::path::PathBuf;

use clap::Subcommand;

use crate::{HabitCategory, MmError, Mood};

/// A specialized Result type for mindmate operations.
pub type Result<T> = std::result::Result<T, MmError>;

/// Available subcommands for the mindmate application
#[derive(Subcommand)]
pub enum Commands {
    /// Log in with one of the demo accounts
    Login {
        /// Email address of the account
        email: String,

        /// Password for the account
        password: String,
    },

    /// End the current session (stored data is kept)
    Logout,

    /// Show the currently logged-in user
    Whoami,

    /// Record today's mood
    Mood {
        /// How you're feeling
        #[clap(value_enum)]
        mood: Mood,

        /// Optional note about what shaped the mood
        #[clap(short, long)]
        note: Option<String>,
    },

    /// List recorded moods, newest first
    MoodHistory {
        /// Limit the number of entries shown
        #[clap(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },

    /// Write a journal entry
    Journal {
        /// Title of the entry
        #[clap(short = 'T', long)]
        title: String,

        /// Content of the entry
        #[clap(short, long)]
        content: Option<String>,

        /// Compose the content in your editor
        #[clap(short, long)]
        edit: bool,

        /// Path to a file containing the entry's content
        #[clap(short, long)]
        file: Option<PathBuf>,
    },

    /// List journal entries, newest first
    JournalHistory {
        /// Limit the number of entries shown
        #[clap(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },

    /// List your habits
    Habits,

    /// Add a habit to track
    HabitAdd {
        /// Name of the habit
        name: String,

        /// Category of the habit
        #[clap(short, long, value_enum, default_value = "health")]
        category: HabitCategory,
    },

    /// Toggle a habit's completion for today
    HabitToggle {
        /// ID of the habit to toggle
        id: String,
    },

    /// Delete a habit
    HabitDelete {
        /// ID of the habit to delete
        id: String,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Show your dashboard statistics
    Stats,

    /// Show generated insights about your wellbeing patterns
    Insights,

    /// Talk to the companion (one message, or interactively)
    Chat {
        /// Message to send; omit for an interactive session
        message: Option<String>,
    },

    /// List all user accounts (admin only)
    Users,

    /// Delete every user's stored collections (admin only)
    Purge {
        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Configuration management
    Config {
        /// Show current configuration
        #[clap(short = 'S', long)]
        show: bool,

        /// Update a configuration setting (key=value)
        #[clap(short, long)]
        set: Option<String>,

        /// Reset configuration to defaults
        #[clap(short, long)]
        reset: bool,
    },
}
