//! MindMate personal wellbeing tracker library
//!
//! This library provides functionality for mood logging, journaling, habit
//! tracking, derived analytics, and a scripted conversational companion,
//! persisted to a local JSON store and scoped per user.

pub mod analytics;
mod cli;
mod companion;
mod config;
mod errors;
mod records;
mod repository;
mod sample_data;
mod session;
mod store;
mod types;
mod user;

// Re-export key components
pub use cli::*;
pub use companion::*;
pub use config::*;
pub use errors::*;
pub use records::*;
pub use repository::*;
pub use sample_data::*;
pub use session::*;
pub use store::*;
pub use types::*;
pub use user::*;
