//! Static demo accounts, credentials, and seed collections.
//!
//! These stand in for a real identity backend and give the demo user a
//! populated dashboard on first login. The credential list lives here rather
//! than in the session module so the whole mock dataset is in one place.

use chrono::{DateTime, Duration, Utc};

use crate::{Habit, HabitCategory, JournalEntry, Mood, MoodEntry, Role, User};

/// The user id whose first login seeds the sample collections.
pub const DEMO_USER_ID: &str = "user1";

/// Email/password pairs accepted by the static credential verifier.
pub fn sample_credentials() -> Vec<(&'static str, &'static str)> {
    vec![
        ("admin@mindmate.com", "admin123"),
        ("sarah.johnson@email.com", "sarah123"),
        ("michael.chen@email.com", "michael123"),
        ("emma.rodriguez@email.com", "emma123"),
    ]
}

/// The static user records matching the credential list.
pub fn sample_users() -> Vec<User> {
    let now = Utc::now();
    vec![
        User {
            id: "admin".to_string(),
            name: "Admin User".to_string(),
            email: "admin@mindmate.com".to_string(),
            role: Role::Admin,
            created_at: parse_ts("2024-01-01T00:00:00Z"),
            last_login: now,
            is_active: true,
        },
        User {
            id: "user1".to_string(),
            name: "Sarah Johnson".to_string(),
            email: "sarah.johnson@email.com".to_string(),
            role: Role::User,
            created_at: parse_ts("2024-01-15T10:30:00Z"),
            last_login: now - Duration::days(1),
            is_active: true,
        },
        User {
            id: "user2".to_string(),
            name: "Michael Chen".to_string(),
            email: "michael.chen@email.com".to_string(),
            role: Role::User,
            created_at: parse_ts("2024-02-01T14:20:00Z"),
            last_login: now - Duration::days(2),
            is_active: true,
        },
        User {
            id: "user3".to_string(),
            name: "Emma Rodriguez".to_string(),
            email: "emma.rodriguez@email.com".to_string(),
            role: Role::User,
            created_at: parse_ts("2024-02-10T09:15:00Z"),
            last_login: now - Duration::weeks(1),
            is_active: false,
        },
    ]
}

/// Seed mood entries for the demo user's first login.
pub fn sample_mood_entries() -> Vec<MoodEntry> {
    let now = Utc::now();
    vec![
        MoodEntry {
            mood: Mood::Good,
            note: "Had a productive day at work".to_string(),
            date: now - Duration::days(1),
            user_id: DEMO_USER_ID.to_string(),
        },
        MoodEntry {
            mood: Mood::Excellent,
            note: "Went for a nice walk in the park".to_string(),
            date: now - Duration::days(2),
            user_id: DEMO_USER_ID.to_string(),
        },
        MoodEntry {
            mood: Mood::Okay,
            note: "Feeling a bit tired today".to_string(),
            date: now - Duration::days(3),
            user_id: DEMO_USER_ID.to_string(),
        },
    ]
}

/// Seed journal entries for the demo user's first login.
pub fn sample_journal_entries() -> Vec<JournalEntry> {
    let now = Utc::now();
    vec![
        JournalEntry {
            title: "Reflecting on Growth".to_string(),
            content: "Today I realized how much I've grown over the past few months. \
                      The challenges I faced seemed overwhelming at first, but looking back, \
                      they were opportunities for me to develop resilience and learn more \
                      about myself. I'm grateful for the support system I have and the \
                      progress I've made in my mental health journey."
                .to_string(),
            date: now - Duration::days(1),
            user_id: DEMO_USER_ID.to_string(),
        },
        JournalEntry {
            title: "Mindfulness Practice".to_string(),
            content: "Started my morning with 10 minutes of meditation. It's amazing how \
                      this simple practice can set the tone for the entire day. I felt more \
                      centered and calm, even when unexpected challenges came up at work. \
                      I want to make this a consistent habit."
                .to_string(),
            date: now - Duration::days(3),
            user_id: DEMO_USER_ID.to_string(),
        },
    ]
}

/// Seed habits for the demo user's first login.
pub fn sample_habits() -> Vec<Habit> {
    let now = Utc::now();
    let habit = |id: &str, name: &str, category, completed, streak, done: bool| Habit {
        id: id.to_string(),
        name: name.to_string(),
        category,
        completed,
        streak,
        last_completed: done.then_some(now),
        user_id: DEMO_USER_ID.to_string(),
    };

    vec![
        habit("1", "Drink 8 glasses of water", HabitCategory::Health, true, 5, true),
        habit("2", "10 minutes meditation", HabitCategory::Mindfulness, false, 3, false),
        habit("3", "Write in journal", HabitCategory::Mindfulness, true, 7, true),
        habit("4", "Exercise for 30 minutes", HabitCategory::Health, false, 2, false),
        habit("5", "Read for 20 minutes", HabitCategory::Learning, true, 4, true),
    ]
}

fn parse_ts(raw: &str) -> DateTime<Utc> {
    raw.parse().unwrap_or_else(|_| Utc::now())
}
