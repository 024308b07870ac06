//! Derived statistics over the in-memory collections.
//!
//! Everything here is a pure function over a snapshot, recomputed on each
//! call. Data volumes are tiny and there is no invalidation event to hang a
//! cache off, so none is built. The reference instant (`now`) is always an
//! explicit parameter to keep the functions deterministic under test.

use chrono::{DateTime, Duration, Utc};

use crate::{Habit, HabitCategory, JournalEntry, Mood, MoodEntry};

/// Whole-day offset of `date` from `now`, floored.
fn day_offset(now: DateTime<Utc>, date: DateTime<Utc>) -> i64 {
    (now - date).num_seconds().div_euclid(86_400)
}

/// Count of consecutive tracked days ending today, walking newest-first.
///
/// A day extends the streak only when its whole-day offset from `now` equals
/// the running count, so any calendar gap breaks it immediately.
pub fn mood_streak(entries: &[MoodEntry], now: DateTime<Utc>) -> u32 {
    consecutive_days(entries.iter().map(|e| e.date), now)
}

/// Same walk as [`mood_streak`], over journal entry dates.
pub fn journal_streak(entries: &[JournalEntry], now: DateTime<Utc>) -> u32 {
    consecutive_days(entries.iter().map(|e| e.date), now)
}

fn consecutive_days(
    dates: impl DoubleEndedIterator<Item = DateTime<Utc>>,
    now: DateTime<Utc>,
) -> u32 {
    let mut streak = 0u32;
    for date in dates.rev() {
        if day_offset(now, date) == i64::from(streak) {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// Mean mood score over the trailing 7 days, 0.0 when the window is empty.
pub fn weekly_mood_average(entries: &[MoodEntry], now: DateTime<Utc>) -> f64 {
    let week_ago = now - Duration::days(7);
    let recent: Vec<&MoodEntry> = entries.iter().filter(|e| e.date >= week_ago).collect();
    if recent.is_empty() {
        return 0.0;
    }

    let sum: u32 = recent.iter().map(|e| u32::from(e.mood.score())).sum();
    f64::from(sum) / recent.len() as f64
}

/// Completed habits over total, as a rounded integer percent. 0 with no habits.
pub fn weekly_habit_completion(habits: &[Habit]) -> u32 {
    if habits.is_empty() {
        return 0;
    }
    let completed = habits.iter().filter(|h| h.completed).count();
    (completed as f64 / habits.len() as f64 * 100.0).round() as u32
}

/// The highest streak across all habits, 0 with none.
pub fn best_habit_streak(habits: &[Habit]) -> u32 {
    habits.iter().map(|h| h.streak).max().unwrap_or(0)
}

/// Total whitespace-separated word count across all journal entries.
pub fn total_journal_words(entries: &[JournalEntry]) -> usize {
    entries
        .iter()
        .map(|e| e.content.split_whitespace().count())
        .sum()
}

/// Entry count per mood label, in best-to-worst order.
pub fn mood_distribution(entries: &[MoodEntry]) -> Vec<(Mood, usize)> {
    Mood::all()
        .into_iter()
        .map(|mood| (mood, entries.iter().filter(|e| e.mood == mood).count()))
        .collect()
}

/// Mood score per day over the trailing week, oldest day first. Days without
/// an entry are `None`; days with several use the most recent entry.
pub fn weekly_mood_trend(entries: &[MoodEntry], now: DateTime<Utc>) -> [Option<u8>; 7] {
    let mut trend = [None; 7];
    for (slot, value) in trend.iter_mut().enumerate() {
        let offset = 6 - slot as i64;
        *value = entries
            .iter()
            .rev()
            .find(|e| day_offset(now, e.date) == offset)
            .map(|e| e.mood.score());
    }
    trend
}

/// Minutes of completed mindfulness practice, assuming 15 minutes per habit.
pub fn mindful_minutes(habits: &[Habit]) -> u32 {
    let completed = habits
        .iter()
        .filter(|h| h.category == HabitCategory::Mindfulness && h.completed)
        .count();
    completed as u32 * 15
}

/// Produces 1-2 canned insight sentences from the overall mood average and
/// the habit completion ratio, with a generic prompt when there is nothing
/// to say.
pub fn generate_insights(entries: &[MoodEntry], habits: &[Habit]) -> Vec<String> {
    let mut insights = Vec::new();

    if !entries.is_empty() {
        let sum: u32 = entries.iter().map(|e| u32::from(e.mood.score())).sum();
        let avg = f64::from(sum) / entries.len() as f64;

        let line = if avg >= 4.0 {
            "🌟 You're maintaining a positive mood overall! Keep up the great work."
        } else if avg <= 2.0 {
            "💙 Your mood has been challenging lately. Consider reaching out for support."
        } else {
            "📊 Your mood varies throughout tracking. Look for patterns in your journal entries."
        };
        insights.push(line.to_string());
    }

    if !habits.is_empty() {
        let completed = habits.iter().filter(|h| h.completed).count();
        let rate = completed as f64 / habits.len() as f64;

        let line = if rate >= 0.8 {
            "🎯 Excellent habit consistency! You're building strong routines."
        } else if rate >= 0.5 {
            "⚡ Good progress on habits. Focus on the ones you miss most often."
        } else {
            "🌱 Habit building takes time. Start with just 1-2 habits and build momentum."
        };
        insights.push(line.to_string());
    }

    if insights.is_empty() {
        insights.push(
            "📈 Keep tracking to see personalized insights about your wellbeing patterns!"
                .to_string(),
        );
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mood_on(days_ago: i64, mood: Mood, now: DateTime<Utc>) -> MoodEntry {
        MoodEntry {
            mood,
            note: String::new(),
            date: now - Duration::days(days_ago),
            user_id: "user1".to_string(),
        }
    }

    fn journal_on(days_ago: i64, content: &str, now: DateTime<Utc>) -> JournalEntry {
        JournalEntry {
            title: "t".to_string(),
            content: content.to_string(),
            date: now - Duration::days(days_ago),
            user_id: "user1".to_string(),
        }
    }

    fn habit(completed: bool, streak: u32, category: HabitCategory) -> Habit {
        Habit {
            id: "h".to_string(),
            name: "h".to_string(),
            category,
            completed,
            streak,
            last_completed: None,
            user_id: "user1".to_string(),
        }
    }

    #[test]
    fn streak_counts_consecutive_days_and_breaks_on_a_gap() {
        let now = Utc::now();
        // Stored oldest-first: gap at day 3, then today-2, today-1, today
        let entries = vec![
            mood_on(4, Mood::Okay, now),
            mood_on(2, Mood::Okay, now),
            mood_on(1, Mood::Good, now),
            mood_on(0, Mood::Good, now),
        ];
        assert_eq!(mood_streak(&entries, now), 3);
    }

    #[test]
    fn streak_is_zero_without_an_entry_today() {
        let now = Utc::now();
        assert_eq!(mood_streak(&[], now), 0);
        let entries = vec![mood_on(2, Mood::Good, now), mood_on(1, Mood::Good, now)];
        assert_eq!(mood_streak(&entries, now), 0);
    }

    #[test]
    fn journal_streak_uses_the_same_walk() {
        let now = Utc::now();
        let entries = vec![journal_on(1, "x", now), journal_on(0, "x", now)];
        assert_eq!(journal_streak(&entries, now), 2);
    }

    #[test]
    fn weekly_average_is_zero_with_no_entries_in_window() {
        let now = Utc::now();
        assert_eq!(weekly_mood_average(&[], now), 0.0);

        let old = vec![mood_on(10, Mood::Excellent, now), mood_on(8, Mood::Good, now)];
        assert_eq!(weekly_mood_average(&old, now), 0.0);
    }

    #[test]
    fn weekly_average_is_the_mean_over_the_trailing_week() {
        let now = Utc::now();
        let entries = vec![
            mood_on(10, Mood::Terrible, now), // outside window, ignored
            mood_on(3, Mood::Good, now),      // 4
            mood_on(1, Mood::Excellent, now), // 5
            mood_on(0, Mood::Okay, now),      // 3
        ];
        assert!((weekly_mood_average(&entries, now) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn completion_percent_rounds_to_nearest_integer() {
        let habits = vec![
            habit(true, 0, HabitCategory::Health),
            habit(false, 0, HabitCategory::Health),
            habit(true, 0, HabitCategory::Health),
        ];
        assert_eq!(weekly_habit_completion(&habits), 67);
        assert_eq!(weekly_habit_completion(&[]), 0);
    }

    #[test]
    fn insight_thresholds_select_the_expected_lines() {
        let now = Utc::now();

        let upbeat = vec![mood_on(0, Mood::Excellent, now), mood_on(1, Mood::Good, now)];
        assert!(generate_insights(&upbeat, &[])[0].contains("positive mood"));

        let rough = vec![mood_on(0, Mood::Terrible, now), mood_on(1, Mood::NotGreat, now)];
        assert!(generate_insights(&rough, &[])[0].contains("challenging"));

        let mixed = vec![mood_on(0, Mood::Okay, now)];
        assert!(generate_insights(&mixed, &[])[0].contains("varies"));

        let strong: Vec<Habit> = (0..5).map(|i| habit(i > 0, 0, HabitCategory::Health)).collect();
        assert!(generate_insights(&[], &strong)[0].contains("consistency"));

        let half: Vec<Habit> = (0..4).map(|i| habit(i % 2 == 0, 0, HabitCategory::Health)).collect();
        assert!(generate_insights(&[], &half)[0].contains("Good progress"));

        let weak: Vec<Habit> = (0..4).map(|i| habit(i == 0, 0, HabitCategory::Health)).collect();
        assert!(generate_insights(&[], &weak)[0].contains("takes time"));
    }

    #[test]
    fn insights_fall_back_to_the_generic_prompt_when_empty() {
        let insights = generate_insights(&[], &[]);
        assert_eq!(insights.len(), 1);
        assert!(insights[0].contains("Keep tracking"));
    }

    #[test]
    fn insights_cover_both_moods_and_habits_when_present() {
        let now = Utc::now();
        let entries = vec![mood_on(0, Mood::Good, now)];
        let habits = vec![habit(true, 2, HabitCategory::Health)];
        assert_eq!(generate_insights(&entries, &habits).len(), 2);
    }

    #[test]
    fn supplementary_statistics() {
        let now = Utc::now();

        let habits = vec![
            habit(true, 5, HabitCategory::Mindfulness),
            habit(false, 9, HabitCategory::Health),
            habit(true, 2, HabitCategory::Mindfulness),
        ];
        assert_eq!(best_habit_streak(&habits), 9);
        assert_eq!(best_habit_streak(&[]), 0);
        assert_eq!(mindful_minutes(&habits), 30);

        let entries = vec![journal_on(0, "three short words", now)];
        assert_eq!(total_journal_words(&entries), 3);

        let moods = vec![
            mood_on(0, Mood::Good, now),
            mood_on(1, Mood::Good, now),
            mood_on(2, Mood::Terrible, now),
        ];
        let dist = mood_distribution(&moods);
        assert_eq!(dist[1], (Mood::Good, 2));
        assert_eq!(dist[4], (Mood::Terrible, 1));
    }

    #[test]
    fn trend_slots_cover_the_trailing_week_oldest_first() {
        let now = Utc::now();
        let entries = vec![
            mood_on(6, Mood::Terrible, now),
            mood_on(2, Mood::Okay, now),
            mood_on(2, Mood::Excellent, now), // same day, most recent wins
            mood_on(0, Mood::Good, now),
        ];

        let trend = weekly_mood_trend(&entries, now);
        assert_eq!(trend[0], Some(1));
        assert_eq!(trend[1], None);
        assert_eq!(trend[4], Some(5));
        assert_eq!(trend[6], Some(4));
    }
}
