//! Per-user data repository.
//!
//! A [`UserRepository`] is opened for exactly one authenticated user and owns
//! that user's three collections: mood entries, journal entries, and habits.
//! Each collection lives under its own user-partitioned store key, so no
//! operation ever reads or rewrites another user's data. Every mutation
//! stamps the owning user id (for additions) and persists the touched
//! collection immediately.

use chrono::Utc;
use log::{debug, info};

use crate::{
    habits_key, journal_entries_key, mood_entries_key, sample_habits, sample_journal_entries,
    sample_mood_entries, Habit, HabitCategory, JournalEntry, JsonStore, MmError, Mood, MoodEntry,
    Result, User, DEMO_USER_ID,
};

/// Repository over one user's stored collections.
pub struct UserRepository {
    store: JsonStore,
    user_id: String,
    mood_entries: Vec<MoodEntry>,
    journal_entries: Vec<JournalEntry>,
    habits: Vec<Habit>,
}

impl UserRepository {
    /// Opens the repository for `user`, loading the persisted collections.
    ///
    /// A collection that is absent (or unreadable, which the store reports as
    /// absent) is seeded: the demo user gets the sample set when
    /// `seed_sample_data` is on, everyone else starts empty. Seeded
    /// collections are written back immediately so later opens see the same
    /// data.
    pub fn open(store: JsonStore, user: &User, seed_sample_data: bool) -> Result<Self> {
        let seed_demo = seed_sample_data && user.id == DEMO_USER_ID;
        debug!(
            "Opening repository for user {} (seed_demo={})",
            user.id, seed_demo
        );

        let mut repo = UserRepository {
            user_id: user.id.clone(),
            mood_entries: Vec::new(),
            journal_entries: Vec::new(),
            habits: Vec::new(),
            store,
        };

        match repo.store.read(&mood_entries_key(&repo.user_id)) {
            Some(entries) => repo.mood_entries = entries,
            None => {
                if seed_demo {
                    repo.mood_entries = sample_mood_entries();
                }
                repo.persist_moods()?;
            }
        }

        match repo.store.read(&journal_entries_key(&repo.user_id)) {
            Some(entries) => repo.journal_entries = entries,
            None => {
                if seed_demo {
                    repo.journal_entries = sample_journal_entries();
                }
                repo.persist_journals()?;
            }
        }

        match repo.store.read(&habits_key(&repo.user_id)) {
            Some(habits) => repo.habits = habits,
            None => {
                if seed_demo {
                    repo.habits = sample_habits();
                }
                repo.persist_habits()?;
            }
        }

        info!(
            "Repository ready for user {}: {} moods, {} journal entries, {} habits",
            repo.user_id,
            repo.mood_entries.len(),
            repo.journal_entries.len(),
            repo.habits.len()
        );
        Ok(repo)
    }

    /// The user this repository is scoped to.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn mood_entries(&self) -> &[MoodEntry] {
        &self.mood_entries
    }

    pub fn journal_entries(&self) -> &[JournalEntry] {
        &self.journal_entries
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    /// Records a mood check-in dated now.
    pub fn add_mood_entry(&mut self, mood: Mood, note: String) -> Result<&MoodEntry> {
        let entry = MoodEntry {
            mood,
            note,
            date: Utc::now(),
            user_id: self.user_id.clone(),
        };
        self.mood_entries.push(entry);
        self.persist_moods()?;

        info!("Mood entry added for user {}", self.user_id);
        Ok(&self.mood_entries[self.mood_entries.len() - 1])
    }

    /// Records a journal entry dated now.
    pub fn add_journal_entry(&mut self, title: String, content: String) -> Result<&JournalEntry> {
        let entry = JournalEntry {
            title,
            content,
            date: Utc::now(),
            user_id: self.user_id.clone(),
        };
        self.journal_entries.push(entry);
        self.persist_journals()?;

        info!("Journal entry added for user {}", self.user_id);
        Ok(&self.journal_entries[self.journal_entries.len() - 1])
    }

    /// Creates a new unchecked habit.
    pub fn add_habit(&mut self, name: String, category: HabitCategory) -> Result<&Habit> {
        let habit = Habit::new(name, category, self.user_id.clone());
        self.habits.push(habit);
        self.persist_habits()?;

        let habit = &self.habits[self.habits.len() - 1];
        info!("Habit {} added for user {}", habit.id, self.user_id);
        Ok(habit)
    }

    /// Flips a habit's completed flag.
    ///
    /// Completion bumps the streak and stamps `last_completed`; un-completion
    /// decrements the streak, floored at zero, and leaves `last_completed`
    /// alone.
    pub fn toggle_habit(&mut self, id: &str) -> Result<&Habit> {
        let index = self
            .habits
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| MmError::HabitNotFound { id: id.to_string() })?;

        let habit = &mut self.habits[index];
        habit.completed = !habit.completed;
        if habit.completed {
            habit.streak += 1;
            habit.last_completed = Some(Utc::now());
        } else {
            habit.streak = habit.streak.saturating_sub(1);
        }

        self.persist_habits()?;

        let habit = &self.habits[index];
        debug!(
            "Habit {} toggled: completed={}, streak={}",
            habit.id, habit.completed, habit.streak
        );
        Ok(habit)
    }

    /// Deletes a habit by id.
    pub fn delete_habit(&mut self, id: &str) -> Result<()> {
        let before = self.habits.len();
        self.habits.retain(|h| h.id != id);
        if self.habits.len() == before {
            return Err(MmError::HabitNotFound { id: id.to_string() });
        }

        self.persist_habits()?;
        info!("Habit {} deleted for user {}", id, self.user_id);
        Ok(())
    }

    fn persist_moods(&self) -> Result<()> {
        self.store
            .write(&mood_entries_key(&self.user_id), &self.mood_entries)
    }

    fn persist_journals(&self) -> Result<()> {
        self.store
            .write(&journal_entries_key(&self.user_id), &self.journal_entries)
    }

    fn persist_habits(&self) -> Result<()> {
        self.store.write(&habits_key(&self.user_id), &self.habits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample_users;

    fn store_in(dir: &tempfile::TempDir) -> JsonStore {
        JsonStore::open(dir.path().to_path_buf()).unwrap()
    }

    fn user(id: &str) -> User {
        sample_users()
            .into_iter()
            .find(|u| u.id == id)
            .expect("sample user")
    }

    #[test]
    fn demo_user_first_open_seeds_samples() {
        let dir = tempfile::tempdir().unwrap();
        let repo = UserRepository::open(store_in(&dir), &user("user1"), true).unwrap();

        assert_eq!(repo.mood_entries().len(), 3);
        assert_eq!(repo.journal_entries().len(), 2);
        assert_eq!(repo.habits().len(), 5);
    }

    #[test]
    fn other_users_and_disabled_seeding_start_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = UserRepository::open(store_in(&dir), &user("user2"), true).unwrap();
        assert!(repo.mood_entries().is_empty());
        assert!(repo.habits().is_empty());

        let dir = tempfile::tempdir().unwrap();
        let repo = UserRepository::open(store_in(&dir), &user("user1"), false).unwrap();
        assert!(repo.mood_entries().is_empty());
    }

    #[test]
    fn mood_entry_round_trips_and_stays_user_scoped() {
        let dir = tempfile::tempdir().unwrap();

        let mut repo = UserRepository::open(store_in(&dir), &user("user2"), true).unwrap();
        repo.add_mood_entry(Mood::Good, "solid day".to_string()).unwrap();

        // Reopen for the same user: exactly that entry comes back
        let repo = UserRepository::open(store_in(&dir), &user("user2"), true).unwrap();
        assert_eq!(repo.mood_entries().len(), 1);
        assert_eq!(repo.mood_entries()[0].mood, Mood::Good);
        assert_eq!(repo.mood_entries()[0].user_id, "user2");

        // A different user on the same store sees none of it
        let repo = UserRepository::open(store_in(&dir), &user("user3"), true).unwrap();
        assert!(repo.mood_entries().is_empty());
    }

    #[test]
    fn toggling_twice_restores_completed_and_streak() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = UserRepository::open(store_in(&dir), &user("user2"), true).unwrap();

        let id = repo
            .add_habit("Stretch".to_string(), HabitCategory::Health)
            .unwrap()
            .id
            .clone();

        // Build up a streak
        repo.toggle_habit(&id).unwrap();
        repo.toggle_habit(&id).unwrap();
        repo.toggle_habit(&id).unwrap();
        let habit = repo.habits().iter().find(|h| h.id == id).unwrap();
        assert!(habit.completed);
        assert_eq!(habit.streak, 2);

        let (was_completed, was_streak) = (habit.completed, habit.streak);
        repo.toggle_habit(&id).unwrap();
        repo.toggle_habit(&id).unwrap();
        let habit = repo.habits().iter().find(|h| h.id == id).unwrap();
        assert_eq!(habit.completed, was_completed);
        assert_eq!(habit.streak, was_streak);
    }

    #[test]
    fn streak_floors_at_zero_only_on_decrement() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = UserRepository::open(store_in(&dir), &user("user2"), true).unwrap();

        let id = repo
            .add_habit("Meditate".to_string(), HabitCategory::Mindfulness)
            .unwrap()
            .id
            .clone();

        // streak 0, incomplete -> complete bumps to 1, back down to 0
        assert_eq!(repo.toggle_habit(&id).unwrap().streak, 1);
        assert_eq!(repo.toggle_habit(&id).unwrap().streak, 0);

        // and a second un-complete cycle never goes negative
        assert_eq!(repo.toggle_habit(&id).unwrap().streak, 1);
        repo.toggle_habit(&id).unwrap();
        assert_eq!(repo.toggle_habit(&id).unwrap().streak, 1);
    }

    #[test]
    fn completion_stamps_last_completed_and_uncompletion_leaves_it() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = UserRepository::open(store_in(&dir), &user("user2"), true).unwrap();

        let id = repo
            .add_habit("Walk".to_string(), HabitCategory::Health)
            .unwrap()
            .id
            .clone();

        let stamped = repo.toggle_habit(&id).unwrap().last_completed;
        assert!(stamped.is_some());

        let after_untoggle = repo.toggle_habit(&id).unwrap().last_completed;
        assert_eq!(after_untoggle, stamped);
    }

    #[test]
    fn unknown_habit_ids_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = UserRepository::open(store_in(&dir), &user("user2"), true).unwrap();

        assert!(matches!(
            repo.toggle_habit("nope"),
            Err(MmError::HabitNotFound { .. })
        ));
        assert!(matches!(
            repo.delete_habit("nope"),
            Err(MmError::HabitNotFound { .. })
        ));
    }

    #[test]
    fn delete_removes_only_the_named_habit() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = UserRepository::open(store_in(&dir), &user("user1"), true).unwrap();

        let keep: Vec<String> = repo
            .habits()
            .iter()
            .skip(1)
            .map(|h| h.id.clone())
            .collect();
        let victim = repo.habits()[0].id.clone();

        repo.delete_habit(&victim).unwrap();
        let remaining: Vec<String> = repo.habits().iter().map(|h| h.id.clone()).collect();
        assert_eq!(remaining, keep);
    }

    #[test]
    fn logging_out_and_back_in_yields_the_same_collections() {
        use crate::SessionManager;

        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut sessions = SessionManager::with_static_identities(store.clone());

        assert!(sessions.login("michael.chen@email.com", "michael123").unwrap());
        {
            let user = sessions.require().unwrap();
            let mut repo = UserRepository::open(store.clone(), user, true).unwrap();
            repo.add_mood_entry(Mood::Excellent, "great run".to_string()).unwrap();
            repo.add_habit("Run".to_string(), HabitCategory::Health).unwrap();
        }

        sessions.logout().unwrap();
        assert!(sessions.login("michael.chen@email.com", "michael123").unwrap());

        let user = sessions.require().unwrap();
        let repo = UserRepository::open(store, user, true).unwrap();
        assert_eq!(repo.mood_entries().len(), 1);
        assert_eq!(repo.mood_entries()[0].note, "great run");
        assert_eq!(repo.habits().len(), 1);
    }

    #[test]
    fn corrupted_collection_falls_back_to_seed() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        std::fs::write(
            dir.path()
                .join(format!("{}.json", habits_key(DEMO_USER_ID))),
            "[{broken",
        )
        .unwrap();

        let repo = UserRepository::open(store, &user("user1"), true).unwrap();
        assert_eq!(repo.habits().len(), 5);
    }
}
