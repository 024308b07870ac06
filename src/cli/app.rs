//! CLI module for the mindmate application
//!
//! This module handles the command-line interface, dispatching commands to
//! the session manager and the per-user repository.

use std::{
    fs::{read_to_string, OpenOptions},
    io::{stdin, stdout, BufRead, Write},
    path::{Path, PathBuf},
    process::Command,
};

use log::info;

use shell_words::split;
use tempfile::Builder;

use crate::{
    analytics, Commands, Config, Conversation, HabitCategory, JsonStore, MmError, Mood,
    Result, ScriptedResponder, SessionManager, StaticCredentials, UserRepository,
};

/// CLI Application handler - processes CLI commands against the session
/// manager and per-user repository
pub struct App {
    /// The persistent store backing sessions and collections
    store: JsonStore,

    /// Session and identity handling
    sessions: SessionManager<StaticCredentials>,

    /// Application configuration
    config: Config,

    /// Where the configuration file lives, when overridden
    config_path: Option<PathBuf>,

    /// Whether to display verbose output
    verbose: bool,
}

impl App {
    /// Create a new CLI application over the given store and config
    pub fn new(
        store: JsonStore,
        config: Config,
        config_path: Option<PathBuf>,
        verbose: bool,
    ) -> Self {
        let sessions = SessionManager::with_static_identities(store.clone());
        Self {
            store,
            sessions,
            config,
            config_path,
            verbose,
        }
    }

    /// Run the CLI application with the given command
    pub async fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Login { email, password } => self.handle_login(&email, &password)?,

            Commands::Logout => self.handle_logout()?,

            Commands::Whoami => self.handle_whoami()?,

            Commands::Mood { mood, note } => self.handle_mood(mood, note)?,

            Commands::MoodHistory { limit } => self.handle_mood_history(limit)?,

            Commands::Journal {
                title,
                content,
                edit,
                file,
            } => self.handle_journal(title, content, file, edit)?,

            Commands::JournalHistory { limit } => self.handle_journal_history(limit)?,

            Commands::Habits => self.handle_habit_list()?,

            Commands::HabitAdd { name, category } => self.handle_habit_add(name, category)?,

            Commands::HabitToggle { id } => self.handle_habit_toggle(&id)?,

            Commands::HabitDelete { id, force } => self.handle_habit_delete(&id, force)?,

            Commands::Stats => self.handle_stats()?,

            Commands::Insights => self.handle_insights()?,

            Commands::Chat { message } => self.handle_chat(message).await?,

            Commands::Users => self.handle_users()?,

            Commands::Purge { force } => self.handle_purge(force)?,

            Commands::Config { show, set, reset } => self.handle_config(show, set, reset)?,
        }

        Ok(())
    }

    /// Opens the repository for the current session's user.
    fn open_repository(&self) -> Result<UserRepository> {
        let user = self.sessions.require()?;
        UserRepository::open(self.store.clone(), user, self.config.seed_sample_data)
    }

    fn handle_login(&mut self, email: &str, password: &str) -> Result<()> {
        if self.sessions.login(email, password)? {
            let user = self.sessions.require()?;
            println!("Welcome back, {}!", console::style(&user.name).bold());
            if self.verbose {
                println!("Logged in as {} ({:?})", user.email, user.role);
            }
        } else {
            println!("Login failed: email or password did not match.");
        }
        Ok(())
    }

    fn handle_logout(&mut self) -> Result<()> {
        match self.sessions.current() {
            Some(user) => {
                let name = user.name.clone();
                self.sessions.logout()?;
                println!("Goodbye, {}. Your data is saved for next time.", name);
            }
            None => println!("No active session."),
        }
        Ok(())
    }

    fn handle_whoami(&self) -> Result<()> {
        let user = self.sessions.require()?;
        println!(
            "{} <{}> ({:?}){}",
            console::style(&user.name).bold(),
            user.email,
            user.role,
            if user.is_active { "" } else { " [inactive]" }
        );
        println!("Last login: {}", user.last_login.format("%Y-%m-%d %H:%M"));
        Ok(())
    }

    fn handle_mood(&self, mood: Mood, note: Option<String>) -> Result<()> {
        let mut repo = self.open_repository()?;
        let note = note.unwrap_or_default();

        let entry = repo.add_mood_entry(mood, note)?;
        println!(
            "{} Mood recorded: {} — {}",
            entry.mood.emoji(),
            entry.mood.label(),
            entry.mood.message()
        );
        Ok(())
    }

    fn handle_mood_history(&self, limit: usize) -> Result<()> {
        let repo = self.open_repository()?;
        let entries = repo.mood_entries();

        if entries.is_empty() {
            println!("No moods recorded yet. Try `mindmate mood good`.");
            return Ok(());
        }

        for entry in entries.iter().rev().take(limit) {
            print!(
                "{}  {} {}",
                entry.date.format("%Y-%m-%d"),
                entry.mood.emoji(),
                console::style(entry.mood.label()).bold()
            );
            if entry.note.is_empty() {
                println!();
            } else {
                println!("  {}", console::style(&entry.note).dim());
            }
        }
        Ok(())
    }

    fn handle_journal(
        &self,
        title: String,
        content: Option<String>,
        file: Option<PathBuf>,
        edit: bool,
    ) -> Result<()> {
        let title = non_blank(title, "title")?;

        // Get content based on the provided options
        let content = match (content, file) {
            (Some(c), _) => c,
            (_, Some(file_path)) => {
                if !file_path.exists() {
                    return Err(MmError::InvalidInput {
                        message: format!("File not found: {}", file_path.display()),
                    });
                }
                read_to_string(file_path)?
            }
            (None, None) => {
                if edit {
                    self.open_editor_for_content(&title)?
                } else {
                    return Err(MmError::InvalidInput {
                        message: "Provide entry content with --content, --file, or --edit"
                            .to_string(),
                    });
                }
            }
        };
        let content = non_blank(content, "content")?;

        let mut repo = self.open_repository()?;
        let entry = repo.add_journal_entry(title, content)?;
        println!(
            "Journal entry saved: {}",
            console::style(&entry.title).bold()
        );
        Ok(())
    }

    fn handle_journal_history(&self, limit: usize) -> Result<()> {
        let repo = self.open_repository()?;
        let entries = repo.journal_entries();

        if entries.is_empty() {
            println!("No journal entries yet. Try `mindmate journal -T 'First entry' --edit`.");
            return Ok(());
        }

        for (i, entry) in entries.iter().rev().take(limit).enumerate() {
            if i > 0 {
                println!("{}", "-".repeat(50));
            }
            println!(
                "{}  {}",
                entry.date.format("%Y-%m-%d %H:%M"),
                console::style(&entry.title).bold()
            );
            println!("{}", entry.content);
        }
        Ok(())
    }

    fn handle_habit_list(&self) -> Result<()> {
        let repo = self.open_repository()?;
        let habits = repo.habits();

        if habits.is_empty() {
            println!("No habits tracked yet. Try `mindmate habit-add 'Drink water'`.");
            return Ok(());
        }

        for habit in habits {
            let check = if habit.completed { "[x]" } else { "[ ]" };
            println!(
                "{} {}  {} ({}) 🔥 {}",
                check,
                console::style(&habit.id).dim(),
                console::style(&habit.name).bold(),
                console::style(habit.category.label()).cyan(),
                habit.streak
            );
        }
        println!(
            "\n{} of {} completed today",
            habits.iter().filter(|h| h.completed).count(),
            habits.len()
        );
        Ok(())
    }

    fn handle_habit_add(&self, name: String, category: HabitCategory) -> Result<()> {
        let name = non_blank(name, "habit name")?;
        let mut repo = self.open_repository()?;

        let habit = repo.add_habit(name, category)?;
        println!("Habit created with ID: {}", habit.id);
        Ok(())
    }

    fn handle_habit_toggle(&self, id: &str) -> Result<()> {
        let mut repo = self.open_repository()?;
        let habit = repo.toggle_habit(id)?;

        if habit.completed {
            println!(
                "Nice! {} completed — streak is now {}.",
                console::style(&habit.name).bold(),
                habit.streak
            );
        } else {
            println!(
                "{} unchecked — streak is now {}.",
                console::style(&habit.name).bold(),
                habit.streak
            );
        }
        Ok(())
    }

    fn handle_habit_delete(&self, id: &str, force: bool) -> Result<()> {
        let mut repo = self.open_repository()?;

        if !force {
            let name = repo
                .habits()
                .iter()
                .find(|h| h.id == id)
                .map(|h| h.name.clone())
                .ok_or_else(|| MmError::HabitNotFound { id: id.to_string() })?;
            if !confirm(&format!("Delete habit '{}'?", name))? {
                println!("Aborted.");
                return Ok(());
            }
        }

        repo.delete_habit(id)?;
        println!("Habit deleted.");
        Ok(())
    }

    fn handle_stats(&self) -> Result<()> {
        let repo = self.open_repository()?;
        let now = chrono::Utc::now();
        let moods = repo.mood_entries();
        let journals = repo.journal_entries();
        let habits = repo.habits();

        println!("{}", console::style("Your dashboard").bold());
        match moods.last() {
            Some(entry) => println!(
                "Today's mood:       {} {} — {}",
                entry.mood.emoji(),
                entry.mood.label(),
                entry.mood.message()
            ),
            None => println!("Today's mood:       not tracked yet"),
        }
        println!(
            "Habits completed:   {}/{}",
            habits.iter().filter(|h| h.completed).count(),
            habits.len()
        );
        println!(
            "Mood streak:        {} days",
            analytics::mood_streak(moods, now)
        );
        println!(
            "Weekly average:     {:.1} / 5",
            analytics::weekly_mood_average(moods, now)
        );
        println!(
            "Journal streak:     {} days",
            analytics::journal_streak(journals, now)
        );
        println!(
            "Journal words:      {}",
            analytics::total_journal_words(journals)
        );
        println!(
            "Best habit streak:  {} days",
            analytics::best_habit_streak(habits)
        );
        println!(
            "Habit completion:   {}%",
            analytics::weekly_habit_completion(habits)
        );
        println!(
            "Mindful minutes:    {} min",
            analytics::mindful_minutes(habits)
        );

        if self.verbose {
            println!("\n{}", console::style("7-day mood trend").bold());
            for (i, slot) in analytics::weekly_mood_trend(moods, now).iter().enumerate() {
                let day = (now - chrono::Duration::days(6 - i as i64)).format("%a");
                match slot {
                    Some(score) => println!("  {}  {}/5", day, score),
                    None => println!("  {}  no data", day),
                }
            }

            println!("\n{}", console::style("Mood distribution").bold());
            for (mood, count) in analytics::mood_distribution(moods) {
                println!("  {} {:<10} {}", mood.emoji(), mood.label(), count);
            }
        }
        Ok(())
    }

    fn handle_insights(&self) -> Result<()> {
        let repo = self.open_repository()?;
        let insights = analytics::generate_insights(repo.mood_entries(), repo.habits());

        println!("{}", console::style("Key insights").bold());
        for insight in insights {
            println!("  {}", insight);
        }
        Ok(())
    }

    async fn handle_chat(&self, message: Option<String>) -> Result<()> {
        // The companion needs no session; conversations are not persisted
        let mut conversation = Conversation::new(ScriptedResponder);
        print_companion(&conversation.messages()[0].content);

        if let Some(message) = message {
            let message = non_blank(message, "message")?;
            let reply = conversation.send(&message).await?;
            print_companion(&reply.content);
            return Ok(());
        }

        println!(
            "{}",
            console::style("Type your message; 'quit' ends the conversation.").dim()
        );
        let input = stdin();
        loop {
            print!("you> ");
            stdout().flush()?;

            let mut line = String::new();
            if input.lock().read_line(&mut line)? == 0 {
                break; // EOF
            }
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
                break;
            }

            // Input is not read again until this send resolves
            let reply = conversation.send(line).await?;
            print_companion(&reply.content);
        }

        println!("Take care of yourself. 💙");
        Ok(())
    }

    fn handle_users(&self) -> Result<()> {
        let current = self.sessions.require()?;
        if !current.is_admin() {
            return Err(MmError::PermissionDenied {
                action: "users".to_string(),
            });
        }

        for user in self.sessions.users() {
            println!(
                "{:<8} {:<16} {:<28} {:?}{}",
                user.id,
                user.name,
                user.email,
                user.role,
                if user.is_active { "" } else { " [inactive]" }
            );
        }
        Ok(())
    }

    fn handle_purge(&self, force: bool) -> Result<()> {
        if !force
            && !confirm("This deletes EVERY user's stored moods, journals, and habits. Continue?")?
        {
            println!("Aborted.");
            return Ok(());
        }

        let removed = self.sessions.purge_all_data()?;
        println!("Purged {} stored collections.", removed);
        Ok(())
    }

    fn handle_config(&mut self, show: bool, set: Option<String>, reset: bool) -> Result<()> {
        if reset {
            self.config = Config::default();
            self.config.save(self.config_path.clone())?;
            println!("Configuration reset to defaults.");
        }

        if let Some(ref assignment) = set {
            self.config.set(&assignment)?;
            self.config.save(self.config_path.clone())?;
            println!("Configuration updated.");
        }

        if show || (!reset && set.is_none()) {
            println!("{}", serde_json::to_string_pretty(&self.config)?);
        }
        Ok(())
    }

    fn open_editor_for_content(&self, title: &str) -> Result<String> {
        // Create a temporary file with .md extension
        let temp_file = Builder::new().suffix(".md").tempfile()?;
        let temp_path = temp_file.path().to_path_buf();

        // Get editor from config or environment
        let editor_cmd = self.config.get_editor_command();

        // Write template to the temp file
        self.write_editor_template(&temp_path, title)?;

        // Open editor
        info!("Opening editor to write the journal entry. Save and exit when done...");
        self.launch_editor(&editor_cmd, &temp_path)?;

        // Read and process the content
        let content = read_to_string(&temp_path)?;
        Ok(process_editor_content(content))
    }

    fn write_editor_template(&self, path: &Path, title: &str) -> Result<()> {
        let mut file = OpenOptions::new().write(true).open(path)?;

        // Write template with helpful comments
        writeln!(file, "# {}", title)?;
        writeln!(file)?;
        writeln!(file, "<!-- ")?;
        writeln!(file, "Write your journal entry below.")?;
        writeln!(
            file,
            "Lines that start with <!-- and end with --> are comments and will be ignored."
        )?;
        writeln!(file, "Save and exit the editor when you're done.")?;
        writeln!(file, "-->")?;
        writeln!(file)?;

        Ok(())
    }

    fn launch_editor(&self, editor_cmd: &str, file_path: &Path) -> Result<()> {
        // Convert file path to string once
        let path_str = file_path.to_string_lossy();

        // Handle shell-like command parsing
        let args = split(editor_cmd).map_err(|e| MmError::EditorError {
            message: format!("Failed to parse editor command: {}", e),
        })?;

        if args.is_empty() {
            return Err(MmError::EditorError {
                message: "Empty editor command".to_string(),
            });
        }

        // First word is the program name, rest are arguments
        let program = &args[0];

        let mut command = Command::new(program);
        if args.len() > 1 {
            command.args(&args[1..]);
        }
        command.arg(path_str.as_ref());

        let status = command.status()?;
        if !status.success() {
            return Err(MmError::EditorError {
                message: "Editor exited with non-zero status".to_string(),
            });
        }

        Ok(())
    }
}

fn print_companion(content: &str) {
    println!("{} {}", console::style("companion>").cyan(), content);
}

/// Rejects empty or whitespace-only text before it reaches the repository.
fn non_blank(value: String, what: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(MmError::InvalidInput {
            message: format!("{} must not be empty", what),
        });
    }
    Ok(value)
}

fn process_editor_content(content: String) -> String {
    // Remove HTML comments from content
    content
        .lines()
        .filter(|line| {
            !line.trim_start().starts_with("<!--") && !line.trim_end().ends_with("-->")
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Prompt for a yes/no confirmation on stdin.
fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    stdout().flush()?;

    let mut answer = String::new();
    stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_blank_rejects_whitespace_only_text() {
        assert!(non_blank("   ".to_string(), "title").is_err());
        assert!(non_blank(String::new(), "content").is_err());
        assert_eq!(non_blank(" ok ".to_string(), "title").unwrap(), " ok ");
    }

    #[test]
    fn editor_comment_lines_are_stripped() {
        let raw = "# Title\n<!-- \nhelp text\n-->\nreal content".to_string();
        let processed = process_editor_content(raw);
        assert!(processed.contains("real content"));
        assert!(!processed.contains("<!--"));
        // Inner lines of the comment block are kept; only markers go
        assert!(processed.contains("help text"));
    }
}
