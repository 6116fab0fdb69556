//! CLI module for the livingnotes binary
//!
//! This module plays the part of the applet's persistence glue: it loads the
//! stored text, runs it through the note helpers and writes the result back.
use std::io::Write;

use chrono::DateTime;
use log::{debug, error, info};

use crate::{
    create_note, find_note, normalize_list, now_millis, parse_notification_state, parse_tags,
    read_store_text, remove, stringify_notes, toggle_pinned, try_parse_notes,
    update_last_viewed, upsert, write_store_text, Commands, Config, Note, NotesError, Result,
};

/// CLI Application handler - processes CLI commands against the stored notes
pub struct App {
    /// Application configuration
    config: Config,

    /// Whether to display verbose output
    verbose: bool,
}

impl App {
    /// Create a new CLI application with the given config
    pub fn new(config: Config, verbose: bool) -> Self {
        Self { config, verbose }
    }

    /// Run the CLI application with the given command, printing to `out`
    pub fn run<W: Write>(&self, command: Commands, out: &mut W) -> Result<()> {
        match command {
            Commands::Create {
                title,
                body,
                priority,
                tags,
                due,
            } => self.create(title, body, priority, tags, due, out)?,

            Commands::List { json } => self.list(json, out)?,

            Commands::View { id } => self.view(&id, out)?,

            Commands::Pin { id } => self.pin(&id, out)?,

            Commands::Delete { id } => self.delete(&id, out)?,

            Commands::Normalize => self.normalize(out)?,

            Commands::State => self.state(out)?,
        }

        Ok(())
    }

    // Unreadable stores stop the command so they are never overwritten
    fn load(&self) -> Result<Vec<Note>> {
        let text = read_store_text(&self.config.notes_file)?;
        let notes = try_parse_notes(&text).map_err(|e| {
            error!(
                "Stored notes in {} are unreadable: {}",
                self.config.notes_file.display(),
                e
            );
            e
        })?;
        Ok(normalize_list(notes))
    }

    fn save(&self, notes: &[Note]) -> Result<()> {
        debug!(
            "Saving {} notes to {}",
            notes.len(),
            self.config.notes_file.display()
        );
        write_store_text(&self.config.notes_file, &stringify_notes(notes))
    }

    fn require<'a>(notes: &'a [Note], id: &str) -> Result<&'a Note> {
        find_note(notes, id).ok_or_else(|| NotesError::NoteNotFound { id: id.to_string() })
    }

    fn create<W: Write>(
        &self,
        title: String,
        body: Option<String>,
        priority: Option<String>,
        tags: Option<String>,
        due: Option<i64>,
        out: &mut W,
    ) -> Result<()> {
        let priority = priority.unwrap_or_else(|| self.config.get_default_priority());
        let mut note = create_note(Some(&priority));
        note.title = title;
        note.body = body.unwrap_or_default();
        note.tags = parse_tags(tags);
        note.due_at = due.unwrap_or(0);

        let notes = upsert(&self.load()?, note.clone());
        self.save(&notes)?;

        info!("Created note {}", note.id);
        writeln!(out, "Note created with ID: {}", note.id)?;
        Ok(())
    }

    fn list<W: Write>(&self, json: bool, out: &mut W) -> Result<()> {
        let notes = self.load()?;

        if json {
            writeln!(out, "{}", serde_json::to_string_pretty(&notes)?)?;
            return Ok(());
        }

        if notes.is_empty() {
            writeln!(out, "No notes stored.")?;
            return Ok(());
        }

        // Pinned notes first, stored order otherwise
        let (pinned, unpinned): (Vec<&Note>, Vec<&Note>) = notes.iter().partition(|n| n.pinned);
        for note in pinned.into_iter().chain(unpinned) {
            let marker = if note.pinned { "*" } else { " " };
            writeln!(
                out,
                "{} {}  [{}] {}",
                marker, note.id, note.priority, note.title
            )?;
            if self.verbose {
                writeln!(
                    out,
                    "    updated {}  viewed {}",
                    format_millis(note.updated_at),
                    format_millis(note.last_viewed_at)
                )?;
            }
        }
        Ok(())
    }

    fn view<W: Write>(&self, id: &str, out: &mut W) -> Result<()> {
        let notes = self.load()?;
        let note = Self::require(&notes, id)?;

        writeln!(out, "{}", note.title)?;
        writeln!(out, "Priority: {}  Status: {}", note.priority, note.status)?;
        if !note.tags.is_empty() {
            writeln!(out, "Tags: {}", note.tags.join(", "))?;
        }
        if note.due_at != 0 {
            writeln!(out, "Due: {}", format_millis(note.due_at))?;
        }
        if !note.body.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", note.body)?;
        }

        self.save(&update_last_viewed(&notes, id, now_millis()))
    }

    fn pin<W: Write>(&self, id: &str, out: &mut W) -> Result<()> {
        let notes = toggle_pinned(&self.load()?, id);
        let pinned = Self::require(&notes, id)?.pinned;
        self.save(&notes)?;

        writeln!(out, "{} {}", if pinned { "Pinned" } else { "Unpinned" }, id)?;
        Ok(())
    }

    fn delete<W: Write>(&self, id: &str, out: &mut W) -> Result<()> {
        let notes = self.load()?;
        Self::require(&notes, id)?;
        self.save(&remove(&notes, id))?;

        info!("Deleted note {}", id);
        writeln!(out, "Deleted {}", id)?;
        Ok(())
    }

    fn normalize<W: Write>(&self, out: &mut W) -> Result<()> {
        let notes = self.load()?;
        self.save(&notes)?;

        writeln!(out, "Normalized {} notes", notes.len())?;
        Ok(())
    }

    fn state<W: Write>(&self, out: &mut W) -> Result<()> {
        let text = read_store_text(&self.config.state_file)?;
        let state = parse_notification_state(&text);
        writeln!(out, "{}", serde_json::to_string_pretty(&state)?)?;
        Ok(())
    }
}

fn format_millis(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| millis.to_string())
}
