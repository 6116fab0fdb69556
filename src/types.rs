//! Shared types for the livingnotes crate: the `Result` alias and the
//! command-line subcommands.
use clap::Subcommand;

use crate::NotesError;

/// A specialized Result type for livingnotes operations.
pub type Result<T> = std::result::Result<T, NotesError>;

/// Available subcommands for the livingnotes binary
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new note
    Create {
        /// Title of the note
        #[clap(short = 'T', long)]
        title: String,

        /// Body text of the note
        #[clap(short, long)]
        body: Option<String>,

        /// Priority tag (LOW, MED, HIGH, ...), defaults to the configured priority
        #[clap(short, long)]
        priority: Option<String>,

        /// Tags to associate with the note (comma-separated)
        #[clap(short = 't', long)]
        tags: Option<String>,

        /// Reminder time in epoch milliseconds
        #[clap(short, long)]
        due: Option<i64>,
    },

    /// List stored notes
    List {
        /// Format output as raw JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Show a note and record that it was viewed
    View {
        /// ID of the note to view
        id: String,
    },

    /// Toggle the pinned flag of a note
    Pin {
        /// ID of the note to pin or unpin
        id: String,
    },

    /// Delete a note by ID
    Delete {
        /// ID of the note to delete
        id: String,
    },

    /// Rewrite the stored list with every note normalized
    Normalize,

    /// Print the stored notification state
    State,
}
