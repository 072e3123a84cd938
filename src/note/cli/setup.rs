use clap::{Args, Parser, Subcommand};
use note::codec::Format;
use note::model::NoteId;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "note", bin_name = "note", version)]
#[command(about = "Personal notes organised in spaces, stored in SQLite", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Database file (overrides $NOTE_DB and the config)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Config file to use instead of the default one
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a note (opens the editor when no text is given)
    Add {
        /// Note text; words are joined with spaces
        #[arg(num_args = 0..)]
        text: Vec<String>,

        /// Space to add the note to
        #[arg(short, long)]
        space: Option<String>,

        /// Pin the new note
        #[arg(short, long)]
        pin: bool,

        /// Read the note text from a file ('-' for stdin)
        #[arg(short, long, value_name = "FILE", conflicts_with = "text")]
        file: Option<PathBuf>,
    },

    /// List notes
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show notes in full
    Show {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<NoteId>,
    },

    /// Edit a note's text
    Edit {
        id: NoteId,

        /// New text; opens the editor when omitted
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Move notes to another space
    #[command(alias = "mv")]
    Move {
        /// Destination space
        space: String,

        #[arg(required = true, num_args = 1..)]
        ids: Vec<NoteId>,
    },

    /// Pin notes
    Pin {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<NoteId>,
    },

    /// Unpin notes
    Unpin {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<NoteId>,
    },

    /// Remove notes (to trash unless --permanent)
    #[command(alias = "rm")]
    Remove {
        #[arg(num_args = 0.., required_unless_present = "all_in_space")]
        ids: Vec<NoteId>,

        /// Remove every note in this space
        #[arg(long, value_name = "SPACE", conflicts_with = "ids")]
        all_in_space: Option<String>,

        /// Delete instead of moving to trash
        #[arg(short, long)]
        permanent: bool,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Permanently delete everything in the trash
    Clean {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// List spaces
    Spaces {
        /// Only the spaces of these notes
        #[arg(num_args = 0..)]
        ids: Vec<NoteId>,

        /// Include hidden spaces
        #[arg(short, long)]
        all: bool,

        #[arg(short, long)]
        descending: bool,
    },

    /// Search note text
    Find(FindArgs),

    /// Import notes from a JSON or YAML file ('-' for stdin)
    Import {
        file: PathBuf,

        /// Space for records that carry none
        #[arg(short, long)]
        space: Option<String>,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// Export notes as JSON or YAML
    Export {
        /// Only these notes
        #[arg(num_args = 0..)]
        ids: Vec<NoteId>,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Only notes in these spaces
        #[arg(short, long, value_delimiter = ',')]
        space: Vec<String>,

        /// Include hidden spaces
        #[arg(short, long)]
        all: bool,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// Write a default config and create the database
    Init,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only notes in these spaces (repeat or separate with commas)
    #[arg(short, long, value_delimiter = ',')]
    pub space: Vec<String>,

    /// Include hidden spaces
    #[arg(short, long)]
    pub all: bool,

    /// Sort column: id, space, content, created, updated
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending (pinned notes last)
    #[arg(short, long)]
    pub descending: bool,

    /// Maximum number of notes (0 = no limit)
    #[arg(short = 'n', long, default_value_t = 0)]
    pub limit: usize,

    /// Notes to skip; needs --limit
    #[arg(long, default_value_t = 0)]
    pub offset: usize,
}

#[derive(Args, Debug)]
pub struct FindArgs {
    pub pattern: String,

    /// Ignore case
    #[arg(short, long)]
    pub ignore_case: bool,

    /// Treat the pattern as a regular expression
    #[arg(short, long)]
    pub regex: bool,

    /// Only notes in these spaces
    #[arg(short, long, value_delimiter = ',')]
    pub space: Vec<String>,

    /// Include hidden spaces
    #[arg(short, long)]
    pub all: bool,

    /// Include the trash
    #[arg(short, long)]
    pub trash: bool,
}

#[derive(Args, Debug, Default)]
pub struct FormatArgs {
    #[arg(long, conflicts_with = "yaml")]
    pub json: bool,

    #[arg(long)]
    pub yaml: bool,
}

impl FormatArgs {
    pub fn explicit(&self) -> Option<Format> {
        if self.json {
            Some(Format::Json)
        } else if self.yaml {
            Some(Format::Yaml)
        } else {
            None
        }
    }
}
