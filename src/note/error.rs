use crate::model::NoteId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoteError {
    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Invalid sort column: {0}")]
    InvalidSortColumn(String),

    #[error("Invalid page: offset {offset} requires a limit greater than zero (limit {limit})")]
    InvalidPage { limit: usize, offset: usize },

    #[error("Only {succeeded} of {requested} notes were modified")]
    PartialMutation { requested: usize, succeeded: usize },

    #[error("Note(s) not found: {}", join_ids(.ids))]
    NotFound { ids: Vec<NoteId> },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Timestamp error: {0}")]
    Timestamp(#[from] chrono::ParseError),

    #[error(
        "Import stopped after creating {} note(s) [{}]: {}",
        .created.len(),
        join_ids(.created),
        .source
    )]
    Import {
        created: Vec<NoteId>,
        #[source]
        source: Box<NoteError>,
    },

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl NoteError {
    pub fn not_found(id: NoteId) -> Self {
        NoteError::NotFound { ids: vec![id] }
    }
}

fn join_ids(ids: &[NoteId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, NoteError>;
