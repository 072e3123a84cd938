use crate::commands::{CmdMessage, CmdResult};
use crate::config::NoteConfig;
use crate::error::Result;
use crate::store::sqlite::SqliteStore;
use std::path::Path;
use tracing::info;

/// Writes `config_file` if there is none yet and creates the database at
/// `db_path`. Both paths arrive already resolved.
pub fn run(config_file: &Path, db_path: &Path, config: &NoteConfig) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if config_file.exists() {
        result.add_message(CmdMessage::info(format!(
            "Config already exists at {}",
            config_file.display()
        )));
    } else {
        let written = config.save_file(config_file)?;
        result.add_message(CmdMessage::success(format!(
            "Wrote config to {}",
            written.display()
        )));
    }

    SqliteStore::open(db_path)?;
    info!(db = %db_path.display(), "initialized database");
    result.add_message(CmdMessage::success(format!(
        "Initialized note database at {}",
        db_path.display()
    )));

    Ok(result
        .with_config(config.clone())
        .with_paths(vec![config_file.to_path_buf(), db_path.to_path_buf()]))
}
