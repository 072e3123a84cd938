use crate::error::{NoteError, Result};
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};

static EDIT_SEQ: AtomicUsize = AtomicUsize::new(0);

/// Picks the editor command: the configured one, then `$EDITOR`, then
/// `$VISUAL`, then the first of a few common editors found on `PATH`.
pub fn get_editor(configured: Option<&str>) -> Result<String> {
    if let Some(editor) = configured.filter(|e| !e.trim().is_empty()) {
        return Ok(editor.to_string());
    }

    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.trim().is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in ["vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok(fallback.to_string());
        }
    }

    Err(NoteError::Editor(
        "No editor found. Set $EDITOR or the `editor` config key.".to_string(),
    ))
}

/// Opens a file in the editor and waits for it to close.
///
/// The command may carry arguments (`code --wait`), split on whitespace.
pub fn open_in_editor<P: AsRef<Path>>(editor: &str, file_path: P) -> Result<String> {
    let path = file_path.as_ref();
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| NoteError::Editor("empty editor command".to_string()))?;

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| NoteError::Editor(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(NoteError::Editor(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    Ok(fs::read_to_string(path)?)
}

/// Opens the editor on `initial` and returns what the user saved.
/// An empty buffer is an error: there is nothing to store.
pub fn edit_text(initial: &str, configured: Option<&str>) -> Result<String> {
    let editor = get_editor(configured)?;
    let seq = EDIT_SEQ.fetch_add(1, Ordering::Relaxed);
    let temp_file = env::temp_dir().join(format!("note-{}-{}.txt", std::process::id(), seq));
    fs::write(&temp_file, initial)?;

    let result = open_in_editor(&editor, &temp_file);
    let _ = fs::remove_file(&temp_file);

    let text = result?;
    if text.trim().is_empty() {
        return Err(NoteError::Editor("empty note, nothing saved".to_string()));
    }
    Ok(text)
}
