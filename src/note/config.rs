use crate::error::{NoteError, Result};
use crate::model::DEFAULT_SPACE;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DB_FILENAME: &str = "notes.db";

/// Overrides both the config and data directory.
pub const HOME_ENV: &str = "NOTE_HOME";
/// Overrides the database file.
pub const DB_ENV: &str = "NOTE_DB";

/// Configuration for note, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoteConfig {
    /// Database file; defaults to `notes.db` in the data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db: Option<PathBuf>,

    /// Editor command used by `add` and `edit`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,

    /// Space new notes go into
    #[serde(default = "default_space")]
    pub space: String,

    /// Spaces `list` shows when none are given (empty = every visible space)
    #[serde(default)]
    pub list_spaces: Vec<String>,
}

fn default_space() -> String {
    DEFAULT_SPACE.to_string()
}

impl Default for NoteConfig {
    fn default() -> Self {
        Self {
            db: None,
            editor: None,
            space: default_space(),
            list_spaces: Vec::new(),
        }
    }
}

impl NoteConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        Self::load_file(config_dir.as_ref().join(CONFIG_FILENAME))
    }

    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: NoteConfig = serde_json::from_str(&content)?;
        crate::model::validate_space(&config.space)
            .map_err(|_| NoteError::Config(format!("invalid default space '{}'", config.space)))?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<PathBuf> {
        self.save_file(config_dir.as_ref().join(CONFIG_FILENAME))
    }

    /// Save config to an exact file path, creating its parent directory.
    pub fn save_file<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf> {
        let config_path = path.as_ref().to_path_buf();
        if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, content)?;
        Ok(config_path)
    }
}

/// Where configuration and data live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl NotePaths {
    /// `$NOTE_HOME` if set, otherwise the platform directories.
    pub fn resolve() -> Result<Self> {
        if let Some(home) = env::var_os(HOME_ENV).filter(|h| !h.is_empty()) {
            let home = PathBuf::from(home);
            return Ok(Self {
                config_dir: home.clone(),
                data_dir: home,
            });
        }

        let dirs = ProjectDirs::from("", "", "note")
            .ok_or_else(|| NoteError::Config("could not determine home directory".into()))?;
        Ok(Self {
            config_dir: dirs.config_dir().to_path_buf(),
            data_dir: dirs.data_dir().to_path_buf(),
        })
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILENAME)
    }

    /// Database path: `$NOTE_DB`, then the config's `db`, then the data dir.
    pub fn db_path(&self, config: &NoteConfig) -> PathBuf {
        if let Some(db) = env::var_os(DB_ENV).filter(|d| !d.is_empty()) {
            return PathBuf::from(db);
        }
        config
            .db
            .clone()
            .unwrap_or_else(|| self.data_dir.join(DB_FILENAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NoteConfig::default();
        assert_eq!(config.space, "main");
        assert!(config.db.is_none());
        assert!(config.list_spaces.is_empty());
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = NoteConfig::load(dir.path()).unwrap();
        assert_eq!(config, NoteConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = NoteConfig {
            editor: Some("nano".into()),
            space: "work".into(),
            list_spaces: vec!["work".into(), "home".into()],
            ..NoteConfig::default()
        };
        let path = config.save(dir.path().join("sub")).unwrap();
        assert!(path.ends_with("config.json"));

        let loaded = NoteConfig::load(dir.path().join("sub")).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.json"), r#"{"editor": "vim"}"#).unwrap();

        let loaded = NoteConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.editor.as_deref(), Some("vim"));
        assert_eq!(loaded.space, "main");
    }

    #[test]
    fn test_invalid_default_space() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.json"), r#"{"space": "a,b"}"#).unwrap();
        assert!(matches!(
            NoteConfig::load(dir.path()),
            Err(NoteError::Config(_))
        ));
    }

    #[test]
    fn test_db_path_prefers_config_over_data_dir() {
        let paths = NotePaths {
            config_dir: PathBuf::from("/cfg"),
            data_dir: PathBuf::from("/data"),
        };
        // Only meaningful when the override variable is unset.
        if env::var_os(DB_ENV).is_none() {
            assert_eq!(
                paths.db_path(&NoteConfig::default()),
                PathBuf::from("/data/notes.db")
            );
            let config = NoteConfig {
                db: Some(PathBuf::from("/elsewhere/x.db")),
                ..NoteConfig::default()
            };
            assert_eq!(paths.db_path(&config), PathBuf::from("/elsewhere/x.db"));
        }
    }
}
