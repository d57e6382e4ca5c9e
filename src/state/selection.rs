use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The tournament picked from the header search. Pages that show "the current
/// tournament" read this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedTournament {
    pub name: String,
    pub id: String,
}

/// Key-value persistence for the selected tournament, one JSON file.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    path: PathBuf,
}

impl SelectionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` when nothing has been selected yet or the file is unreadable.
    pub fn load(&self) -> Option<SelectedTournament> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(selection) => Some(selection),
            Err(e) => {
                log::warn!("ignoring invalid selection file {}: {e}", self.path.display());
                None
            }
        }
    }

    pub fn save(&self, selection: &SelectedTournament) -> Result<(), String> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| format!("create dir failed: {e}"))?;
        }
        let payload = serde_json::to_string_pretty(selection)
            .map_err(|e| format!("serialize selection failed: {e}"))?;
        std::fs::write(&self.path, payload).map_err(|e| format!("write selection failed: {e}"))
    }
}

/// Default location: `$XDG_CONFIG_HOME/athletrack/selection.json`, then
/// `~/.config/athletrack/selection.json`, then the working directory.
pub fn default_selection_path() -> PathBuf {
    if let Ok(config_dir) = std::env::var("XDG_CONFIG_HOME")
        && !config_dir.trim().is_empty()
    {
        return PathBuf::from(config_dir).join("athletrack").join("selection.json");
    }
    if let Ok(home) = std::env::var("HOME")
        && !home.trim().is_empty()
    {
        return PathBuf::from(home)
            .join(".config")
            .join("athletrack")
            .join("selection.json");
    }
    PathBuf::from("selection.json")
}
