use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use radscore_core::normalize::NumberLocale;

/// Current preferences version. Bump this when adding fields or changing
/// shape; each bump requires a corresponding step in [`migrate`].
const CURRENT_VERSION: u32 = 1;

pub const MAX_RECENTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Schema version. Missing or 0 = pre-versioned file.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default)]
    pub favorites: Vec<String>,
    /// Most recent first.
    #[serde(default)]
    pub recents: Vec<RecentEntry>,
    #[serde(default)]
    pub number_locale: NumberLocale,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentEntry {
    pub calculator_id: String,
    pub used_at: jiff::Timestamp,
}

impl Preferences {
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|f| f == id)
    }

    /// Returns false if `id` was already a favorite.
    pub fn add_favorite(&mut self, id: &str) -> bool {
        if self.is_favorite(id) {
            return false;
        }
        self.favorites.push(id.to_string());
        true
    }

    /// Returns false if `id` was not a favorite.
    pub fn remove_favorite(&mut self, id: &str) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|f| f != id);
        self.favorites.len() != before
    }

    /// Move `id` to the front of the recents list, keeping at most
    /// [`MAX_RECENTS`] entries.
    pub fn record_recent(&mut self, id: &str, used_at: jiff::Timestamp) {
        self.recents.retain(|r| r.calculator_id != id);
        self.recents.insert(
            0,
            RecentEntry {
                calculator_id: id.to_string(),
                used_at,
            },
        );
        self.recents.truncate(MAX_RECENTS);
    }
}

fn preferences_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("radscore"))
}

pub fn preferences_path() -> eyre::Result<PathBuf> {
    Ok(preferences_dir()?.join("preferences.json"))
}

/// Load preferences from `path`. A missing file yields defaults.
pub fn load_from(path: &Path) -> eyre::Result<Preferences> {
    if !path.exists() {
        return Ok(Preferences::default());
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read preferences at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let prefs: Preferences = serde_json::from_value(migrated)?;
    Ok(prefs)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update radscore."
        ));
    }

    // v0 → v1: recents were bare calculator ids, now {calculator_id, used_at}
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("preferences file is not a JSON object"))?;
        if let Some(serde_json::Value::Array(recents)) = obj.get_mut("recents") {
            for entry in recents.iter_mut() {
                if let serde_json::Value::String(id) = entry {
                    *entry = serde_json::json!({
                        "calculator_id": id.clone(),
                        "used_at": jiff::Timestamp::UNIX_EPOCH,
                    });
                }
            }
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated preferences v0 → v1 (timestamped recents)");
    }

    Ok(json)
}

pub fn save_to(path: &Path, prefs: &Preferences) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("preferences path {} has no parent", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = prefs.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "preferences saved");
    Ok(())
}

pub fn load() -> eyre::Result<Preferences> {
    load_from(&preferences_path()?)
}

pub fn save(prefs: &Preferences) -> eyre::Result<()> {
    save_to(&preferences_path()?, prefs)
}
