use std::fs;
use std::path::PathBuf;

use tracing::warn;

use crate::config::config_dir;
use crate::ui::settings::UiSettings;

fn settings_path() -> PathBuf {
    let path = config_dir();
    fs::create_dir_all(&path).ok();
    path.join("ui_settings.json")
}

pub fn load_settings() -> UiSettings {
    let path = settings_path();
    fs::read_to_string(path)
        .ok()
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}

pub fn save_settings(settings: &UiSettings) {
    let path = settings_path();
    match serde_json::to_string_pretty(settings) {
        Ok(json) => {
            if let Err(e) = fs::write(&path, json) {
                warn!(path = %path.display(), error = %e, "could not save UI settings");
            }
        }
        Err(e) => warn!(error = %e, "could not encode UI settings"),
    }
}
