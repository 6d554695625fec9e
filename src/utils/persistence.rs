//! JSON file helpers for ~/.spampede/ (config file, log file location).

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the ~/.spampede/ directory path, creating it if needed.
pub fn spampede_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".spampede");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Read `dir/filename` as JSON. A missing file is `Ok(None)`; a file that
/// does not parse is an `InvalidData` error.
pub fn load_json_from<T: DeserializeOwned>(dir: &Path, filename: &str) -> io::Result<Option<T>> {
    let json = match fs::read_to_string(dir.join(filename)) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Write `data` as pretty-printed JSON to `dir/filename`.
pub fn save_json_to<T: Serialize>(dir: &Path, filename: &str, data: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(dir.join(filename), json)
}

/// [`load_json_from`] on ~/.spampede/.
pub fn load_json<T: DeserializeOwned>(filename: &str) -> io::Result<Option<T>> {
    load_json_from(&spampede_dir()?, filename)
}

/// [`save_json_to`] on ~/.spampede/.
pub fn save_json<T: Serialize>(filename: &str, data: &T) -> io::Result<()> {
    save_json_to(&spampede_dir()?, filename, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("spampede-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_missing_returns_none() {
        let dir = scratch_dir("missing");
        let val: Option<Vec<String>> = load_json_from(&dir, "nonexistent.json").unwrap();
        assert!(val.is_none());
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_save_and_load_config() {
        let dir = scratch_dir("roundtrip");
        let config = GameConfig {
            rows: 12,
            cols: 18,
            sound: false,
            ..Default::default()
        };
        save_json_to(&dir, "config.json", &config).unwrap();

        let loaded: Option<GameConfig> = load_json_from(&dir, "config.json").unwrap();
        assert_eq!(loaded, Some(config));
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_invalid_json_is_error() {
        let dir = scratch_dir("invalid");
        fs::write(dir.join("config.json"), "{ rows: ").unwrap();

        let err = load_json_from::<GameConfig>(&dir, "config.json").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        fs::remove_dir_all(dir).ok();
    }
}
