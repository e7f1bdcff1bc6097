// src/config/settings.rs
//! プレイヤーの設定を JSON (整形済み) で保存するモジュールだよ！⚙️

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 保存先のファイル名 (カレントディレクトリから)
pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not access {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    Json { path: PathBuf, source: serde_json::Error },
}

/// 操作方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputMode {
    /// `move T1 F2` みたいにコマンドを打つ
    Text,
    /// 矢印キーと Enter / Esc で操作
    Arrow,
}

impl InputMode {
    pub const ALL: [InputMode; 2] = [InputMode::Text, InputMode::Arrow];

    /// 次 (または前) のモードへ。端まで行ったら反対側に戻る。
    pub fn cycle(self, forward: bool) -> InputMode {
        let position = Self::ALL.iter().position(|&mode| mode == self).unwrap_or(0);
        let len = Self::ALL.len();
        let next = if forward { (position + 1) % len } else { (position + len - 1) % len };
        Self::ALL[next]
    }

    pub fn label(self) -> &'static str {
        match self {
            InputMode::Text => "Text",
            InputMode::Arrow => "Arrow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    #[serde(rename = "CurrentInputMode")]
    pub input_mode: InputMode,
    #[serde(rename = "AutoMoveToFoundation")]
    pub auto_move_to_foundation: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self { input_mode: InputMode::Arrow, auto_move_to_foundation: false }
    }
}

/// 設定ファイルの読み書き担当
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ファイルが無ければデフォルト。壊れていたらエラー。
    pub fn load(&self) -> Result<GameSettings, SettingsError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(GameSettings::default()),
            Err(source) => return Err(SettingsError::Io { path: self.path.clone(), source }),
        };
        serde_json::from_str(&json).map_err(|source| SettingsError::Json { path: self.path.clone(), source })
    }

    /// `load` と同じだけど、失敗したらデフォルトにして、画面に出す警告文も返す。
    pub fn load_or_default(&self) -> (GameSettings, Option<String>) {
        match self.load() {
            Ok(settings) => (settings, None),
            Err(err) => {
                warn!("設定を読めなかったのでデフォルトを使う: {}", err);
                (GameSettings::default(), Some(format!("Warning: {}. Using default settings.", err)))
            }
        }
    }

    pub fn save(&self, settings: &GameSettings) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(settings)
            .map_err(|source| SettingsError::Json { path: self.path.clone(), source })?;
        fs::write(&self.path, json).map_err(|source| SettingsError::Io { path: self.path.clone(), source })?;
        info!("設定を保存した: {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> SettingsStore {
        let path = std::env::temp_dir().join(format!("klondike-{}-{}", std::process::id(), name));
        let _ = fs::remove_file(&path);
        SettingsStore::new(path)
    }

    #[test]
    fn defaults() {
        let settings = GameSettings::default();
        assert_eq!(settings.input_mode, InputMode::Arrow);
        assert!(!settings.auto_move_to_foundation);
    }

    #[test]
    fn input_mode_cycles_both_ways() {
        assert_eq!(InputMode::Text.cycle(true), InputMode::Arrow);
        assert_eq!(InputMode::Arrow.cycle(true), InputMode::Text);
        assert_eq!(InputMode::Text.cycle(false), InputMode::Arrow);
    }

    #[test]
    fn missing_file_gives_defaults_without_warning() {
        let store = temp_store("missing-settings.json");
        let (settings, warning) = store.load_or_default();
        assert_eq!(settings, GameSettings::default());
        assert!(warning.is_none());
    }

    #[test]
    fn save_then_load() {
        let store = temp_store("saved-settings.json");
        let settings = GameSettings { input_mode: InputMode::Text, auto_move_to_foundation: true };
        store.save(&settings).unwrap();

        let json = fs::read_to_string(store.path()).unwrap();
        assert!(json.contains("\"CurrentInputMode\": \"Text\""), "{}", json);
        assert!(json.contains("\"AutoMoveToFoundation\": true"), "{}", json);
        assert_eq!(store.load().unwrap(), settings);
        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let store = temp_store("partial-settings.json");
        fs::write(store.path(), r#"{ "AutoMoveToFoundation": true }"#).unwrap();
        let settings = store.load().unwrap();
        assert_eq!(settings.input_mode, InputMode::Arrow);
        assert!(settings.auto_move_to_foundation);
        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn broken_file_falls_back_with_warning() {
        let store = temp_store("broken-settings.json");
        fs::write(store.path(), "{ not json").unwrap();
        assert!(matches!(store.load(), Err(SettingsError::Json { .. })));
        let (settings, warning) = store.load_or_default();
        assert_eq!(settings, GameSettings::default());
        assert!(warning.is_some_and(|text| text.starts_with("Warning:")));
        let _ = fs::remove_file(store.path());
    }
}
