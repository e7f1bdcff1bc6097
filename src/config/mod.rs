// src/config/mod.rs
//! 設定まわり: 画面レイアウトの定数と、保存される設定ファイル。

pub mod layout;
pub mod settings;

pub use settings::{GameSettings, InputMode, SettingsError, SettingsStore};
