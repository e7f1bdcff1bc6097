// src/app/mod.rs
//! ターミナルで遊ぶための部分をまとめたモジュールだよ！
//!
//! 入力 (`command`, `cursor`)、描画 (`renderer`, `screen`)、メニュー (`menu`)、
//! それを全部つなぐループ (`game_app`)。

pub mod command;
pub mod cursor;
pub mod game_app;
pub mod menu;
pub mod renderer;
pub mod screen;

pub use game_app::App;
pub use screen::{Key, Screen, TerminalScreen};
