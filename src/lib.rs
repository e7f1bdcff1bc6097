// src/lib.rs
//! ターミナルで遊ぶクロンダイク (ソリティア) だよ！🃏
//!
//! 下の層から順に:
//! - `components`: カードやパイルの名前みたいな、小さなデータ型
//! - `logic`: ルール、パイル、盤面、履歴、移動エンジン
//! - `game`: それらをまとめてプレイヤーの操作を受け付ける `Game`
//! - `high_scores`, `config`: ファイルに残すもの
//! - `app`: ターミナルの画面と入力
//! - `logger`: ログの書き出し先

pub mod components;
pub mod logic;
pub mod game;
pub mod high_scores;
pub mod config;
pub mod app;
pub mod logger;

pub use components::{Card, Difficulty, GameResult, GameStatus, Rank, StackType, Suit};
pub use game::Game;
pub use logic::MoveError;
