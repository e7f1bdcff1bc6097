// src/logic/mod.rs
//! ゲームのルールと状態を扱うロジックをまとめるモジュールだよ！🧠
//!
//! 下から順に: デッキ → ルール → パイル → 盤面 → 履歴 → 移動エンジン。

pub mod deck;
pub mod rules;
pub mod pile;
pub mod board;
pub mod error;
pub mod history;
pub mod auto_move;
pub mod move_engine;

pub use board::Board;
pub use deck::Deck;
pub use error::MoveError;
pub use history::{MoveHistory, MoveRecord, MAX_UNDO_STEPS};
pub use move_engine::MoveEngine;
pub use pile::{DisplayCard, Orientation, Pile, PileDisplayInfo, PileKind, SuitBinding};
