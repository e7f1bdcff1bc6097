// src/components/mod.rs

// components モジュールに含まれるサブモジュールを宣言するよ！
pub mod card;       // card.rs をこのモジュールの一部として宣言
pub mod stack;      // stack.rs をこのモジュールの一部として宣言
pub mod game_state; // game_state.rs をこのモジュールの一部として宣言

// 各モジュールの主要な型を再エクスポートして、使いやすくする！
pub use card::{Card, CardColor, CardId, Rank, Suit, ALL_RANKS, ALL_SUITS};
pub use stack::{StackType, FOUNDATION_COUNT, TABLEAU_COUNT};
pub use game_state::{Difficulty, GameResult, GameStatus};
