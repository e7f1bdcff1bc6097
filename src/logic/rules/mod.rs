// src/logic/rules/mod.rs
//! ソリティアのルール関連モジュールをまとめるよ！
//!
//! ここにあるのは全部「カードを見て true/false を返すだけ」の純粋な関数。
//! パイルを書き換えるのは `logic::pile` と `logic::move_engine` の仕事だよ。

pub mod common;
pub mod foundation;
pub mod tableau;
pub mod stock_waste;
pub mod move_validation;
pub mod win_condition;


// 各モジュールから公開したい関数をここで再エクスポート！
pub use common::*;
pub use foundation::*;
pub use tableau::*;
pub use stock_waste::*;
pub use move_validation::*;
pub use win_condition::*;
