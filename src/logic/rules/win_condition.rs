// src/logic/rules/win_condition.rs
//! ゲームの勝利条件判定ロジックを定義するよ。

/// 1 つの組札に積めるカードの枚数 (A から K まで)
pub const CARDS_PER_FOUNDATION: usize = 13;

/// ゲームのクリア条件を判定する。組札 4 つ全部が 13 枚 (= 52 枚全部) ならクリア！🏆
pub fn all_foundations_complete(foundation_sizes: &[usize]) -> bool {
    foundation_sizes.len() == 4 && foundation_sizes.iter().all(|&size| size == CARDS_PER_FOUNDATION)
}
