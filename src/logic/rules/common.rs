// src/logic/rules/common.rs
//! ルール判定で共通して使うヘルパー関数を置くよ。

use crate::components::card::{Card, Suit};
use itertools::Itertools;

/// 組札 (Foundation) のインデックス (0-3) から対応するスートを取得する。
/// 約束事: 0: Heart ❤️, 1: Diamond ♦️, 2: Club ♣️, 3: Spade ♠️
pub fn get_foundation_suit(foundation_index: u8) -> Option<Suit> {
    match foundation_index {
        0 => Some(Suit::Heart),
        1 => Some(Suit::Diamond),
        2 => Some(Suit::Club),
        3 => Some(Suit::Spade),
        _ => None,
    }
}

/// `upper` の上に `lower` を重ねられるか (色違い & ランクがちょうど 1 小さい)
pub(crate) fn stacks_onto(lower: &Card, upper: &Card) -> bool {
    lower.color() != upper.color() && lower.rank.value() + 1 == upper.rank.value()
}

/// まとめて動かすカード列 (下から上の順) が正しい「列」になってるかチェックする。
///
/// 全部表向きで、隣同士が色違い & ランクが 1 ずつ下がっていれば OK！
/// 1 枚だけの列は表向きなら OK、空の列はダメ。
pub fn is_valid_run(cards: &[Card]) -> bool {
    !cards.is_empty()
        && cards.iter().all(|card| card.is_face_up)
        && cards.iter().tuple_windows().all(|(upper, lower)| stacks_onto(lower, upper))
}
