// src/logic/rules/foundation.rs
//! 組札 (Foundation) へのカード移動ルールを定義するよ。

use crate::components::card::{Card, Rank, Suit};
use log::trace;

/// 指定されたカードが組札の一番上に置けるかチェックする。
///
/// # 引数
/// * `card`: 置こうとしているカード
/// * `top`: 組札の一番上のカード (空なら None)
/// * `bound_suit`: その組札に結び付いているスート (まだ決まってなければ None)
///
/// # ルール
/// * 空の組札: A だけ置ける。スートが決まっているならそのスートの A だけ。
/// * 空じゃない組札: 同じスートで、ランクがちょうど 1 大きいカードだけ。
pub fn can_add_to_foundation(card: &Card, top: Option<&Card>, bound_suit: Option<Suit>) -> bool {
    if bound_suit.is_some_and(|suit| suit != card.suit) {
        trace!("[Foundation Rule] {} はスート違い ({:?})", card, bound_suit);
        return false;
    }
    let result = match top {
        None => card.rank == Rank::Ace,
        Some(top) => top.suit == card.suit && top.rank.next() == Some(card.rank),
    };
    trace!("[Foundation Rule] {} -> top {:?}: {}", card, top.map(Card::to_string), result);
    result
}
