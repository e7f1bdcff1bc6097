// src/logic/auto_move.rs
//! カードの自動移動に関するロジックをまとめるモジュールだよ！🪄✨
//! どのカードがどの組札に移動できるか、を探すんだ。

use crate::components::card::Card;
use crate::components::stack::{StackType, FOUNDATION_COUNT};
use crate::logic::board::Board;
use log::trace;

/// カードを置ける組札を、0 番から順番に探す関数だよ。
///
/// 最初に見つかった組札を返す (いわゆる first-fit)。
/// スートの結び付きがあるから、受け付ける組札は普通 1 つしかないよ。
///
/// # 戻り値
/// * `Some(StackType::Foundation(i))`: 置ける組札が見つかった
/// * `None`: どこにも置けない
pub fn find_automatic_foundation_move(board: &Board, card: &Card) -> Option<StackType> {
    for i in 0..FOUNDATION_COUNT {
        let target = StackType::Foundation(i);
        if board.pile(target).is_some_and(|pile| pile.can_add(card)) {
            trace!("[AutoMove] {} は {} に置けるよ", card, target);
            return Some(target);
        }
    }
    trace!("[AutoMove] {} を置ける組札は無かった", card);
    None
}
