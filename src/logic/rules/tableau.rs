// src/logic/rules/tableau.rs
//! 場札 (Tableau) へのカード移動ルールを定義するよ。

use crate::components::card::{Card, Rank};
use super::common::stacks_onto;
use log::trace;

/// 指定されたカードが、場札の一番上に置けるかチェックする。
///
/// * 空の列: K だけ置ける
/// * それ以外: 一番上が表向きで、色違いかつランクがちょうど 1 小さいカード
pub fn can_add_to_tableau(card: &Card, top: Option<&Card>) -> bool {
    let result = match top {
        None => card.rank == Rank::King,
        Some(top) => top.is_face_up && stacks_onto(card, top),
    };
    trace!("[Tableau Rule] {} -> top {:?}: {}", card, top.map(Card::to_string), result);
    result
}

/// カード列をまとめて場札に置けるかチェックする。
///
/// 見るのは先頭 (一番下になるカード) だけ！表向きで `can_add_to_tableau` を満たせば OK。
/// 列そのものが正しい並びかどうかは `is_valid_run` で先に調べておく約束だよ。
pub fn can_add_sequence_to_tableau(sequence: &[Card], top: Option<&Card>) -> bool {
    match sequence.first() {
        Some(first) => first.is_face_up && can_add_to_tableau(first, top),
        None => false,
    }
}
