// src/logic/move_engine.rs
//! カード移動の心臓部！🫀
//!
//! 移動のたびに「パイルを探す → 動かすカードを取り出す → 移動先を確認 → 書き換え → 記録」
//! の順で処理して、undo 用の `MoveRecord` を履歴に積む。
//! 失敗したときは必ず `MoveError` を返して、盤面は元のまま (カードは 52 枚のまま！)

use crate::components::card::{Card, CardId};
use crate::components::stack::StackType;
use crate::logic::auto_move::find_automatic_foundation_move;
use crate::logic::board::Board;
use crate::logic::error::{MoveError, Result};
use crate::logic::history::{MoveHistory, MoveRecord};
use crate::logic::pile::{Pile, PileKind};
use crate::logic::rules;
use log::{error, info};
use rand::Rng;

/// 移動エンジン。盤面そのものは持たずに、履歴と手数だけを持つよ。
#[derive(Debug, Clone, Default)]
pub struct MoveEngine {
    history: MoveHistory,
    move_count: u32,
}

fn pile(board: &Board, stack: StackType) -> Result<&Pile> {
    board
        .pile(stack)
        .ok_or_else(|| MoveError::InvalidPile(format!("{} does not exist", stack)))
}

fn pile_mut(board: &mut Board, stack: StackType) -> Result<&mut Pile> {
    board
        .pile_mut(stack)
        .ok_or_else(|| MoveError::InvalidPile(format!("{} does not exist", stack)))
}

fn ids_match(cards: &[Card], expected: &[CardId]) -> bool {
    cards.len() == expected.len() && cards.iter().map(Card::id).eq(expected.iter().copied())
}

impl MoveEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// これまでの手数 (undo すると減る)
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    fn record(&mut self, record: MoveRecord) {
        info!("手 #{}: {}", self.move_count + 1, record.describe());
        self.history.push(record);
        self.move_count += 1;
    }

    /// `source` の上から `count` 枚を `dest` へ動かす。
    pub fn try_move(&mut self, board: &mut Board, source: StackType, dest: StackType, count: usize) -> Result<()> {
        // --- 1. パイルを探す ---
        pile(board, source)?;
        pile(board, dest)?;
        if !rules::is_valid_route(source, dest) {
            return Err(MoveError::InvalidPile(format!("cannot move from {} to {}", source, dest)));
        }

        // --- 2. 動かすカードをチェック (ここではまだ取り出さない！) ---
        let source_pile = pile(board, source)?;
        if source_pile.is_empty() {
            return Err(MoveError::EmptyPile(format!("{} has no cards", source)));
        }
        match source_pile.kind() {
            PileKind::Waste | PileKind::Foundation(_) if count != 1 => {
                return Err(MoveError::InvalidCardSequence(format!(
                    "only the top card of {} can be moved",
                    source
                )));
            }
            PileKind::Tableau => {
                if count == 0 || count > source_pile.len() {
                    return Err(MoveError::InvalidCardSequence(format!(
                        "cannot take {} card(s) from {} ({} there)",
                        count,
                        source,
                        source_pile.len()
                    )));
                }
                let candidate = &source_pile.cards()[source_pile.len() - count..];
                if count == 1 && !candidate[0].is_face_up {
                    return Err(MoveError::InvalidMoveRule(format!("the top card of {} is face down", source)));
                }
                if count > 1 && !rules::is_valid_run(candidate) {
                    return Err(MoveError::InvalidCardSequence(format!(
                        "the top {} cards of {} are not a descending alternating-color run",
                        count, source
                    )));
                }
            }
            _ => {}
        }

        // --- 3. 取り出して、移動先を確認 ---
        let cards = pile_mut(board, source)?
            .remove_top_n(count)
            .ok_or_else(|| MoveError::InvalidCardSequence(format!("{} has fewer than {} cards", source, count)))?;
        let dest_pile = pile(board, dest)?;
        let accepted = match cards.as_slice() {
            [single] => dest_pile.can_add(single),
            _ => dest.is_tableau() && dest_pile.can_add_sequence(&cards),
        };
        let foundation_suit_bound = matches!(
            dest_pile.kind(),
            PileKind::Foundation(binding) if !binding.permanent && binding.suit.is_none()
        );
        if !accepted {
            let message = match cards.first() {
                Some(first) if dest.is_foundation() => format!("{} cannot go onto {}", first, dest),
                Some(first) => format!("{} cannot be placed on {}", first, dest),
                None => format!("nothing to place on {}", dest),
            };
            // 取り出したカードは元の場所へそのまま戻す
            pile_mut(board, source)?.add_cards(cards);
            return Err(MoveError::InvalidMoveRule(message));
        }

        // --- 4. 移動元の一番上をめくる ---
        let flipped_source_top = source.is_tableau() && pile_mut(board, source)?.flip_top_card_if_necessary();

        // --- 5. 置いて、記録する ---
        let ids = MoveRecord::ids(&cards);
        pile_mut(board, dest)?.add_cards(cards);
        self.record(MoveRecord::Transfer { source, dest, cards: ids, flipped_source_top, foundation_suit_bound });
        Ok(())
    }

    /// 1 枚のカードを、置ける組札へ自動で動かす。
    ///
    /// どこにも置けなければエラーにせず `Ok(false)` を返すよ。
    pub fn try_auto_move_to_foundation(&mut self, board: &mut Board, source: StackType) -> Result<bool> {
        match self.foundation_target(board, source)? {
            Some(dest) => self.try_move(board, source, dest, 1).map(|()| true),
            None => Ok(false),
        }
    }

    /// 手動で組札へ動かす。自動移動と違って、置けなければ `InvalidMoveRule`。
    pub fn try_manual_move_to_foundation(&mut self, board: &mut Board, source: StackType) -> Result<()> {
        match self.foundation_target(board, source)? {
            Some(dest) => self.try_move(board, source, dest, 1),
            None => {
                let card = pile(board, source)?.top().map(Card::to_string).unwrap_or_default();
                Err(MoveError::InvalidMoveRule(format!("no foundation accepts {}", card)))
            }
        }
    }

    /// 組札に送る候補カード (Waste か Tableau の一番上) を確かめて、置ける組札を探す。
    fn foundation_target(&self, board: &Board, source: StackType) -> Result<Option<StackType>> {
        let source_pile = pile(board, source)?;
        if !matches!(source_pile.kind(), PileKind::Waste | PileKind::Tableau) {
            return Err(MoveError::InvalidPile(format!("cannot send cards from {} to a foundation", source)));
        }
        let card = source_pile
            .top()
            .ok_or_else(|| MoveError::EmptyPile(format!("{} has no cards", source)))?;
        if !card.is_face_up {
            return Err(MoveError::InvalidMoveRule(format!("the top card of {} is face down", source)));
        }
        Ok(find_automatic_foundation_move(board, card))
    }

    /// 山札からめくる。山札が空なら捨て札を全部戻す (これも 1 手)
    pub fn draw_from_stock<R: Rng + ?Sized>(&mut self, board: &mut Board, draw_count: usize, rng: &mut R) -> Result<()> {
        if rules::can_deal_from_stock(board.stock.is_empty()) {
            let cards = board.stock.draw(draw_count);
            let ids = MoveRecord::ids(&cards);
            board.waste.add_cards(cards);
            self.record(MoveRecord::Draw { cards: ids });
            return Ok(());
        }
        if !rules::can_reset_stock_from_waste(board.stock.is_empty(), board.waste.is_empty()) {
            return Err(MoveError::EmptyPile("stock and waste are both empty".to_string()));
        }
        let waste_cards = board.waste.take_all();
        let ids = MoveRecord::ids(&waste_cards);
        board.stock.reset(waste_cards, rng);
        self.record(MoveRecord::StockReset { waste: ids });
        Ok(())
    }

    /// 一番新しい手を元に戻す。
    ///
    /// 履歴と盤面が食い違ったら何も変えずに `CriticalMismatch` を返す (記録も戻す)
    pub fn undo_last_move(&mut self, board: &mut Board) -> Result<()> {
        let record = self.history.pop().ok_or(MoveError::NoHistory)?;
        let outcome = match &record {
            MoveRecord::StockReset { waste } => Self::undo_stock_reset(board, waste),
            MoveRecord::Draw { cards } => Self::undo_draw(board, cards),
            MoveRecord::Transfer { source, dest, cards, flipped_source_top, foundation_suit_bound } => {
                Self::undo_transfer(board, *source, *dest, cards, *flipped_source_top, *foundation_suit_bound)
            }
        };
        match outcome {
            Ok(()) => {
                self.move_count = self.move_count.saturating_sub(1);
                info!("undo: {} (手数 {})", record.describe(), self.move_count);
                Ok(())
            }
            Err(err) => {
                error!("undo できなかった: {} ({})", err, record.describe());
                self.history.push(record);
                Err(err)
            }
        }
    }

    fn undo_stock_reset(board: &mut Board, waste: &[CardId]) -> Result<()> {
        let stock_cards = board.stock.take_all();
        let mut found: Vec<CardId> = stock_cards.iter().map(Card::id).collect();
        let mut expected = waste.to_vec();
        found.sort_unstable();
        expected.sort_unstable();
        if found != expected || !board.waste.is_empty() {
            board.stock.add_cards(stock_cards);
            return Err(MoveError::CriticalMismatch(
                "stock does not hold exactly the cards recycled from the waste".to_string(),
            ));
        }

        let mut slots: Vec<Option<Card>> = vec![None; 52];
        for card in stock_cards {
            let index = card.id().index();
            slots[index] = Some(card);
        }
        board.waste.add_cards(waste.iter().filter_map(|id| slots[id.index()].take()));
        Ok(())
    }

    fn undo_draw(board: &mut Board, cards: &[CardId]) -> Result<()> {
        let drawn = board.waste.remove_top_n(cards.len()).ok_or_else(|| {
            MoveError::CriticalMismatch(format!("waste holds fewer than {} cards", cards.len()))
        })?;
        if !ids_match(&drawn, cards) {
            board.waste.add_cards(drawn);
            return Err(MoveError::CriticalMismatch("waste top does not match the drawn cards".to_string()));
        }
        board.stock.add_cards(drawn);
        Ok(())
    }

    fn undo_transfer(
        board: &mut Board,
        source: StackType,
        dest: StackType,
        cards: &[CardId],
        flipped_source_top: bool,
        foundation_suit_bound: bool,
    ) -> Result<()> {
        pile(board, source)?;
        let dest_pile = pile_mut(board, dest)?;
        let moved = dest_pile.remove_top_n(cards.len()).ok_or_else(|| {
            MoveError::CriticalMismatch(format!("{} holds fewer than {} cards", dest, cards.len()))
        })?;
        if !ids_match(&moved, cards) {
            dest_pile.add_cards(moved);
            return Err(MoveError::CriticalMismatch(format!("top of {} does not match the recorded move", dest)));
        }
        if foundation_suit_bound && dest_pile.is_empty() {
            dest_pile.clear_suit_binding();
        }

        let source_pile = pile_mut(board, source)?;
        if flipped_source_top {
            source_pile.conceal_top_card();
        }
        source_pile.add_cards(moved);
        Ok(())
    }
}
