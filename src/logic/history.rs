// src/logic/history.rs
//! 元に戻す (undo) ための手の記録だよ。

use crate::components::card::{Card, CardId};
use crate::components::stack::StackType;
use circular_buffer::CircularBuffer;
use log::debug;

/// 覚えておける手の数。これより古い手は黙って捨てられて、もう戻せない。
pub const MAX_UNDO_STEPS: usize = 3;

/// 1 手ぶんの記録。
///
/// カードそのものは持たずに `CardId` だけ覚えておく。
/// undo のときは実際にパイルに載っているカードと ID で照合するよ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveRecord {
    /// 山札が空のときに捨て札を全部戻した。`waste` はリセット前の捨て札 (下から順)
    StockReset { waste: Vec<CardId> },
    /// 山札から捨て札へめくった。`cards` は捨て札に積まれた順
    Draw { cards: Vec<CardId> },
    /// 普通の移動
    Transfer {
        source: StackType,
        dest: StackType,
        cards: Vec<CardId>,
        /// 移動のあと、移動元の新しい一番上をめくったか
        flipped_source_top: bool,
        /// この移動で空の組札にスートが結び付いたか
        foundation_suit_bound: bool,
    },
}

impl MoveRecord {
    /// カード列から ID の列を作るヘルパー。
    pub fn ids(cards: &[Card]) -> Vec<CardId> {
        cards.iter().map(Card::id).collect()
    }

    /// ログ用の短い説明。
    pub fn describe(&self) -> String {
        match self {
            MoveRecord::StockReset { waste } => format!("reset stock ({} cards)", waste.len()),
            MoveRecord::Draw { cards } => format!("draw {}", cards.len()),
            MoveRecord::Transfer { source, dest, cards, .. } => {
                format!("move {} card(s) {} -> {}", cards.len(), source, dest)
            }
        }
    }
}

/// 手の記録を新しい順に取り出せる、容量固定のリングバッファ。
#[derive(Debug, Clone)]
pub struct MoveHistory {
    records: CircularBuffer<MAX_UNDO_STEPS, MoveRecord>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self { records: CircularBuffer::new() }
    }

    /// 記録を積む。いっぱいなら一番古い記録を捨てる (もう戻せなくなる)
    pub fn push(&mut self, record: MoveRecord) {
        if self.records.is_full() {
            if let Some(evicted) = self.records.pop_front() {
                debug!("履歴がいっぱいなので古い手を捨てたよ: {}", evicted.describe());
            }
        }
        self.records.push_back(record);
    }

    /// 一番新しい記録を取り出す。
    pub fn pop(&mut self) -> Option<MoveRecord> {
        self.records.pop_back()
    }

    pub fn peek(&self) -> Option<&MoveRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl Default for MoveHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::card::{Rank, Suit};

    fn draw_of(rank: Rank) -> MoveRecord {
        MoveRecord::Draw { cards: vec![Card::new(Suit::Heart, rank).id()] }
    }

    #[test]
    fn lifo_order() {
        let mut history = MoveHistory::new();
        assert!(history.is_empty());
        history.push(draw_of(Rank::Ace));
        history.push(draw_of(Rank::Two));
        assert_eq!(history.peek(), Some(&draw_of(Rank::Two)));
        assert_eq!(history.pop(), Some(draw_of(Rank::Two)));
        assert_eq!(history.pop(), Some(draw_of(Rank::Ace)));
        assert_eq!(history.pop(), None);
        println!("履歴の LIFO テスト、成功！🎉");
    }

    #[test]
    fn oldest_record_is_evicted_silently() {
        let mut history = MoveHistory::new();
        for rank in [Rank::Ace, Rank::Two, Rank::Three, Rank::Four] {
            history.push(draw_of(rank));
        }
        assert_eq!(history.len(), MAX_UNDO_STEPS);
        assert_eq!(history.pop(), Some(draw_of(Rank::Four)));
        assert_eq!(history.pop(), Some(draw_of(Rank::Three)));
        assert_eq!(history.pop(), Some(draw_of(Rank::Two)));
        assert_eq!(history.pop(), None, "A の手はもう戻せない");
    }

    #[test]
    fn describe_records() {
        let record = MoveRecord::Transfer {
            source: StackType::Waste,
            dest: StackType::Foundation(0),
            cards: vec![Card::new(Suit::Heart, Rank::Ace).id()],
            flipped_source_top: false,
            foundation_suit_bound: false,
        };
        assert_eq!(record.describe(), "move 1 card(s) W -> F1");
        assert_eq!(MoveRecord::StockReset { waste: Vec::new() }.describe(), "reset stock (0 cards)");
    }
}
