// src/logic/pile.rs
//! カードの「山」ひとつぶんを表すモジュールだよ！🃏🃏🃏
//!
//! 山札 (Stock)、捨て札 (Waste)、組札 (Foundation)、場札 (Tableau) の 4 種類を、
//! 共通のカード置き場 (`Vec<Card>`) と種類タグ (`PileKind`) の組み合わせで表す。
//! カードの並びは「末尾が一番上」だよ。

use crate::components::card::{Card, Suit};
use crate::components::stack::StackType;
use crate::logic::deck::shuffle_cards;
use crate::logic::rules;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// 組札とスートの結び付き。
///
/// `permanent` なら最初から最後までずっと同じスート。
/// そうでなければ最初に置かれた A でスートが決まって、空に戻ったら解除される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuitBinding {
    pub suit: Option<Suit>,
    pub permanent: bool,
}

impl SuitBinding {
    pub fn permanent(suit: Suit) -> Self {
        Self { suit: Some(suit), permanent: true }
    }

    pub fn dynamic() -> Self {
        Self { suit: None, permanent: false }
    }
}

/// パイルの種類タグ。置き方のルールはこれで切り替える。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PileKind {
    Stock,
    Waste,
    Foundation(SuitBinding),
    Tableau,
}

/// 表示用にカードを並べる向き。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// 表示する 1 マスぶん。
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCard {
    Card(Card),
    /// まだカードの無い組札に、結び付いたスートを薄く出す
    Placeholder(Suit),
    /// 何も無い
    Empty,
}

/// 画面側がパイルを描くための読み取り専用の情報。
#[derive(Debug, Clone, PartialEq)]
pub struct PileDisplayInfo {
    pub stack_type: StackType,
    pub cards: Vec<DisplayCard>,
    pub orientation: Orientation,
    /// 一部だけ見せる場合の枚数 (Waste だけ)
    pub visible_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pile {
    id: StackType,
    kind: PileKind,
    cards: Vec<Card>,
}

impl Pile {
    /// 山札を作る。渡したカードは全部裏向きにするよ。
    pub fn stock(cards: Vec<Card>) -> Self {
        let mut pile = Self { id: StackType::Stock, kind: PileKind::Stock, cards: Vec::new() };
        pile.add_cards(cards);
        pile
    }

    pub fn waste() -> Self {
        Self { id: StackType::Waste, kind: PileKind::Waste, cards: Vec::new() }
    }

    pub fn foundation(index: u8, binding: SuitBinding) -> Self {
        Self { id: StackType::Foundation(index), kind: PileKind::Foundation(binding), cards: Vec::new() }
    }

    pub fn tableau(index: u8) -> Self {
        Self { id: StackType::Tableau(index), kind: PileKind::Tableau, cards: Vec::new() }
    }

    // --- 読み取り ---

    pub fn id(&self) -> StackType {
        self.id
    }

    pub fn kind(&self) -> PileKind {
        self.kind
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// 一番上のカードをのぞき見する。
    pub fn top(&self) -> Option<&Card> {
        self.cards.last()
    }

    /// 組札に結び付いているスート。組札以外は None。
    pub fn bound_suit(&self) -> Option<Suit> {
        match self.kind {
            PileKind::Foundation(binding) => binding.suit,
            _ => None,
        }
    }

    /// 一番上から数えて、表向きのカードが何枚続いているか。
    pub fn face_up_run_len(&self) -> usize {
        self.cards.iter().rev().take_while(|card| card.is_face_up).count()
    }

    // --- ルール ---

    /// このカードを一番上に置けるか。Stock と Waste は普通の移動では絶対に受け付けない。
    pub fn can_add(&self, card: &Card) -> bool {
        match self.kind {
            PileKind::Stock | PileKind::Waste => rules::can_add_to_stock_or_waste(),
            PileKind::Foundation(binding) => rules::can_add_to_foundation(card, self.top(), binding.suit),
            PileKind::Tableau => rules::can_add_to_tableau(card, self.top()),
        }
    }

    /// カード列をまとめて置けるか。まとめて受け取れるのは場札だけ。
    pub fn can_add_sequence(&self, sequence: &[Card]) -> bool {
        match (self.kind, sequence) {
            (PileKind::Tableau, _) => rules::can_add_sequence_to_tableau(sequence, self.top()),
            (_, [single]) => self.can_add(single),
            _ => false,
        }
    }

    // --- 書き換え ---

    /// カードを末尾に積む。ルールチェックはしないので、呼ぶ前に `can_add` で確かめてね！
    ///
    /// 向きはパイルの種類で揃える: Stock は裏向き、Waste と Foundation は表向き、
    /// Tableau は渡されたまま。空の組札にスートが無ければ、最初のカードで決まる。
    pub fn add_cards(&mut self, cards: impl IntoIterator<Item = Card>) {
        for mut card in cards {
            match &mut self.kind {
                PileKind::Stock => card.is_face_up = false,
                PileKind::Waste => card.is_face_up = true,
                PileKind::Foundation(binding) => {
                    card.is_face_up = true;
                    if binding.suit.is_none() {
                        debug!("{} がスート {:?} に結び付いたよ", self.id, card.suit);
                        binding.suit = Some(card.suit);
                    }
                }
                PileKind::Tableau => {}
            }
            self.cards.push(card);
        }
    }

    pub fn add_card(&mut self, card: Card) {
        self.add_cards(std::iter::once(card));
    }

    /// 一番上のカードを取り除く。
    pub fn remove_top(&mut self) -> Option<Card> {
        let card = self.cards.pop()?;
        self.release_binding_if_empty();
        Some(card)
    }

    /// 上から `count` 枚を、積まれていた順番のまま取り除く。
    /// 足りなければ何もしないで None を返す。
    pub fn remove_top_n(&mut self, count: usize) -> Option<Vec<Card>> {
        let start = self.cards.len().checked_sub(count)?;
        let removed = self.cards.split_off(start);
        self.release_binding_if_empty();
        Some(removed)
    }

    /// 全部取り出して空っぽにする。
    pub fn take_all(&mut self) -> Vec<Card> {
        let removed = std::mem::take(&mut self.cards);
        self.release_binding_if_empty();
        removed
    }

    /// 空になった組札のうち、固定じゃないものはスートの結び付きを外す。
    fn release_binding_if_empty(&mut self) {
        if let PileKind::Foundation(binding) = &mut self.kind {
            if self.cards.is_empty() && !binding.permanent && binding.suit.is_some() {
                debug!("{} のスート {:?} の結び付きを解除", self.id, binding.suit);
                binding.suit = None;
            }
        }
    }

    /// 固定じゃない組札のスートを外す (undo 用)。空じゃなければ何もしない。
    pub fn clear_suit_binding(&mut self) {
        self.release_binding_if_empty();
    }

    /// 一番上が裏向きなら表にする。めくったら true を返すよ (undo の記録に使う)
    pub fn flip_top_card_if_necessary(&mut self) -> bool {
        match self.cards.last_mut() {
            Some(card) if !card.is_face_up => {
                card.is_face_up = true;
                true
            }
            _ => false,
        }
    }

    /// 一番上を裏向きに戻す (めくった手を undo するとき)
    pub fn conceal_top_card(&mut self) {
        if let Some(card) = self.cards.last_mut() {
            card.is_face_up = false;
        }
    }

    // --- 山札専用 ---

    /// 山札の上から最大 `count` 枚を表向きにして取り出す。
    /// 並びは山のまま。だから捨て札に積むと、元の一番上のカードがまた一番上に来るよ。
    pub fn draw(&mut self, count: usize) -> Vec<Card> {
        let take = count.min(self.cards.len());
        let start = self.cards.len() - take;
        self.cards
            .drain(start..)
            .map(|mut card| {
                card.is_face_up = true;
                card
            })
            .collect()
    }

    /// 捨て札の束を逆順に積み戻して、シャッフルして、全部裏向きにする。
    pub fn reset<R: Rng + ?Sized>(&mut self, waste_cards: Vec<Card>, rng: &mut R) {
        self.cards.extend(waste_cards.into_iter().rev());
        shuffle_cards(&mut self.cards, rng);
        for card in &mut self.cards {
            card.is_face_up = false;
        }
        debug!("山札をリセット: {} 枚", self.cards.len());
    }

    // --- 表示 ---

    /// 画面用の情報を作る。`waste_visible` は Waste で見せる枚数 (難易度で 1 か 3)
    pub fn display_info(&self, waste_visible: usize) -> PileDisplayInfo {
        let top_or = |fallback: DisplayCard| {
            self.top().cloned().map(DisplayCard::Card).unwrap_or(fallback)
        };
        let (cards, orientation, visible_count) = match self.kind {
            PileKind::Stock => (vec![top_or(DisplayCard::Empty)], Orientation::Horizontal, None),
            PileKind::Waste => {
                let shown = waste_visible.min(self.cards.len());
                let cards = self.cards[self.cards.len() - shown..]
                    .iter()
                    .cloned()
                    .map(DisplayCard::Card)
                    .collect();
                (cards, Orientation::Horizontal, Some(shown))
            }
            PileKind::Foundation(binding) => {
                let placeholder = binding.suit.map_or(DisplayCard::Empty, DisplayCard::Placeholder);
                (vec![top_or(placeholder)], Orientation::Horizontal, None)
            }
            PileKind::Tableau => (
                self.cards.iter().cloned().map(DisplayCard::Card).collect(),
                Orientation::Vertical,
                None,
            ),
        };
        PileDisplayInfo { stack_type: self.id, cards, orientation, visible_count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::card::Rank;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn up(suit: Suit, rank: Rank) -> Card {
        Card::face_up(suit, rank)
    }

    #[test]
    fn stock_conceals_and_refuses_direct_adds() {
        let stock = Pile::stock(vec![up(Suit::Heart, Rank::Ace), up(Suit::Club, Rank::Two)]);
        assert!(stock.cards().iter().all(|card| !card.is_face_up));
        assert!(!stock.can_add(&up(Suit::Heart, Rank::King)));
        assert!(!Pile::waste().can_add(&up(Suit::Heart, Rank::King)));
        println!("Stock のテスト、成功！🎉");
    }

    #[test]
    fn draw_takes_from_top_face_up() {
        let mut stock = Pile::stock(vec![
            Card::new(Suit::Heart, Rank::Ace),
            Card::new(Suit::Heart, Rank::Two),
            Card::new(Suit::Heart, Rank::Three),
        ]);
        let drawn = stock.draw(2);
        assert_eq!(drawn, vec![up(Suit::Heart, Rank::Two), up(Suit::Heart, Rank::Three)]);
        assert_eq!(stock.len(), 1);

        // 足りなければあるだけ
        let rest = stock.draw(3);
        assert_eq!(rest, vec![up(Suit::Heart, Rank::Ace)]);
        assert!(stock.draw(1).is_empty());
    }

    #[test]
    fn reset_refills_and_conceals() {
        let mut stock = Pile::stock(Vec::new());
        let waste_cards = vec![up(Suit::Spade, Rank::Four), up(Suit::Club, Rank::Nine), up(Suit::Heart, Rank::Queen)];
        stock.reset(waste_cards.clone(), &mut StdRng::seed_from_u64(11));
        assert_eq!(stock.len(), 3);
        assert!(stock.cards().iter().all(|card| !card.is_face_up));
        for card in &waste_cards {
            assert!(stock.cards().iter().any(|c| c.same_card(card)));
        }
    }

    #[test]
    fn waste_turns_cards_face_up() {
        let mut waste = Pile::waste();
        waste.add_card(Card::new(Suit::Diamond, Rank::Five));
        assert!(waste.top().is_some_and(|card| card.is_face_up));
    }

    #[test]
    fn dynamic_foundation_binds_and_releases() {
        let mut foundation = Pile::foundation(0, SuitBinding::dynamic());
        assert!(foundation.can_add(&up(Suit::Club, Rank::Ace)));
        assert!(foundation.can_add(&up(Suit::Heart, Rank::Ace)));

        foundation.add_card(up(Suit::Club, Rank::Ace));
        assert_eq!(foundation.bound_suit(), Some(Suit::Club));
        assert!(foundation.can_add(&up(Suit::Club, Rank::Two)));
        assert!(!foundation.can_add(&up(Suit::Spade, Rank::Two)));

        // 空に戻ったら解除されて、別のスートの A を受け付ける
        assert_eq!(foundation.remove_top(), Some(up(Suit::Club, Rank::Ace)));
        assert_eq!(foundation.bound_suit(), None);
        assert!(foundation.can_add(&up(Suit::Heart, Rank::Ace)));
        println!("動的な組札のテスト、成功！🎉");
    }

    #[test]
    fn permanent_foundation_keeps_its_suit() {
        let mut foundation = Pile::foundation(1, SuitBinding::permanent(Suit::Diamond));
        assert!(!foundation.can_add(&up(Suit::Heart, Rank::Ace)));
        assert!(foundation.can_add(&up(Suit::Diamond, Rank::Ace)));
        foundation.add_card(up(Suit::Diamond, Rank::Ace));
        foundation.remove_top();
        assert_eq!(foundation.bound_suit(), Some(Suit::Diamond));
        foundation.clear_suit_binding();
        assert_eq!(foundation.bound_suit(), Some(Suit::Diamond));
    }

    #[test]
    fn tableau_flip_and_conceal() {
        let mut tableau = Pile::tableau(0);
        tableau.add_cards(vec![Card::new(Suit::Spade, Rank::Nine), up(Suit::Heart, Rank::Eight)]);
        assert_eq!(tableau.face_up_run_len(), 1);

        let moved = tableau.remove_top_n(1).unwrap();
        assert_eq!(moved, vec![up(Suit::Heart, Rank::Eight)]);
        assert!(tableau.flip_top_card_if_necessary());
        assert!(!tableau.flip_top_card_if_necessary(), "2 回目はめくらない");
        assert_eq!(tableau.face_up_run_len(), 1);

        tableau.conceal_top_card();
        assert_eq!(tableau.face_up_run_len(), 0);
        assert!(!Pile::tableau(1).flip_top_card_if_necessary());
    }

    #[test]
    fn remove_top_n_keeps_order_and_rejects_too_many() {
        let mut tableau = Pile::tableau(3);
        let cards = vec![up(Suit::Club, Rank::Nine), up(Suit::Diamond, Rank::Eight), up(Suit::Spade, Rank::Seven)];
        tableau.add_cards(cards.clone());
        assert_eq!(tableau.remove_top_n(4), None);
        assert_eq!(tableau.len(), 3);
        assert_eq!(tableau.remove_top_n(2), Some(cards[1..].to_vec()));
    }

    #[test]
    fn sequences_only_go_to_tableau() {
        let run = vec![up(Suit::Club, Rank::Nine), up(Suit::Diamond, Rank::Eight)];
        let mut tableau = Pile::tableau(0);
        tableau.add_card(up(Suit::Heart, Rank::Ten));
        assert!(tableau.can_add_sequence(&run));

        let foundation = Pile::foundation(0, SuitBinding::dynamic());
        assert!(!foundation.can_add_sequence(&run));
        assert!(foundation.can_add_sequence(&[up(Suit::Club, Rank::Ace)]));
    }

    #[test]
    fn display_info_per_kind() {
        let mut waste = Pile::waste();
        waste.add_cards(vec![
            Card::new(Suit::Heart, Rank::Two),
            Card::new(Suit::Heart, Rank::Three),
            Card::new(Suit::Heart, Rank::Four),
            Card::new(Suit::Heart, Rank::Five),
        ]);
        let info = waste.display_info(3);
        assert_eq!(info.visible_count, Some(3));
        assert_eq!(info.cards.len(), 3);
        assert_eq!(info.cards[2], DisplayCard::Card(up(Suit::Heart, Rank::Five)));
        assert_eq!(info.orientation, Orientation::Horizontal);

        let foundation = Pile::foundation(3, SuitBinding::permanent(Suit::Spade));
        assert_eq!(foundation.display_info(1).cards, vec![DisplayCard::Placeholder(Suit::Spade)]);

        let stock = Pile::stock(Vec::new());
        assert_eq!(stock.display_info(1).cards, vec![DisplayCard::Empty]);

        let mut tableau = Pile::tableau(2);
        tableau.add_cards(vec![Card::new(Suit::Club, Rank::Two), up(Suit::Heart, Rank::Ace)]);
        let info = tableau.display_info(1);
        assert_eq!(info.orientation, Orientation::Vertical);
        assert_eq!(info.cards.len(), 2);
        assert_eq!(info.stack_type, StackType::Tableau(2));
    }
}
