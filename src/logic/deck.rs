// src/logic/deck.rs

use crate::components::card::{Card, ALL_RANKS, ALL_SUITS};
use rand::{seq::SliceRandom, Rng};

/// 標準的な52枚のカードデッキ（ソリティア用）を生成する関数だよ！🃏
///
/// スート順 (Heart, Diamond, Club, Spade)、その中で A から K の順番に並ぶ。
/// 生成された時点では、すべてのカードは裏向き (`is_face_up: false`) になってる！
pub fn create_standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(52); // 52枚入る容量を確保しておくと効率的！
    for &suit in ALL_SUITS.iter() {
        for &rank in ALL_RANKS.iter() {
            deck.push(Card::new(suit, rank));
        }
    }
    deck
}

/// カードの山をシャッフルする関数だよ。
///
/// 乱数生成器は呼び出し側から渡してもらう！シードを固定すればテストでも同じ並びになる。
/// `SliceRandom::shuffle` の中身は Fisher–Yates だよ。
pub fn shuffle_cards<R: Rng + ?Sized>(cards: &mut [Card], rng: &mut R) {
    cards.shuffle(rng);
}

/// ゲーム開始時に使う 52 枚のデッキ。
///
/// 配り終わったら用済み！末尾が「一番上」で、`deal` は末尾から 1 枚ずつ取るよ。
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// 標準の並びで作ってから、すぐにシャッフルする。
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self { cards: create_standard_deck() };
        deck.shuffle(rng);
        deck
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        shuffle_cards(&mut self.cards, rng);
    }

    /// 一番上 (末尾) のカードを 1 枚取り出す。空っぽなら None。
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// カードを裏向きにしてから末尾に積む。
    pub fn add_cards(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards.into_iter().map(|mut card| {
            card.is_face_up = false;
            card
        }));
    }

    /// 残りのカードを全部取り出す (山札を作るときに使う)
    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
