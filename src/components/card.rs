// src/components/card.rs

// serde を使う宣言！カード情報を保存したりログに出したりする時に使うかも！
use serde::{Serialize, Deserialize};
use std::fmt;

/// カードのスート（マーク）を表す列挙型だよ！❤️♦️♣️♠️
///
/// #[derive(...)] のおまじないも忘れずに！
/// - Clone, Copy: 簡単にコピーできるように
/// - PartialEq, Eq, Hash: 比較したり HashMap のキーにしたりできるように
/// - Serialize, Deserialize: JSON などに変換できるように
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Heart,   // ❤️
    Diamond, // ♦️
    Club,    // ♣️
    Spade,   // ♠️
}

impl Suit {
    /// 画面に出すときの記号だよ。
    pub fn symbol(self) -> char {
        match self {
            Suit::Heart => '♥',
            Suit::Diamond => '♦',
            Suit::Club => '♣',
            Suit::Spade => '♠',
        }
    }

    /// 0..4 の通し番号。CardId を作るのに使う。
    fn ordinal(self) -> u8 {
        match self {
            Suit::Heart => 0,
            Suit::Diamond => 1,
            Suit::Club => 2,
            Suit::Spade => 3,
        }
    }
}

/// カードのランク（数字）を表す列挙型だよ！ A, 2, 3, ..., K
///
/// PartialOrd, Ord も付けて、ランクの大小比較 (`<`, `>`) もできるようにしておこう！
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace = 1, // A は 1 として扱うよ
    Two,     // 2
    Three,   // 3
    Four,    // 4
    Five,    // 5
    Six,     // 6
    Seven,   // 7
    Eight,   // 8
    Nine,    // 9
    Ten,     // 10
    Jack,    // J (11 扱い)
    Queen,   // Q (12 扱い)
    King,    // K (13 扱い)
}

impl Rank {
    /// 1..=13 の数値として取り出す。
    pub fn value(self) -> u8 {
        self as u8
    }

    /// 1..=13 の数値からランクを作る。範囲外なら None。
    pub fn from_value(value: u8) -> Option<Rank> {
        ALL_RANKS.get(usize::from(value).checked_sub(1)?).copied()
    }

    /// ひとつ上のランク (King の上は無い！)
    pub fn next(self) -> Option<Rank> {
        Rank::from_value(self.value() + 1)
    }

    /// 表示用のラベル ("A", "2", ..., "10", "J", "Q", "K")
    pub fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

/// 全スートの配列。山札を作るときにループで回すよ。
pub const ALL_SUITS: [Suit; 4] = [Suit::Heart, Suit::Diamond, Suit::Club, Suit::Spade];

/// 全ランクの配列 (A から K まで順番通り！)
pub const ALL_RANKS: [Rank; 13] = [
    Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven,
    Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King,
];

/// カードの色（赤か黒か）だよ。場札 (Tableau) の色違いルールで使う！❤️🖤
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CardColor {
    Red,
    Black,
}

impl CardColor {
    /// スートからカードの色を取得する関数。
    pub fn from_suit(suit: Suit) -> Self {
        match suit {
            Suit::Heart | Suit::Diamond => CardColor::Red,
            Suit::Club | Suit::Spade => CardColor::Black,
        }
    }
}

/// 52 枚それぞれに固定で振られた番号 (0..52) だよ。
///
/// 表向き/裏向きの状態は含まないので、「同じカードかどうか」の比較に使える。
/// 履歴 (undo) にはカードそのものじゃなくてこの ID を記録するんだ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(u8);

impl CardId {
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

/// カードそのものを表す構造体だよ！🃏
///
/// - `suit`: カードのスート
/// - `rank`: カードのランク
/// - `is_face_up`: 表向きなら true
///
/// Copy は付けてないよ。カードはパイルからパイルへ「移動」するもので、
/// 複製されちゃいけないからね！
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    pub is_face_up: bool,
}

impl Card {
    /// 裏向きのカードを作る。
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank, is_face_up: false }
    }

    /// 表向きのカードを作る。テストや盤面の組み立てで便利！
    pub fn face_up(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank, is_face_up: true }
    }

    pub fn color(&self) -> CardColor {
        CardColor::from_suit(self.suit)
    }

    /// スートとランクだけで決まる安定した ID。
    pub fn id(&self) -> CardId {
        CardId(self.suit.ordinal() * 13 + (self.rank.value() - 1))
    }

    /// スートとランクが同じかどうか (向きは無視！)
    pub fn same_card(&self, other: &Card) -> bool {
        self.id() == other.id()
    }
}

impl fmt::Display for Card {
    /// 表向きなら "A♥" / "10♠" みたいに、裏向きなら "##" を出すよ。
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_face_up {
            write!(f, "{}{}", self.rank.label(), self.suit.symbol())
        } else {
            write!(f, "##")
        }
    }
}

// --- テスト ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn create_card() {
        let card = Card::new(Suit::Heart, Rank::Ace);
        assert_eq!(card.suit, Suit::Heart);
        assert_eq!(card.rank, Rank::Ace);
        assert!(!card.is_face_up);
        println!("カード作成テスト、成功！🎉");
    }

    #[test]
    fn rank_comparison() {
        assert!(Rank::Ace < Rank::Two);
        assert!(Rank::Queen < Rank::King);
        assert_eq!(Rank::Ten.value(), 10);
        assert_eq!(Rank::from_value(13), Some(Rank::King));
        assert_eq!(Rank::from_value(0), None);
        assert_eq!(Rank::from_value(14), None);
        assert_eq!(Rank::Queen.next(), Some(Rank::King));
        assert_eq!(Rank::King.next(), None);
        println!("Rank の比較テスト、成功！🎉");
    }

    #[test]
    fn colors_follow_suit() {
        assert_eq!(Card::new(Suit::Heart, Rank::Two).color(), CardColor::Red);
        assert_eq!(Card::new(Suit::Diamond, Rank::Two).color(), CardColor::Red);
        assert_eq!(Card::new(Suit::Club, Rank::Two).color(), CardColor::Black);
        assert_eq!(Card::new(Suit::Spade, Rank::Two).color(), CardColor::Black);
    }

    #[test]
    fn ids_are_unique_and_ignore_orientation() {
        let mut seen = HashSet::new();
        for suit in ALL_SUITS {
            for rank in ALL_RANKS {
                let id = Card::new(suit, rank).id();
                assert!(id.index() < 52);
                assert!(seen.insert(id), "ID がかぶってる！ {:?}", id);
            }
        }
        assert_eq!(seen.len(), 52);

        let down = Card::new(Suit::Club, Rank::Seven);
        let up = Card::face_up(Suit::Club, Rank::Seven);
        assert_ne!(down, up);
        assert!(down.same_card(&up));
        println!("CardId テスト、成功！🎉");
    }

    #[test]
    fn display_labels() {
        assert_eq!(Card::face_up(Suit::Heart, Rank::Ace).to_string(), "A♥");
        assert_eq!(Card::face_up(Suit::Spade, Rank::Ten).to_string(), "10♠");
        assert_eq!(Card::new(Suit::Spade, Rank::Ten).to_string(), "##");
    }
}
