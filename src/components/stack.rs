// src/components/stack.rs

// serde を使うためにインポート！
use serde::{Serialize, Deserialize};
use std::fmt;

/// 場札の列数 (クロンダイクは 7 列！)
pub const TABLEAU_COUNT: u8 = 7;
/// 組札の数 (スートごとに 4 つ)
pub const FOUNDATION_COUNT: u8 = 4;

/// カードが置かれる場所の種類を示す Enum だよ。
/// 山札にあるのか、場札の何列目にあるのか、などを区別するよ。
///
/// インデックスはどれも 0 始まり。画面やコマンドでは 1 始まりで見せるよ。
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StackType {
    /// 山札 (Stock) だよ。プレイヤーがカードを引く元の場所。
    Stock,
    /// 山札からめくったカードを置く場所 (Waste) だよ。
    Waste,
    /// 組札 (Foundation) だよ。番号 (0-3) で管理する。
    /// 0: Heart, 1: Diamond, 2: Club, 3: Spade
    Foundation(u8),
    /// 場札 (Tableau) だよ。7つの列があるので、列番号 (0-6) を持つ。
    Tableau(u8),
}

impl StackType {
    /// コマンド用のトークン ("W", "F1".."F4", "T1".."T7") を読み取る。
    /// 大文字小文字は気にしないよ。Stock はコマンドからは指定できない！
    pub fn parse_token(token: &str) -> Option<StackType> {
        let token = token.trim().to_ascii_uppercase();
        if token == "W" {
            return Some(StackType::Waste);
        }
        let (kind, number) = token.split_at(token.char_indices().nth(1)?.0);
        let number: u8 = number.parse().ok()?;
        match kind {
            "F" if (1..=FOUNDATION_COUNT).contains(&number) => Some(StackType::Foundation(number - 1)),
            "T" if (1..=TABLEAU_COUNT).contains(&number) => Some(StackType::Tableau(number - 1)),
            _ => None,
        }
    }

    /// 場札かどうか
    pub fn is_tableau(self) -> bool {
        matches!(self, StackType::Tableau(_))
    }

    /// 組札かどうか
    pub fn is_foundation(self) -> bool {
        matches!(self, StackType::Foundation(_))
    }
}

impl fmt::Display for StackType {
    /// `parse_token` の逆。Stock だけは "S" にしておく。
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackType::Stock => write!(f, "S"),
            StackType::Waste => write!(f, "W"),
            StackType::Foundation(i) => write!(f, "F{}", u16::from(*i) + 1),
            StackType::Tableau(i) => write!(f, "T{}", u16::from(*i) + 1),
        }
    }
}
