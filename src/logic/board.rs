// src/logic/board.rs
//! 盤面 = 13 個のパイル全部 (Stock 1, Waste 1, Foundation 4, Tableau 7) をまとめたもの。
//!
//! `StackType` からパイルを引けるようにしておくと、移動エンジンがすごく書きやすくなる！

use crate::components::card::Card;
use crate::components::stack::{StackType, FOUNDATION_COUNT, TABLEAU_COUNT};
use crate::logic::deck::Deck;
use crate::logic::pile::{Pile, PileDisplayInfo, SuitBinding};
use crate::logic::rules::get_foundation_suit;
use log::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub stock: Pile,
    pub waste: Pile,
    pub foundations: [Pile; FOUNDATION_COUNT as usize],
    pub tableaux: [Pile; TABLEAU_COUNT as usize],
}

impl Board {
    /// 全部空っぽの盤面。組札のスートは 0: ❤️, 1: ♦️, 2: ♣️, 3: ♠️ で固定。
    pub fn empty() -> Self {
        Self::with_foundations(std::array::from_fn(|i| {
            let index = i as u8;
            let binding = get_foundation_suit(index).map_or(SuitBinding::dynamic(), SuitBinding::permanent);
            Pile::foundation(index, binding)
        }))
    }

    /// 組札のスートを最初の A で決める盤面。
    pub fn empty_with_dynamic_foundations() -> Self {
        Self::with_foundations(std::array::from_fn(|i| Pile::foundation(i as u8, SuitBinding::dynamic())))
    }

    fn with_foundations(foundations: [Pile; FOUNDATION_COUNT as usize]) -> Self {
        Self {
            stock: Pile::stock(Vec::new()),
            waste: Pile::waste(),
            foundations,
            tableaux: std::array::from_fn(|i| Pile::tableau(i as u8)),
        }
    }

    /// デッキからカードを配る。
    ///
    /// 列 i (0 始まり) には i+1 枚、一番上だけ表向き。残りは全部山札へ。
    pub fn deal(mut deck: Deck) -> Self {
        let mut board = Self::empty();
        for (i, column) in board.tableaux.iter_mut().enumerate() {
            for _ in 0..=i {
                if let Some(card) = deck.deal() {
                    column.add_card(card);
                }
            }
            column.flip_top_card_if_necessary();
        }
        board.stock = Pile::stock(deck.into_cards());
        debug!("配り終わったよ: 山札 {} 枚", board.stock.len());
        board
    }

    /// `StackType` からパイルを探す。範囲外なら None。
    pub fn pile(&self, stack: StackType) -> Option<&Pile> {
        match stack {
            StackType::Stock => Some(&self.stock),
            StackType::Waste => Some(&self.waste),
            StackType::Foundation(i) => self.foundations.get(usize::from(i)),
            StackType::Tableau(i) => self.tableaux.get(usize::from(i)),
        }
    }

    pub fn pile_mut(&mut self, stack: StackType) -> Option<&mut Pile> {
        match stack {
            StackType::Stock => Some(&mut self.stock),
            StackType::Waste => Some(&mut self.waste),
            StackType::Foundation(i) => self.foundations.get_mut(usize::from(i)),
            StackType::Tableau(i) => self.tableaux.get_mut(usize::from(i)),
        }
    }

    /// 全パイルを Stock, Waste, Foundation 1..4, Tableau 1..7 の順で回す。
    pub fn piles(&self) -> impl Iterator<Item = &Pile> {
        [&self.stock, &self.waste]
            .into_iter()
            .chain(self.foundations.iter())
            .chain(self.tableaux.iter())
    }

    /// 盤面にあるカードの総数。いつでも 52 のはず！
    pub fn total_cards(&self) -> usize {
        self.piles().map(Pile::len).sum()
    }

    /// 全カードを (パイル, カード) のペアで回す。テストで不変条件を見るのに便利。
    pub fn all_cards(&self) -> impl Iterator<Item = (StackType, &Card)> {
        self.piles().flat_map(|pile| pile.cards().iter().map(move |card| (pile.id(), card)))
    }

    /// 全パイルの表示情報。
    pub fn display_infos(&self, waste_visible: usize) -> Vec<PileDisplayInfo> {
        self.piles().map(|pile| pile.display_info(waste_visible)).collect()
    }
}
