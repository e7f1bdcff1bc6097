// src/app/cursor.rs
//! 矢印キーモードのカーソルだよ！🕹️
//!
//! カーソルは Stock、Waste、場札のどこかを指している。場札ではさらに
//! 「何枚目から上をつかむか」を覚えていて、Enter で移動先選びに入る。
//! 操作のたびに `sync` で盤面と食い違っていないか直す。

use crate::app::renderer::Selection;
use crate::app::screen::Key;
use crate::components::stack::{StackType, TABLEAU_COUNT};
use crate::game::Game;
use crate::logic::error::MoveError;
use crate::logic::pile::Pile;
use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorArea {
    Stock,
    Waste,
    Tableau,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    area: CursorArea,
    tableau_index: u8,
    card_index: usize,
    /// 移動先を選んでいる最中ならその列
    dest_tableau: Option<u8>,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

fn column(game: &Game, index: u8) -> Option<&Pile> {
    game.board().tableaux.get(index as usize)
}

fn column_is_empty(game: &Game, index: u8) -> bool {
    column(game, index).map_or(true, Pile::is_empty)
}

/// 表向きのカードが始まる位置
fn first_face_up(pile: &Pile) -> usize {
    pile.len() - pile.face_up_run_len()
}

/// `from` から `step` 方向に進んで、最初に見つかった空じゃない列。
fn next_non_empty(game: &Game, from: u8, step: i8) -> Option<u8> {
    let mut index = from as i8 + step;
    while (0..TABLEAU_COUNT as i8).contains(&index) {
        if !column_is_empty(game, index as u8) {
            return Some(index as u8);
        }
        index += step;
    }
    None
}

/// `target` に一番近い、空じゃない列 (同じ距離なら左が優先)
fn nearest_non_empty(game: &Game, target: u8) -> Option<u8> {
    if !column_is_empty(game, target) {
        return Some(target);
    }
    (1..TABLEAU_COUNT).find_map(|offset| {
        let left = target.checked_sub(offset).filter(|&left| !column_is_empty(game, left));
        let right = Some(target + offset).filter(|&right| right < TABLEAU_COUNT && !column_is_empty(game, right));
        left.or(right)
    })
}

impl Cursor {
    pub fn new() -> Self {
        Self { area: CursorArea::Stock, tableau_index: 0, card_index: 0, dest_tableau: None }
    }

    pub fn area(&self) -> CursorArea {
        self.area
    }

    pub fn tableau_index(&self) -> u8 {
        self.tableau_index
    }

    pub fn card_index(&self) -> usize {
        self.card_index
    }

    pub fn is_choosing_destination(&self) -> bool {
        self.dest_tableau.is_some()
    }

    /// 今つかんでいるパイル
    pub fn source(&self) -> StackType {
        match self.area {
            CursorArea::Stock => StackType::Stock,
            CursorArea::Waste => StackType::Waste,
            CursorArea::Tableau => StackType::Tableau(self.tableau_index),
        }
    }

    /// 描画用の選択情報
    pub fn selection(&self) -> Selection {
        Selection {
            pile: self.source(),
            card_index: (self.area == CursorArea::Tableau).then_some(self.card_index),
            dest_tableau: self.dest_tableau,
        }
    }

    /// 画面の下に出す操作ヒント
    pub fn hints(&self, auto_move: bool) -> Vec<String> {
        if self.dest_tableau.is_some() {
            return vec!["Left/Right: choose column   Enter: move here   Esc: cancel".to_string()];
        }
        let enter = match self.area {
            CursorArea::Stock => "draw",
            _ if auto_move => "to foundation or choose destination",
            _ => "choose destination",
        };
        vec![
            format!("Arrows: move cursor   Enter: {}", enter),
            "Ctrl+Enter / F: to foundation   U: undo   R: restart   Q: quit".to_string(),
        ]
    }

    fn select_tableau(&mut self, game: &Game, index: u8) {
        self.area = CursorArea::Tableau;
        self.tableau_index = index;
        self.card_index = column(game, index).map_or(0, |pile| pile.len().saturating_sub(1));
    }

    /// 盤面が変わったあとに、カーソルが有効な場所を指すよう直す。
    pub fn sync(&mut self, game: &Game) {
        match self.area {
            CursorArea::Stock => {}
            CursorArea::Waste => {
                if game.board().waste.is_empty() {
                    self.area = CursorArea::Stock;
                }
            }
            CursorArea::Tableau => match nearest_non_empty(game, self.tableau_index) {
                Some(index) if index == self.tableau_index => {
                    if let Some(pile) = column(game, index) {
                        let top = pile.len() - 1;
                        self.card_index = self.card_index.clamp(first_face_up(pile).min(top), top);
                    }
                }
                Some(index) => self.select_tableau(game, index),
                None => self.area = CursorArea::Stock,
            },
        }
        if let Some(dest) = self.dest_tableau {
            self.dest_tableau = Some(dest.min(TABLEAU_COUNT - 1));
        }
    }

    /// キーを 1 つ処理する。カーソルが使わないキーなら false。
    pub fn handle_key(&mut self, key: Key, game: &mut Game, auto_move: bool) -> bool {
        trace!("[Cursor] {:?} at {:?}", key, self.source());
        match key {
            Key::Left => self.move_left(game),
            Key::Right => self.move_right(game),
            Key::Up => self.move_up(game),
            Key::Down => self.move_down(game),
            Key::Enter => self.enter(game, auto_move),
            Key::CtrlEnter | Key::Char('f') | Key::Char('F') => self.to_foundation(game),
            Key::Esc => self.dest_tableau = None,
            _ => return false,
        }
        self.sync(game);
        true
    }

    fn move_left(&mut self, game: &Game) {
        if let Some(dest) = self.dest_tableau {
            self.dest_tableau = Some(dest.saturating_sub(1));
            return;
        }
        match self.area {
            CursorArea::Stock => {}
            CursorArea::Waste => self.area = CursorArea::Stock,
            CursorArea::Tableau => match next_non_empty(game, self.tableau_index, -1) {
                Some(index) => self.select_tableau(game, index),
                None if !game.board().waste.is_empty() => self.area = CursorArea::Waste,
                None => self.area = CursorArea::Stock,
            },
        }
    }

    fn move_right(&mut self, game: &Game) {
        if let Some(dest) = self.dest_tableau {
            self.dest_tableau = Some((dest + 1).min(TABLEAU_COUNT - 1));
            return;
        }
        match self.area {
            CursorArea::Stock if !game.board().waste.is_empty() => self.area = CursorArea::Waste,
            CursorArea::Stock | CursorArea::Waste => {
                let first = if column_is_empty(game, 0) { next_non_empty(game, 0, 1) } else { Some(0) };
                if let Some(index) = first {
                    self.select_tableau(game, index);
                }
            }
            CursorArea::Tableau => {
                if let Some(index) = next_non_empty(game, self.tableau_index, 1) {
                    self.select_tableau(game, index);
                }
            }
        }
    }

    fn move_up(&mut self, game: &Game) {
        if self.dest_tableau.is_some() || self.area != CursorArea::Tableau {
            return;
        }
        let Some(pile) = column(game, self.tableau_index) else {
            return;
        };
        if self.card_index > first_face_up(pile) {
            self.card_index -= 1;
            return;
        }
        // 列の一番上を越えたら上の段へ。右半分の列からは Waste が近い
        self.area = if self.tableau_index >= 4 && !game.board().waste.is_empty() {
            CursorArea::Waste
        } else {
            CursorArea::Stock
        };
    }

    fn move_down(&mut self, game: &Game) {
        if self.dest_tableau.is_some() {
            return;
        }
        match self.area {
            CursorArea::Tableau => {
                if let Some(pile) = column(game, self.tableau_index) {
                    self.card_index = (self.card_index + 1).min(pile.len().saturating_sub(1));
                }
            }
            CursorArea::Stock | CursorArea::Waste => {
                let target = if self.area == CursorArea::Stock { 0 } else { 1 };
                if let Some(index) = nearest_non_empty(game, target) {
                    self.select_tableau(game, index);
                }
            }
        }
    }

    fn enter(&mut self, game: &mut Game, auto_move: bool) {
        if let Some(dest) = self.dest_tableau.take() {
            let count = match self.area {
                CursorArea::Tableau => column(game, self.tableau_index).map_or(1, |pile| pile.len() - self.card_index),
                _ => 1,
            };
            // 失敗は Game が last_error に残して、次のフレームのエラー行に出る
            if let Err(err) = game.try_move(self.source(), StackType::Tableau(dest), count) {
                trace!("入力を受け付けなかった: {}", err);
            }
            return;
        }

        match self.area {
            CursorArea::Stock => {
                if let Err(err) = game.draw_from_stock() {
                    trace!("入力を受け付けなかった: {}", err);
                }
            }
            CursorArea::Waste => {
                if game.board().waste.is_empty() {
                    game.set_last_error(MoveError::EmptyPile("the waste is empty".to_string()));
                    return;
                }
                self.start_move(game, auto_move, true);
            }
            CursorArea::Tableau => {
                let Some(pile) = column(game, self.tableau_index) else {
                    return;
                };
                if pile.is_empty() {
                    return;
                }
                let on_top = self.card_index + 1 == pile.len();
                self.start_move(game, auto_move, on_top);
            }
        }
    }

    /// 自動で組札へ送れればそうして、ダメなら移動先選びに入る。
    fn start_move(&mut self, game: &mut Game, auto_move: bool, on_top: bool) {
        game.clear_last_error();
        if auto_move && on_top {
            match game.try_auto_move_to_foundation(self.source()) {
                Ok(true) | Err(_) => return,
                Ok(false) => {}
            }
        }
        let start = match self.area {
            CursorArea::Tableau => self.tableau_index,
            _ => 0,
        };
        self.dest_tableau = Some(start);
    }

    fn to_foundation(&mut self, game: &mut Game) {
        if self.dest_tableau.is_some() {
            return;
        }
        match self.area {
            CursorArea::Stock => game.set_last_error(MoveError::InvalidPile(
                "only the waste or a tableau column can move to a foundation".to_string(),
            )),
            CursorArea::Waste => {
                if let Err(err) = game.try_manual_move_to_foundation(StackType::Waste) {
                    trace!("入力を受け付けなかった: {}", err);
                }
            }
            CursorArea::Tableau => {
                let Some(pile) = column(game, self.tableau_index) else {
                    return;
                };
                if pile.is_empty() {
                    return;
                }
                if self.card_index + 1 != pile.len() {
                    game.set_last_error(MoveError::InvalidMoveRule(
                        "only the top card of a column can move to a foundation".to_string(),
                    ));
                    return;
                }
                if let Err(err) = game.try_manual_move_to_foundation(self.source()) {
                    trace!("入力を受け付けなかった: {}", err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::card::{Card, Rank, Suit};
    use crate::components::game_state::Difficulty;
    use crate::logic::board::Board;

    fn up(suit: Suit, rank: Rank) -> Card {
        Card::face_up(suit, rank)
    }

    fn press(cursor: &mut Cursor, game: &mut Game, keys: &[Key]) {
        for &key in keys {
            cursor.handle_key(key, game, false);
        }
    }

    #[test]
    fn enter_on_stock_draws() {
        let mut game = Game::with_seed(Difficulty::Easy, 11);
        let mut cursor = Cursor::new();
        press(&mut cursor, &mut game, &[Key::Enter]);
        assert_eq!(game.board().waste.len(), 1);
        assert_eq!(game.move_count(), 1);

        press(&mut cursor, &mut game, &[Key::Right]);
        assert_eq!(cursor.area(), CursorArea::Waste);
        press(&mut cursor, &mut game, &[Key::Left]);
        assert_eq!(cursor.area(), CursorArea::Stock);
    }

    #[test]
    fn navigation_skips_empty_columns() {
        let mut board = Board::empty();
        board.tableaux[1].add_card(up(Suit::Spade, Rank::Five));
        board.tableaux[4].add_card(up(Suit::Heart, Rank::Nine));
        let mut game = Game::from_board(board, Difficulty::Easy, 0);
        let mut cursor = Cursor::new();

        press(&mut cursor, &mut game, &[Key::Down]);
        assert_eq!(cursor.source(), StackType::Tableau(1), "T1 は空なので T2 へ");
        press(&mut cursor, &mut game, &[Key::Right]);
        assert_eq!(cursor.source(), StackType::Tableau(4));
        press(&mut cursor, &mut game, &[Key::Right]);
        assert_eq!(cursor.source(), StackType::Tableau(4), "右にはもう無い");
        press(&mut cursor, &mut game, &[Key::Left, Key::Left]);
        assert_eq!(cursor.area(), CursorArea::Stock, "Waste が空なので Stock まで戻る");
        println!("カーソル移動テスト、成功！🎉");
    }

    #[test]
    fn up_and_down_stay_within_face_up_run() {
        let mut board = Board::empty();
        board.tableaux[0].add_cards(vec![
            Card::new(Suit::Heart, Rank::Four),
            up(Suit::Club, Rank::Nine),
            up(Suit::Diamond, Rank::Eight),
            up(Suit::Spade, Rank::Seven),
        ]);
        let mut game = Game::from_board(board, Difficulty::Easy, 0);
        let mut cursor = Cursor::new();

        press(&mut cursor, &mut game, &[Key::Down]);
        assert_eq!(cursor.card_index(), 3);
        press(&mut cursor, &mut game, &[Key::Up, Key::Up]);
        assert_eq!(cursor.card_index(), 1);
        press(&mut cursor, &mut game, &[Key::Down, Key::Down, Key::Down]);
        assert_eq!(cursor.card_index(), 3);
        press(&mut cursor, &mut game, &[Key::Up, Key::Up, Key::Up]);
        assert_eq!(cursor.area(), CursorArea::Stock, "裏向きのカードは選べないので上の段へ");
    }

    #[test]
    fn select_run_and_move_it() {
        let mut board = Board::empty();
        board.tableaux[0].add_cards(vec![up(Suit::Club, Rank::Nine), up(Suit::Diamond, Rank::Eight)]);
        board.tableaux[2].add_card(up(Suit::Heart, Rank::Ten));
        let mut game = Game::from_board(board, Difficulty::Easy, 0);
        let mut cursor = Cursor::new();

        press(&mut cursor, &mut game, &[Key::Down, Key::Up, Key::Enter]);
        assert!(cursor.is_choosing_destination());
        assert_eq!(cursor.selection().dest_tableau, Some(0));

        press(&mut cursor, &mut game, &[Key::Right, Key::Right, Key::Enter]);
        assert!(!cursor.is_choosing_destination());
        assert_eq!(game.board().tableaux[2].len(), 3);
        assert!(game.board().tableaux[0].is_empty());
        assert_eq!(cursor.source(), StackType::Tableau(2), "空になった列から一番近い列へ");
        assert_eq!(cursor.card_index(), 2);
    }

    #[test]
    fn escape_cancels_destination() {
        let mut board = Board::empty();
        board.tableaux[3].add_card(up(Suit::Club, Rank::Nine));
        let mut game = Game::from_board(board, Difficulty::Easy, 0);
        let mut cursor = Cursor::new();
        press(&mut cursor, &mut game, &[Key::Down, Key::Enter]);
        assert!(cursor.is_choosing_destination());
        press(&mut cursor, &mut game, &[Key::Esc]);
        assert!(!cursor.is_choosing_destination());
        assert_eq!(game.move_count(), 0);
    }

    #[test]
    fn auto_move_from_waste() {
        let mut board = Board::empty();
        board.waste.add_card(up(Suit::Heart, Rank::Ace));
        let mut game = Game::from_board(board, Difficulty::Easy, 0);
        let mut cursor = Cursor::new();
        press(&mut cursor, &mut game, &[Key::Right]);
        assert_eq!(cursor.area(), CursorArea::Waste);

        cursor.handle_key(Key::Enter, &mut game, true);
        assert_eq!(game.board().foundations[0].len(), 1);
        assert_eq!(cursor.area(), CursorArea::Stock, "Waste が空になったので Stock へ");
    }

    #[test]
    fn ctrl_enter_only_moves_the_top_card() {
        let mut board = Board::empty();
        board.tableaux[0].add_cards(vec![up(Suit::Club, Rank::Two), up(Suit::Heart, Rank::Ace)]);
        let mut game = Game::from_board(board, Difficulty::Easy, 0);
        let mut cursor = Cursor::new();

        press(&mut cursor, &mut game, &[Key::Down, Key::Up, Key::CtrlEnter]);
        assert!(matches!(game.last_error(), Some(MoveError::InvalidMoveRule(_))));

        press(&mut cursor, &mut game, &[Key::Down, Key::CtrlEnter]);
        assert_eq!(game.board().foundations[0].len(), 1);
        assert_eq!(cursor.card_index(), 0);

        press(&mut cursor, &mut game, &[Key::Char('f')]);
        assert!(matches!(game.last_error(), Some(MoveError::InvalidMoveRule(_))), "2♣ はまだ置けない");
    }

    #[test]
    fn unknown_keys_are_left_for_the_caller() {
        let mut game = Game::with_seed(Difficulty::Easy, 1);
        let mut cursor = Cursor::new();
        assert!(!cursor.handle_key(Key::Char('u'), &mut game, false));
        assert!(cursor.handle_key(Key::Esc, &mut game, false));
    }
}
