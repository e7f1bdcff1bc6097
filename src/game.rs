// src/game.rs
//! ゲーム全体をまとめる司令塔だよ！🎮
//!
//! 盤面 (`Board`) と移動エンジン (`MoveEngine`) と乱数を持っていて、
//! プレイヤーの操作 (ドロー、移動、undo) を受け付ける。
//! 操作が失敗したら、そのエラーを「最後のエラー」として覚えておくよ。
//! 画面側はそれを見てメッセージを出すだけ。

use crate::components::game_state::{Difficulty, GameStatus};
use crate::components::stack::StackType;
use crate::logic::board::Board;
use crate::logic::deck::Deck;
use crate::logic::error::{MoveError, Result};
use crate::logic::move_engine::MoveEngine;
use crate::logic::pile::PileDisplayInfo;
use crate::logic::rules::all_foundations_complete;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct Game {
    board: Board,
    engine: MoveEngine,
    difficulty: Difficulty,
    rng: StdRng,
    last_error: Option<MoveError>,
}

impl Game {
    /// OS の乱数で新しいゲームを配る。
    pub fn new(difficulty: Difficulty) -> Self {
        Self::deal_with(difficulty, StdRng::from_entropy())
    }

    /// シードを固定して配る。同じシードなら毎回同じ配り方になるよ。
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::deal_with(difficulty, StdRng::seed_from_u64(seed))
    }

    /// 好きな盤面から始める (テスト用の盤面づくりに便利！)
    pub fn from_board(board: Board, difficulty: Difficulty, seed: u64) -> Self {
        Self {
            board,
            engine: MoveEngine::new(),
            difficulty,
            rng: StdRng::seed_from_u64(seed),
            last_error: None,
        }
    }

    fn deal_with(difficulty: Difficulty, mut rng: StdRng) -> Self {
        let board = Board::deal(Deck::new(&mut rng));
        info!("新しいゲーム ({})", difficulty.label());
        Self { board, engine: MoveEngine::new(), difficulty, rng, last_error: None }
    }

    /// 同じ難易度で配り直す。履歴も手数もリセット！
    pub fn restart(&mut self) {
        self.board = Board::deal(Deck::new(&mut self.rng));
        self.engine = MoveEngine::new();
        self.last_error = None;
        info!("配り直し ({})", self.difficulty.label());
    }

    // --- 読み取り ---

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn move_count(&self) -> u32 {
        self.engine.move_count()
    }

    /// 今いくつ undo できるか (最大 3)
    pub fn undo_available(&self) -> usize {
        self.engine.history().len()
    }

    /// 直前の操作のエラー。成功していれば None。
    pub fn last_error(&self) -> Option<&MoveError> {
        self.last_error.as_ref()
    }

    /// 画面側で見つけたミス (一番上じゃないカードを組札へ、など) をエラー欄に出す。
    pub fn set_last_error(&mut self, err: MoveError) {
        warn!("操作できなかった: {}", err);
        self.last_error = Some(err);
    }

    pub fn clear_last_error(&mut self) {
        self.last_error = None;
    }

    /// 画面用の全パイルの情報 (Waste は難易度の枚数だけ見せる)
    pub fn display_infos(&self) -> Vec<PileDisplayInfo> {
        self.board.display_infos(self.difficulty.draw_count())
    }

    pub fn check_win_condition(&self) -> bool {
        let sizes: Vec<usize> = self.board.foundations.iter().map(|pile| pile.len()).collect();
        all_foundations_complete(&sizes)
    }

    pub fn status(&self) -> GameStatus {
        if self.check_win_condition() {
            GameStatus::Won
        } else {
            GameStatus::Playing
        }
    }

    // --- 操作 ---

    /// 操作の共通処理: エラーをクリアしてから実行して、失敗したら覚えておく。
    fn act<T>(&mut self, action: impl FnOnce(&mut MoveEngine, &mut Board, &mut StdRng) -> Result<T>) -> Result<T> {
        self.last_error = None;
        let outcome = action(&mut self.engine, &mut self.board, &mut self.rng);
        if let Err(err) = &outcome {
            if !err.is_critical() {
                warn!("操作できなかった: {}", err);
            }
            self.last_error = Some(err.clone());
        }
        outcome
    }

    /// 山札から (難易度の枚数だけ) めくる。山札が空なら捨て札を戻す。
    pub fn draw_from_stock(&mut self) -> Result<()> {
        let count = self.difficulty.draw_count();
        self.act(|engine, board, rng| engine.draw_from_stock(board, count, rng))
    }

    pub fn try_move(&mut self, source: StackType, dest: StackType, count: usize) -> Result<()> {
        self.act(|engine, board, _| engine.try_move(board, source, dest, count))
    }

    /// 置ける組札があれば動かして true。無ければ false (エラーじゃない)
    pub fn try_auto_move_to_foundation(&mut self, source: StackType) -> Result<bool> {
        self.act(|engine, board, _| engine.try_auto_move_to_foundation(board, source))
    }

    pub fn try_manual_move_to_foundation(&mut self, source: StackType) -> Result<()> {
        self.act(|engine, board, _| engine.try_manual_move_to_foundation(board, source))
    }

    pub fn undo_last_move(&mut self) -> Result<()> {
        self.act(|engine, board, _| engine.undo_last_move(board))
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
