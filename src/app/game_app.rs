// src/app/game_app.rs
//! アプリ全体のループだよ！🔁
//!
//! メインメニュー → 難易度選択 → プレイ → (クリアなら) クリア画面、をぐるぐる回す。
//! プレイ中の入力は設定に合わせてテキストか矢印キーのどちらか。

use crate::app::command::{parse_command, Command};
use crate::app::cursor::Cursor;
use crate::app::menu::{run_settings_menu, run_win_screen, show_high_scores, Menu, WinChoice};
use crate::app::renderer::render_game;
use crate::app::screen::{Key, Screen};
use crate::components::game_state::{Difficulty, GameResult, GameStatus};
use crate::config::settings::{GameSettings, InputMode, SettingsStore};
use crate::game::Game;
use crate::high_scores::HighScoreTable;
use anyhow::Result;
use log::{info, trace, warn};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainChoice {
    Start,
    Settings,
    HighScores,
    Exit,
}

/// 1 ゲーム (配り直しを含む) が終わったあと、アプリをどうするか。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AfterSession {
    MainMenu,
    Exit,
}

const TEXT_HINTS: [&str; 2] = [
    "Commands: draw|d, move|m <src> [<dst> [count]], undo|u, score|h, restart|r, quit|q",
    "Piles: W, F1-F4, T1-T7",
];

pub struct App<S: Screen> {
    screen: S,
    store: SettingsStore,
    settings: GameSettings,
    high_scores: HighScoreTable,
    /// 起動時に出す警告 (設定ファイルが読めなかった等)
    notice: Option<String>,
    seed: Option<u64>,
}

impl<S: Screen> App<S> {
    pub fn new(screen: S, store: SettingsStore, high_scores_path: impl AsRef<Path>) -> Self {
        let (settings, mut notice) = store.load_or_default();
        let high_scores = HighScoreTable::load(&high_scores_path).unwrap_or_else(|err| {
            warn!("{}", err);
            notice = Some(format!("Warning: {}", err));
            HighScoreTable::empty(&high_scores_path)
        });
        info!("設定: {:?}", settings);
        Self { screen, store, settings, high_scores, notice, seed: None }
    }

    /// 配り方を固定する (テストやデバッグ用)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    /// メインメニューから始めて、Exit が選ばれるまで回す。
    pub fn run(&mut self) -> Result<()> {
        loop {
            let mut menu = Menu::new(
                vec!["Main menu".to_string()],
                vec![
                    ("Start game".to_string(), MainChoice::Start),
                    ("Settings".to_string(), MainChoice::Settings),
                    ("High scores".to_string(), MainChoice::HighScores),
                    ("Exit".to_string(), MainChoice::Exit),
                ],
            );
            let notice = self.notice.take();
            match menu.run(&mut self.screen, notice.as_deref())? {
                Some(MainChoice::Start) => {
                    if let Some(difficulty) = self.choose_difficulty()? {
                        if self.play_session(difficulty)? == AfterSession::Exit {
                            break;
                        }
                    }
                }
                Some(MainChoice::Settings) => {
                    self.settings = run_settings_menu(&mut self.screen, &self.store, self.settings)?;
                }
                Some(MainChoice::HighScores) => show_high_scores(&mut self.screen, &self.high_scores)?,
                Some(MainChoice::Exit) | None => break,
            }
        }
        info!("おしまい");
        Ok(())
    }

    fn choose_difficulty(&mut self) -> Result<Option<Difficulty>> {
        let mut menu = Menu::new(
            vec!["Choose difficulty:".to_string()],
            vec![
                ("Easy (draw 1)".to_string(), Some(Difficulty::Easy)),
                ("Hard (draw 3)".to_string(), Some(Difficulty::Hard)),
                ("Back".to_string(), None),
            ],
        );
        Ok(menu.run(&mut self.screen, None)?.flatten())
    }

    fn play_session(&mut self, difficulty: Difficulty) -> Result<AfterSession> {
        let mut game = match self.seed {
            Some(seed) => Game::with_seed(difficulty, seed),
            None => Game::new(difficulty),
        };
        loop {
            match self.play(&mut game)? {
                GameResult::Continue => {}
                GameResult::Restart => game.restart(),
                GameResult::Quit => return Ok(AfterSession::MainMenu),
                GameResult::ShowWinScreen => {
                    info!("クリア！ {} 手", game.move_count());
                    return match run_win_screen(&mut self.screen, &mut self.high_scores, game.move_count())? {
                        WinChoice::ShowHighScores => {
                            show_high_scores(&mut self.screen, &self.high_scores)?;
                            Ok(AfterSession::MainMenu)
                        }
                        WinChoice::MainMenu => Ok(AfterSession::MainMenu),
                        WinChoice::Quit => Ok(AfterSession::Exit),
                    };
                }
            }
        }
    }

    /// 1 ゲームぶんの入力ループ。勝つか、配り直しかやめるかで返る。
    pub fn play(&mut self, game: &mut Game) -> Result<GameResult> {
        match self.settings.input_mode {
            InputMode::Text => self.play_text(game),
            InputMode::Arrow => self.play_arrow(game),
        }
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.screen.read_line(&format!("{} (y/n): ", question))?;
        Ok(answer.is_some_and(|answer| answer.trim().eq_ignore_ascii_case("y")))
    }

    fn play_text(&mut self, game: &mut Game) -> Result<GameResult> {
        let mut notice: Option<String> = None;
        loop {
            if game.status() == GameStatus::Won {
                return Ok(GameResult::ShowWinScreen);
            }
            let mut footer: Vec<String> = TEXT_HINTS.iter().map(|hint| hint.to_string()).collect();
            footer.extend(notice.take());
            self.screen.draw(&render_game(game, None, &footer))?;

            let Some(line) = self.screen.read_line("Command: ")? else {
                continue;
            };
            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(err) => {
                    game.clear_last_error();
                    notice = Some(err.to_string());
                    continue;
                }
            };
            match command {
                Command::Draw => {
                    // 失敗は Game が last_error に残して、次のフレームのエラー行に出る
                    if let Err(err) = game.draw_from_stock() {
                        trace!("入力を受け付けなかった: {}", err);
                    }
                }
                Command::Move { source, dest, count } => {
                    if let Err(err) = game.try_move(source, dest, count) {
                        trace!("入力を受け付けなかった: {}", err);
                    }
                }
                Command::AutoMoveToFoundation { source } => {
                    if !self.settings.auto_move_to_foundation {
                        notice = Some("Give a destination, or turn on auto move to foundation in Settings".to_string());
                    } else if let Ok(false) = game.try_auto_move_to_foundation(source) {
                        notice = Some(format!("No foundation accepts the top card of {}", source));
                    }
                }
                Command::Undo => {
                    if let Err(err) = game.undo_last_move() {
                        trace!("入力を受け付けなかった: {}", err);
                    }
                }
                Command::ShowHighScores => show_high_scores(&mut self.screen, &self.high_scores)?,
                Command::Restart => {
                    if self.confirm("Start a new game?")? {
                        return Ok(GameResult::Restart);
                    }
                }
                Command::Quit => {
                    if self.confirm("Quit this game?")? {
                        return Ok(GameResult::Quit);
                    }
                }
            }
        }
    }

    fn play_arrow(&mut self, game: &mut Game) -> Result<GameResult> {
        let mut cursor = Cursor::new();
        loop {
            if game.status() == GameStatus::Won {
                return Ok(GameResult::ShowWinScreen);
            }
            let auto_move = self.settings.auto_move_to_foundation;
            self.screen.draw(&render_game(game, Some(&cursor.selection()), &cursor.hints(auto_move)))?;

            let key = self.screen.read_key()?;
            if cursor.handle_key(key, game, auto_move) {
                continue;
            }
            match key {
                Key::Char('u') | Key::Char('U') => {
                    if let Err(err) = game.undo_last_move() {
                        trace!("入力を受け付けなかった: {}", err);
                    }
                    cursor.sync(game);
                }
                Key::Char('r') | Key::Char('R') => {
                    if self.confirm("Start a new game?")? {
                        return Ok(GameResult::Restart);
                    }
                }
                Key::Char('q') | Key::Char('Q') => {
                    if self.confirm("Quit this game?")? {
                        return Ok(GameResult::Quit);
                    }
                }
                _ => {}
            }
        }
    }
}
