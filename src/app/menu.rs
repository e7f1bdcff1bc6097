// src/app/menu.rs
//! メニューまわり: 上下で選んで Enter で決める、よくあるやつだよ！📋
//!
//! メインメニュー、難易度選択、設定画面、クリア画面がここを使う。

use crate::app::renderer::{render_high_scores, render_menu, Frame, Line, Tint};
use crate::app::screen::{Key, Screen};
use crate::config::layout::SCREEN_WIDTH;
use crate::config::settings::{GameSettings, SettingsStore};
use crate::high_scores::{HighScoreTable, MAX_INITIALS};
use anyhow::Result;
use log::{info, warn};

/// 選択肢の並び。上下の端で反対側に回り込む。
#[derive(Debug, Clone)]
pub struct Menu<T: Copy> {
    subtitle: Vec<String>,
    options: Vec<(String, T)>,
    selected: usize,
}

impl<T: Copy> Menu<T> {
    pub fn new(subtitle: Vec<String>, options: Vec<(String, T)>) -> Self {
        Self { subtitle, options, selected: 0 }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// 上下で選択を動かして、Enter で決まった値を返す。
    pub fn handle_key(&mut self, key: Key) -> Option<T> {
        let len = self.options.len();
        if len == 0 {
            return None;
        }
        match key {
            Key::Up => self.selected = (self.selected + len - 1) % len,
            Key::Down => self.selected = (self.selected + 1) % len,
            Key::Enter => return self.options.get(self.selected).map(|(_, value)| *value),
            _ => {}
        }
        None
    }

    pub fn frame(&self, message: Option<&str>) -> Frame {
        let labels: Vec<String> = self.options.iter().map(|(label, _)| label.clone()).collect();
        render_menu(&self.subtitle, &labels, self.selected, message)
    }

    /// 決まるまで描いて読むを繰り返す。Esc なら None。
    pub fn run(&mut self, screen: &mut dyn Screen, message: Option<&str>) -> Result<Option<T>> {
        loop {
            screen.draw(&self.frame(message))?;
            let key = screen.read_key()?;
            if key == Key::Esc {
                return Ok(None);
            }
            if let Some(value) = self.handle_key(key) {
                return Ok(Some(value));
            }
        }
    }
}

// --- 設定画面 ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    None,
    Changed,
    Close,
}

const SETTINGS_ITEMS: usize = 3;

/// 設定画面の状態。値は左右 (または Enter) で切り替え、最後の `Back` で閉じる。
#[derive(Debug, Clone)]
pub struct SettingsMenu {
    settings: GameSettings,
    selected: usize,
}

impl SettingsMenu {
    pub fn new(settings: GameSettings) -> Self {
        Self { settings, selected: 0 }
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    fn labels(&self) -> Vec<String> {
        let auto = if self.settings.auto_move_to_foundation { "On" } else { "Off" };
        vec![
            format!("Input mode: < {} >", self.settings.input_mode.label()),
            format!("Auto move to foundation: < {} >", auto),
            "Back".to_string(),
        ]
    }

    fn change(&mut self, forward: bool) -> SettingsAction {
        match self.selected {
            0 => self.settings.input_mode = self.settings.input_mode.cycle(forward),
            1 => self.settings.auto_move_to_foundation = !self.settings.auto_move_to_foundation,
            _ => return SettingsAction::None,
        }
        SettingsAction::Changed
    }

    pub fn handle_key(&mut self, key: Key) -> SettingsAction {
        match key {
            Key::Up => self.selected = (self.selected + SETTINGS_ITEMS - 1) % SETTINGS_ITEMS,
            Key::Down => self.selected = (self.selected + 1) % SETTINGS_ITEMS,
            Key::Left => return self.change(false),
            Key::Right => return self.change(true),
            Key::Enter if self.selected == SETTINGS_ITEMS - 1 => return SettingsAction::Close,
            Key::Enter => return self.change(true),
            Key::Esc => return SettingsAction::Close,
            _ => {}
        }
        SettingsAction::None
    }

    pub fn frame(&self, message: Option<&str>) -> Frame {
        let subtitle = vec!["Settings".to_string(), "Left/Right: change   Enter on Back or Esc: return".to_string()];
        render_menu(&subtitle, &self.labels(), self.selected, message)
    }
}

/// 設定画面を開く。変わるたびにファイルへ保存して、最後の設定を返す。
pub fn run_settings_menu(
    screen: &mut dyn Screen,
    store: &SettingsStore,
    settings: GameSettings,
) -> Result<GameSettings> {
    let mut menu = SettingsMenu::new(settings);
    let mut message: Option<String> = None;
    loop {
        screen.draw(&menu.frame(message.as_deref()))?;
        match menu.handle_key(screen.read_key()?) {
            SettingsAction::None => {}
            SettingsAction::Changed => {
                info!("設定変更: {:?}", menu.settings());
                message = store.save(&menu.settings()).err().map(|err| {
                    warn!("設定を保存できなかった: {}", err);
                    format!("Could not save settings: {}", err)
                });
            }
            SettingsAction::Close => return Ok(menu.settings()),
        }
    }
}

// --- ハイスコアとクリア画面 ---

/// ハイスコア一覧を出して、何かキーが押されるまで待つ。
pub fn show_high_scores(screen: &mut dyn Screen, table: &HighScoreTable) -> Result<()> {
    screen.draw(&render_high_scores(&table.display_lines()))?;
    screen.read_key()?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinChoice {
    ShowHighScores,
    MainMenu,
    Quit,
}

fn win_frame(moves: u32) -> Frame {
    let mut frame = Frame::new();
    let congratulations = format!("Congratulations! You solved it in {} moves!", moves);
    let padding = SCREEN_WIDTH.saturating_sub(congratulations.chars().count()) / 2;
    frame.push(Line::new().with(format!("{}{}", " ".repeat(padding), congratulations), Tint::Title));
    frame.push(Line::plain(format!("Enter your initials to save the score (max {} characters):", MAX_INITIALS)));
    frame
}

/// クリア画面: イニシャルを聞いてスコアを保存し、次にどうするか選んでもらう。
pub fn run_win_screen(screen: &mut dyn Screen, table: &mut HighScoreTable, moves: u32) -> Result<WinChoice> {
    screen.draw(&win_frame(moves))?;
    let initials = screen.read_line("> ")?.unwrap_or_default();
    let message = table.add(&initials, moves).err().map(|err| {
        warn!("ハイスコアを保存できなかった: {}", err);
        format!("Could not save the score: {}", err)
    });

    let mut menu = Menu::new(
        vec![format!("You won in {} moves.", moves)],
        vec![
            ("Show high scores".to_string(), WinChoice::ShowHighScores),
            ("Main menu".to_string(), WinChoice::MainMenu),
            ("Quit".to_string(), WinChoice::Quit),
        ],
    );
    Ok(menu.run(screen, message.as_deref())?.unwrap_or(WinChoice::MainMenu))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::screen::ScriptedScreen;
    use crate::config::settings::InputMode;
    use std::fs;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("klondike-{}-{}", std::process::id(), name));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn menu_wraps_around() {
        let mut menu = Menu::new(vec![], vec![("a".to_string(), 1), ("b".to_string(), 2), ("c".to_string(), 3)]);
        assert_eq!(menu.handle_key(Key::Up), None);
        assert_eq!(menu.selected(), 2);
        assert_eq!(menu.handle_key(Key::Down), None);
        assert_eq!(menu.selected(), 0);
        menu.handle_key(Key::Down);
        assert_eq!(menu.handle_key(Key::Enter), Some(2));
    }

    #[test]
    fn menu_run_and_escape() {
        let mut menu = Menu::new(vec![], vec![("a".to_string(), 'a'), ("b".to_string(), 'b')]);
        let mut screen = ScriptedScreen::new(&[Key::Down, Key::Enter], &[]);
        assert_eq!(menu.run(&mut screen, None).unwrap(), Some('b'));
        assert!(screen.last_text().contains("> b"));

        let mut screen = ScriptedScreen::new(&[Key::Esc], &[]);
        assert_eq!(menu.run(&mut screen, None).unwrap(), None);
    }

    #[test]
    fn settings_menu_changes_values() {
        let mut menu = SettingsMenu::new(GameSettings::default());
        assert_eq!(menu.handle_key(Key::Right), SettingsAction::Changed);
        assert_eq!(menu.settings().input_mode, InputMode::Text);
        assert_eq!(menu.handle_key(Key::Down), SettingsAction::None);
        assert_eq!(menu.handle_key(Key::Left), SettingsAction::Changed);
        assert!(menu.settings().auto_move_to_foundation);
        assert_eq!(menu.handle_key(Key::Down), SettingsAction::None);
        assert_eq!(menu.handle_key(Key::Left), SettingsAction::None, "Back は値を持たない");
        assert_eq!(menu.handle_key(Key::Enter), SettingsAction::Close);
        assert_eq!(menu.handle_key(Key::Down), SettingsAction::None);
        assert_eq!(menu.handle_key(Key::Esc), SettingsAction::Close);
    }

    #[test]
    fn settings_are_saved_on_change() {
        let store = SettingsStore::new(temp_path("menu-settings.json"));
        let mut screen = ScriptedScreen::new(&[Key::Down, Key::Enter, Key::Up, Key::Up, Key::Enter], &[]);
        let settings = run_settings_menu(&mut screen, &store, GameSettings::default()).unwrap();
        assert!(settings.auto_move_to_foundation);
        assert_eq!(store.load().unwrap(), settings);
        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn win_screen_records_the_score() {
        let path = temp_path("win-scores.txt");
        let mut table = HighScoreTable::empty(&path);
        let mut screen = ScriptedScreen::new(&[Key::Down, Key::Down, Key::Enter], &[Some("ab")]);
        let choice = run_win_screen(&mut screen, &mut table, 87).unwrap();
        assert_eq!(choice, WinChoice::Quit);
        assert_eq!(table.display_lines(), vec!["1. AB      : 87".to_string()]);
        assert!(screen.frames[0].to_plain_text().contains("87 moves"));
        let _ = fs::remove_file(&path);
    }
}
