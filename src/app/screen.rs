// src/app/screen.rs
//! 実際のターミナルとのやりとり担当だよ！🖥️
//!
//! 画面の中身は `renderer` が `Frame` として組み立てる。ここはそれを色付きで
//! 書き出すのと、キーを 1 つ (または 1 行) 読むだけ。
//! ゲーム側は `Screen` トレイト越しにしか触らないので、テストでは台本どおりに
//! キーを返す偽物の画面に差し替えられる。

use crate::app::renderer::{Frame, Tint};
use anyhow::{Context, Result};
use log::debug;
use std::io::{Stdout, Write};
use terminal::{
    Action, Clear, Color, Event, KeyCode, KeyEvent, KeyModifiers, Retrieved, Terminal, Value,
};

/// ゲームが気にするキーだけに絞ったもの。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    /// Ctrl+Enter (ターミナルによっては Ctrl+J として届く)
    CtrlEnter,
    Esc,
    Backspace,
    Char(char),
    Other,
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        match event.code {
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Enter if ctrl => Key::CtrlEnter,
            KeyCode::Enter => Key::Enter,
            KeyCode::Char('j') | KeyCode::Char('J') if ctrl => Key::CtrlEnter,
            KeyCode::Esc => Key::Esc,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Char(c) if !ctrl => Key::Char(c),
            _ => Key::Other,
        }
    }
}

/// 描画と入力の窓口。
pub trait Screen {
    /// 画面を消してフレームを丸ごと描く。
    fn draw(&mut self, frame: &Frame) -> Result<()>;
    /// キーが押されるまで待つ。
    fn read_key(&mut self) -> Result<Key>;
    /// 最後の行にプロンプトを出して 1 行読む。Esc なら None。
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// `terminal` クレートを使う本物の画面。raw モードで動くよ。
pub struct TerminalScreen {
    term: Terminal<Stdout>,
    prompt_row: u16,
}

impl TerminalScreen {
    pub fn new() -> Result<Self> {
        let term = terminal::stdout();
        term.act(Action::EnableRawMode).context("could not enable raw mode")?;
        term.act(Action::HideCursor).context("could not hide the cursor")?;
        debug!("ターミナルを raw モードにした");
        Ok(Self { term, prompt_row: 0 })
    }

    fn color_of(tint: Tint) -> Color {
        match tint {
            Tint::Plain => Color::Reset,
            Tint::Red => Color::Red,
            Tint::Black => Color::White,
            Tint::Hidden => Color::DarkGrey,
            Tint::Highlight => Color::Black,
            Tint::Dim => Color::DarkGrey,
            Tint::Error => Color::DarkRed,
            Tint::Title => Color::Green,
        }
    }

    fn write_line_text(&mut self, text: &str) -> Result<()> {
        write!(self.term, "{}", text).context("could not write to the terminal")?;
        Ok(())
    }
}

impl Screen for TerminalScreen {
    fn draw(&mut self, frame: &Frame) -> Result<()> {
        self.term.batch(Action::ClearTerminal(Clear::All))?;
        self.term.batch(Action::MoveCursorTo(0, 0))?;
        for line in frame.lines() {
            for segment in line.segments() {
                if segment.tint == Tint::Highlight {
                    self.term.batch(Action::SetBackgroundColor(Color::Grey))?;
                }
                self.term.batch(Action::SetForegroundColor(Self::color_of(segment.tint)))?;
                self.write_line_text(&segment.text)?;
                self.term.batch(Action::ResetColor)?;
            }
            // raw モードなので改行は自分で戻す
            self.write_line_text("\r\n")?;
        }
        self.prompt_row = frame.lines().len() as u16;
        self.term.flush_batch().context("could not flush the frame")?;
        self.term.flush()?;
        Ok(())
    }

    fn read_key(&mut self) -> Result<Key> {
        loop {
            if let Retrieved::Event(Some(Event::Key(event))) = self.term.get(Value::Event(None))? {
                return Ok(Key::from(event));
            }
        }
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        let mut input = String::new();
        self.term.act(Action::ShowCursor)?;
        let outcome = loop {
            self.term.batch(Action::MoveCursorTo(0, self.prompt_row))?;
            self.term.batch(Action::ClearTerminal(Clear::CurrentLine))?;
            self.write_line_text(prompt)?;
            self.write_line_text(&input)?;
            self.term.flush_batch()?;
            self.term.flush()?;

            match self.read_key()? {
                Key::Enter => break Some(input),
                Key::Esc => break None,
                Key::Backspace => {
                    input.pop();
                }
                Key::Char(c) => input.push(c),
                _ => {}
            }
        };
        self.term.act(Action::HideCursor)?;
        Ok(outcome)
    }
}

impl Drop for TerminalScreen {
    fn drop(&mut self) {
        // 終了時は元の状態に戻す。失敗しても何もできないので無視
        let _ = self.term.act(Action::ShowCursor);
        let _ = self.term.act(Action::ResetColor);
        let _ = self.term.act(Action::DisableRawMode);
        let _ = self.write_line_text("\r\n");
    }
}

/// テスト用の画面。決めておいたキーと入力行を順番に返して、描いたフレームを溜めておく。
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedScreen {
    pub keys: std::collections::VecDeque<Key>,
    pub lines: std::collections::VecDeque<Option<String>>,
    pub frames: Vec<Frame>,
}

#[cfg(test)]
impl ScriptedScreen {
    pub fn new(keys: &[Key], lines: &[Option<&str>]) -> Self {
        Self {
            keys: keys.iter().copied().collect(),
            lines: lines.iter().map(|line| line.map(str::to_string)).collect(),
            frames: Vec::new(),
        }
    }

    pub fn last_text(&self) -> String {
        self.frames.last().map(Frame::to_plain_text).unwrap_or_default()
    }
}

#[cfg(test)]
impl Screen for ScriptedScreen {
    fn draw(&mut self, frame: &Frame) -> Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn read_key(&mut self) -> Result<Key> {
        self.keys.pop_front().ok_or_else(|| anyhow::anyhow!("no more scripted keys"))
    }

    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        self.lines.pop_front().ok_or_else(|| anyhow::anyhow!("no more scripted lines"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent { code, modifiers }
    }

    #[test]
    fn key_mapping() {
        assert_eq!(Key::from(event(KeyCode::Up, KeyModifiers::empty())), Key::Up);
        assert_eq!(Key::from(event(KeyCode::Enter, KeyModifiers::empty())), Key::Enter);
        assert_eq!(Key::from(event(KeyCode::Enter, KeyModifiers::CONTROL)), Key::CtrlEnter);
        assert_eq!(Key::from(event(KeyCode::Char('j'), KeyModifiers::CONTROL)), Key::CtrlEnter);
        assert_eq!(Key::from(event(KeyCode::Char('u'), KeyModifiers::empty())), Key::Char('u'));
        assert_eq!(Key::from(event(KeyCode::Char('c'), KeyModifiers::CONTROL)), Key::Other);
        assert_eq!(Key::from(event(KeyCode::Tab, KeyModifiers::empty())), Key::Other);
    }
}
