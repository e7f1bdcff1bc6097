// src/app/command.rs
//! テキスト入力モードのコマンドを読み取るパーサーだよ！⌨️
//!
//! `draw|d`, `move|m <src> <dst> [count]`, `move|m <src>`, `undo|u`,
//! `score|h`, `restart|r`, `quit|q` を受け付ける。大文字小文字は区別しない。
//! パイルの書き方は `W`, `F1`..`F4`, `T1`..`T7` (1 始まり)。

use crate::components::stack::StackType;
use thiserror::Error;

/// 1 行ぶんの入力から作られるコマンド。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Draw,
    Move { source: StackType, dest: StackType, count: usize },
    /// 移動先を書かなかった `move` (自動で組札へ)
    AutoMoveToFoundation { source: StackType },
    Undo,
    ShowHighScores,
    Restart,
    Quit,
}

pub const MOVE_USAGE: &str = "Usage: move <source> <dest> [count]. Sources: W, F1-F4, T1-T7. Destinations: F1-F4, T1-T7.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Type a command (draw, move, undo, score, restart, quit)")]
    Empty,
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Unknown pile: {0}")]
    UnknownPile(String),
    #[error("Invalid card count: {0} (must be a positive whole number)")]
    InvalidCount(String),
    #[error("{0}")]
    Usage(&'static str),
}

fn parse_pile(token: &str) -> Result<StackType, CommandError> {
    StackType::parse_token(token).ok_or_else(|| CommandError::UnknownPile(token.to_uppercase()))
}

/// 入力 1 行をコマンドに変換する。
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let lowered = line.trim().to_lowercase();
    let parts: Vec<&str> = lowered.split_whitespace().collect();
    let Some((&name, args)) = parts.split_first() else {
        return Err(CommandError::Empty);
    };

    match (name, args) {
        ("draw" | "d", []) => Ok(Command::Draw),
        ("undo" | "u", []) => Ok(Command::Undo),
        ("score" | "h", []) => Ok(Command::ShowHighScores),
        ("restart" | "r", []) => Ok(Command::Restart),
        ("quit" | "q", []) => Ok(Command::Quit),
        ("move" | "m", [source]) => Ok(Command::AutoMoveToFoundation { source: parse_pile(source)? }),
        ("move" | "m", [source, dest]) => {
            Ok(Command::Move { source: parse_pile(source)?, dest: parse_pile(dest)?, count: 1 })
        }
        ("move" | "m", [source, dest, count]) => {
            let source = parse_pile(source)?;
            let dest = parse_pile(dest)?;
            let count = count
                .parse::<usize>()
                .ok()
                .filter(|&count| count >= 1)
                .ok_or_else(|| CommandError::InvalidCount(count.to_string()))?;
            Ok(Command::Move { source, dest, count })
        }
        ("move" | "m", _) => Err(CommandError::Usage(MOVE_USAGE)),
        ("draw" | "d" | "undo" | "u" | "score" | "h" | "restart" | "r" | "quit" | "q", _) => {
            Err(CommandError::Usage("This command takes no arguments"))
        }
        (other, _) => Err(CommandError::Unknown(other.to_string())),
    }
}
