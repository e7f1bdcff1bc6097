// src/logic/error.rs
//! カード移動で起こりうるエラーをまとめた型だよ。
//!
//! どれもゲームを止めるほどのものじゃなくて、プレイヤーにメッセージとして見せるだけ。
//! ただし `CriticalMismatch` だけは「内部の状態がおかしい」＝バグの印なので区別して扱う！

use thiserror::Error;

/// 移動エンジンの操作が返す Result の別名。
pub type Result<T> = std::result::Result<T, MoveError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// 存在しないパイル、または向きとして許されないパイルを指定した
    #[error("Invalid pile: {0}")]
    InvalidPile(String),
    /// 移動元にカードが無い
    #[error("Empty pile: {0}")]
    EmptyPile(String),
    /// 移動先のルールに合わない
    #[error("Invalid move: {0}")]
    InvalidMoveRule(String),
    /// 動かそうとしたカード列が正しい並びじゃない、または枚数がおかしい
    #[error("Invalid card sequence: {0}")]
    InvalidCardSequence(String),
    /// 元に戻す手が無い
    #[error("Nothing to undo")]
    NoHistory,
    /// 履歴と実際のパイルが食い違った (バグ！)
    #[error("Critical error during undo: {0}")]
    CriticalMismatch(String),
}

impl MoveError {
    /// プレイヤーのミスじゃなくて内部の不整合かどうか。
    pub fn is_critical(&self) -> bool {
        matches!(self, MoveError::CriticalMismatch(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_readable() {
        assert_eq!(MoveError::NoHistory.to_string(), "Nothing to undo");
        assert_eq!(
            MoveError::InvalidMoveRule("K only on empty column".into()).to_string(),
            "Invalid move: K only on empty column"
        );
    }

    #[test]
    fn only_mismatch_is_critical() {
        assert!(MoveError::CriticalMismatch("x".into()).is_critical());
        assert!(!MoveError::EmptyPile("x".into()).is_critical());
        assert!(!MoveError::NoHistory.is_critical());
    }
}
