// src/components/game_state.rs

// serde を使う宣言！設定ファイルやログに出すかも！
use serde::{Serialize, Deserialize};

/// 難易度だよ！山札から一度に何枚めくるかが変わる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// 1 枚ずつめくる
    Easy,
    /// 3 枚ずつめくる
    Hard,
}

impl Difficulty {
    /// 山札から一度に引く枚数。
    pub fn draw_count(self) -> usize {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Hard => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Hard => "Hard",
        }
    }
}

/// ゲーム全体の現在の状態を表す列挙型だよ！
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// ゲームが進行中の状態
    Playing,
    /// 勝利！🏆 4 つの組札が全部 K まで積み上がった！
    Won,
}

/// 1 回のプレイ (ゲームループ) が終わったときに、次に何をするかを表すよ。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// まだ続ける
    Continue,
    /// 勝ったので勝利画面へ
    ShowWinScreen,
    /// 同じ難易度で配り直す
    Restart,
    /// メインメニューに戻る
    Quit,
}
