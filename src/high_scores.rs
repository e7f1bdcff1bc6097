// src/high_scores.rs
//! ハイスコア表だよ！🏆 テキストファイルに `イニシャル,手数` を 1 行ずつ保存する。
//!
//! 手数は少ないほうがエライので、昇順に並べておく。
//! スコアを追加したらファイルを丸ごと書き直すよ。

use log::{info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 保存先のファイル名 (カレントディレクトリから)
pub const HIGH_SCORES_FILE: &str = "highscores.txt";
/// 何も入力されなかった時のイニシャル
pub const DEFAULT_INITIALS: &str = "XYZ";
pub const MAX_INITIALS: usize = 3;

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("could not read high scores from {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write high scores to {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScore {
    pub initials: String,
    pub moves: u32,
}

impl HighScore {
    /// `INITIALS,MOVES` の 1 行を読む。形がおかしければ None。
    fn parse(line: &str) -> Option<HighScore> {
        let (initials, moves) = line.split_once(',')?;
        if moves.contains(',') {
            return None;
        }
        let moves = moves.trim().parse().ok()?;
        Some(HighScore { initials: initials.trim().to_string(), moves })
    }
}

/// 前後の空白を取って、先頭 3 文字を大文字にする。
pub fn normalize_initials(raw: &str) -> String {
    let initials: String = raw.trim().chars().take(MAX_INITIALS).collect::<String>().to_uppercase();
    if initials.is_empty() {
        DEFAULT_INITIALS.to_string()
    } else {
        initials
    }
}

#[derive(Debug, Clone)]
pub struct HighScoreTable {
    path: PathBuf,
    scores: Vec<HighScore>,
}

impl HighScoreTable {
    /// ファイルを読み込む。ファイルが無ければ空の表、壊れた行は読み飛ばす。
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HighScoreError> {
        let path = path.as_ref().to_path_buf();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
            Err(source) => return Err(HighScoreError::Read { path, source }),
        };

        let mut scores = Vec::new();
        for line in contents.lines().filter(|line| !line.trim().is_empty()) {
            match HighScore::parse(line) {
                Some(score) => scores.push(score),
                None => warn!("壊れたハイスコア行を読み飛ばす: {:?}", line),
            }
        }
        scores.sort_by_key(|score| score.moves);
        Ok(Self { path, scores })
    }

    /// 空の表。最初の `add` で `path` に書き出される。
    pub fn empty(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf(), scores: Vec::new() }
    }

    pub fn scores(&self) -> &[HighScore] {
        &self.scores
    }

    /// クリアしたゲームを記録して、ファイルを書き直す。
    pub fn add(&mut self, initials: &str, moves: u32) -> Result<(), HighScoreError> {
        let score = HighScore { initials: normalize_initials(initials), moves };
        info!("ハイスコア登録: {},{}", score.initials, score.moves);
        // 同じ手数なら先に登録したほうが上
        let position = self.scores.partition_point(|existing| existing.moves <= moves);
        self.scores.insert(position, score);
        self.save()
    }

    fn save(&self) -> Result<(), HighScoreError> {
        let contents: String = self
            .scores
            .iter()
            .map(|score| format!("{},{}\n", score.initials, score.moves))
            .collect();
        fs::write(&self.path, contents).map_err(|source| HighScoreError::Write { path: self.path.clone(), source })
    }

    /// ハイスコア画面にそのまま出せる行
    pub fn display_lines(&self) -> Vec<String> {
        if self.scores.is_empty() {
            return vec!["No high scores yet".to_string()];
        }
        self.scores
            .iter()
            .enumerate()
            .map(|(i, score)| format!("{}. {:<8}: {}", i + 1, score.initials, score.moves))
            .collect()
    }
}
