// src/app/renderer.rs
//! 画面の中身を組み立てるモジュールだよ！🎨
//!
//! ここはターミナルに直接は書かない。色 (`Tint`) つきの文字列を
//! 行 (`Line`) ごとにまとめた `Frame` を返すだけ。
//! 書き出すのは `screen` の仕事なので、ここはテストで中身を直接見られる。

use crate::components::card::{Card, CardColor, Suit};
use crate::components::stack::{StackType, TABLEAU_COUNT};
use crate::config::layout::{
    CARD_CELL_WIDTH, FOUNDATION_LABEL, GAME_TITLE, MENU_MARKER, SCREEN_WIDTH, SEPARATOR, STOCK_LABEL,
    TABLEAU_COLUMN_WIDTH, WASTE_LABEL,
};
use crate::game::Game;
use crate::logic::pile::{DisplayCard, Orientation, PileDisplayInfo};

/// 文字の色づけ。実際の色は画面側が決める。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Plain,
    Red,
    Black,
    /// 裏向きのカード
    Hidden,
    /// カーソルが当たっているところ
    Highlight,
    Dim,
    Error,
    Title,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub tint: Tint,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    segments: Vec<Segment>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new().with(text, Tint::Plain)
    }

    pub fn with(mut self, text: impl Into<String>, tint: Tint) -> Self {
        self.push(text, tint);
        self
    }

    pub fn push(&mut self, text: impl Into<String>, tint: Tint) {
        self.segments.push(Segment { text: text.into(), tint });
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn text(&self) -> String {
        self.segments.iter().map(|segment| segment.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    lines: Vec<Line>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// 色を捨てて文字だけにする (テストやログ用)
    pub fn to_plain_text(&self) -> String {
        self.lines.iter().map(Line::text).collect::<Vec<_>>().join("\n")
    }
}

/// 矢印モードでどこにカーソルがあるか。テキストモードでは使わない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub pile: StackType,
    /// 場札で選んでいるカードの位置。ここから上のカードを全部光らせる。
    pub card_index: Option<usize>,
    /// 移動先を選んでいる最中なら、その列
    pub dest_tableau: Option<u8>,
}

fn divider() -> Line {
    Line::plain(SEPARATOR.to_string().repeat(SCREEN_WIDTH))
}

fn centered(text: &str) -> String {
    let width = text.chars().count();
    let padding = SCREEN_WIDTH.saturating_sub(width) / 2;
    format!("{}{}", " ".repeat(padding), text)
}

fn card_tint(card: &Card) -> Tint {
    if !card.is_face_up {
        Tint::Hidden
    } else {
        match card.color() {
            CardColor::Red => Tint::Red,
            CardColor::Black => Tint::Black,
        }
    }
}

fn suit_tint(suit: Suit) -> Tint {
    match CardColor::from_suit(suit) {
        CardColor::Red => Tint::Red,
        CardColor::Black => Tint::Black,
    }
}

/// 横並びのパイル (Stock, Waste, Foundation) を 1 行に足していく。
fn push_horizontal(line: &mut Line, info: &PileDisplayInfo, highlighted_slot: Option<usize>) {
    if info.cards.is_empty() {
        line.push("[ ]", if highlighted_slot.is_some() { Tint::Highlight } else { Tint::Dim });
        return;
    }
    for (slot, spot) in info.cards.iter().enumerate() {
        if slot > 0 {
            line.push(" ", Tint::Plain);
        }
        let lit = highlighted_slot == Some(slot);
        match spot {
            DisplayCard::Card(card) => line.push(card.to_string(), if lit { Tint::Highlight } else { card_tint(card) }),
            DisplayCard::Placeholder(suit) => {
                line.push(format!("[{}]", suit.symbol()), if lit { Tint::Highlight } else { suit_tint(*suit) })
            }
            DisplayCard::Empty => line.push("[ ]", if lit { Tint::Highlight } else { Tint::Dim }),
        }
    }
}

/// Waste の中で「いま遊べるカード」が何番目のマスに出ているか。
/// Hard では 3 枚見えていて、一番右が一番上。
pub fn playable_waste_slot(info: &PileDisplayInfo) -> Option<usize> {
    match info.visible_count {
        Some(0) | None => None,
        Some(shown) => Some(shown - 1),
    }
}

fn highlighted_slot(info: &PileDisplayInfo, selection: Option<&Selection>) -> Option<usize> {
    let selection = selection.filter(|selection| selection.pile == info.stack_type && selection.dest_tableau.is_none())?;
    match info.stack_type {
        StackType::Waste => playable_waste_slot(info),
        _ => selection.card_index.or(Some(0)),
    }
}

/// 縦並びの場札を、列ごとに行へ組み替える。
fn push_tableau(frame: &mut Frame, infos: &[&PileDisplayInfo], selection: Option<&Selection>) {
    let mut header = Line::new();
    for column in 0..TABLEAU_COUNT {
        let label = format!("T{}", column + 1);
        let is_dest = selection.and_then(|selection| selection.dest_tableau) == Some(column);
        let text = format!("{:<width$}", if is_dest { format!("v{}", label) } else { label }, width = TABLEAU_COLUMN_WIDTH);
        header.push(text, if is_dest { Tint::Highlight } else { Tint::Dim });
    }
    frame.push(header);

    let rows = infos.iter().map(|info| info.cards.len()).max().unwrap_or(0);
    for row in 0..rows {
        let mut line = Line::new();
        for info in infos {
            let lit = selection.is_some_and(|selection| {
                selection.pile == info.stack_type
                    && selection.dest_tableau.is_none()
                    && selection.card_index.is_some_and(|start| row >= start)
            });
            match info.cards.get(row) {
                Some(DisplayCard::Card(card)) => {
                    let text = format!("{:<width$}", card.to_string(), width = CARD_CELL_WIDTH);
                    line.push(text, if lit { Tint::Highlight } else { card_tint(card) });
                }
                _ => line.push(" ".repeat(CARD_CELL_WIDTH), Tint::Plain),
            }
            line.push(" ".repeat(TABLEAU_COLUMN_WIDTH - CARD_CELL_WIDTH), Tint::Plain);
        }
        frame.push(line);
    }
    if rows == 0 {
        frame.push(Line::plain(""));
    }
}

/// ゲーム画面を組み立てる。`footer` は操作のヒントなど、下に足す行。
pub fn render_game(game: &Game, selection: Option<&Selection>, footer: &[String]) -> Frame {
    let infos = game.display_infos();
    let mut frame = Frame::new();
    frame.push(Line::new().with(centered("--- Klondike ---"), Tint::Title));

    let mut top = Line::new();
    let mut tableaux = Vec::new();
    let mut foundations = Vec::new();
    for info in &infos {
        match (info.stack_type, info.orientation) {
            (StackType::Stock, _) => {
                top.push(format!("{} [S]: ", STOCK_LABEL), Tint::Plain);
                push_horizontal(&mut top, info, highlighted_slot(info, selection));
                top.push(format!(" ({})", game.board().stock.len()), Tint::Dim);
                top.push("   ", Tint::Plain);
            }
            (StackType::Waste, _) => {
                top.push(format!("{} [W]: ", WASTE_LABEL), Tint::Plain);
                push_horizontal(&mut top, info, highlighted_slot(info, selection));
                top.push("   ", Tint::Plain);
            }
            (StackType::Foundation(_), _) => foundations.push(info),
            (StackType::Tableau(_), Orientation::Vertical) => tableaux.push(info),
            (StackType::Tableau(_), Orientation::Horizontal) => {}
        }
    }
    top.push(format!("{} [F1-F4]: ", FOUNDATION_LABEL), Tint::Plain);
    for (position, info) in foundations.iter().enumerate() {
        if position > 0 {
            top.push(" ", Tint::Plain);
        }
        push_horizontal(&mut top, info, highlighted_slot(info, selection));
    }
    frame.push(top);

    frame.push(Line::plain(format!(
        "Moves: {}   Difficulty: {}   Undo available: {}",
        game.move_count(),
        game.difficulty().label(),
        game.undo_available()
    )));
    frame.push(divider());
    push_tableau(&mut frame, &tableaux, selection);
    frame.push(divider());

    match game.last_error() {
        Some(err) => frame.push(Line::new().with(err.to_string(), Tint::Error)),
        None => frame.push(Line::plain("")),
    }
    for line in footer {
        frame.push(Line::new().with(line.clone(), Tint::Dim));
    }
    frame
}

/// タイトルつきのメニュー画面。
pub fn render_menu(subtitle: &[String], options: &[String], selected: usize, message: Option<&str>) -> Frame {
    let mut frame = Frame::new();
    for row in GAME_TITLE {
        frame.push(Line::new().with(centered(row), Tint::Title));
    }
    frame.push(Line::plain(""));
    for text in subtitle {
        frame.push(Line::plain(centered(text)));
    }
    frame.push(divider());
    for (index, option) in options.iter().enumerate() {
        if index == selected {
            frame.push(Line::new().with(centered(&format!("{}{}", MENU_MARKER, option)), Tint::Highlight));
        } else {
            frame.push(Line::plain(centered(&format!("{}{}", " ".repeat(MENU_MARKER.len()), option))));
        }
    }
    frame.push(divider());
    if let Some(message) = message {
        frame.push(Line::new().with(message, Tint::Error));
    }
    frame
}

/// ハイスコア一覧の画面。
pub fn render_high_scores(lines: &[String]) -> Frame {
    let mut frame = Frame::new();
    frame.push(Line::new().with(centered("--- High scores ---"), Tint::Title));
    frame.push(divider());
    for line in lines {
        frame.push(Line::plain(centered(line)));
    }
    frame.push(divider());
    frame.push(Line::new().with("Press any key to continue...", Tint::Dim));
    frame
}
