// src/config/layout.rs
//! ターミナル画面のレイアウトに関する定数を定義するよ！
//! 単位は全部「文字数」と「行数」。

/// 画面の幅。タイトルやメニューはこの幅で中央寄せする。
pub const SCREEN_WIDTH: usize = 83;

/// カード 1 枚ぶんの表示幅 ("10♥" + 余白)
pub const CARD_CELL_WIDTH: usize = 5;
/// 場札の列と列の間の幅
pub const TABLEAU_COLUMN_WIDTH: usize = 6;

/// 上段 (Stock, Waste, Foundation) のラベル
pub const STOCK_LABEL: &str = "Stock";
pub const WASTE_LABEL: &str = "Waste";
pub const FOUNDATION_LABEL: &str = "Foundations";

/// 区切り線に使う文字
pub const SEPARATOR: char = '-';

/// 選択中のメニュー項目につける印
pub const MENU_MARKER: &str = "> ";

/// メニューの上に出すタイトル
pub const GAME_TITLE: [&str; 5] = [
    r" _  ___                 _ _ _        ",
    r"| |/ / | ___  _ __   __| (_) | _____ ",
    r"| ' /| |/ _ \| '_ \ / _` | | |/ / _ \",
    r"| . \| | (_) | | | | (_| | |   <  __/",
    r"|_|\_\_|\___/|_| |_|\__,_|_|_|\_\___|",
];
