// src/main.rs
// ここから始まるよ！ロガーを用意して、ターミナルを準備して、アプリを回すだけ。

use anyhow::{Context, Result};
use klondike_console::app::{App, TerminalScreen};
use klondike_console::config::settings::{SettingsStore, SETTINGS_FILE};
use klondike_console::high_scores::HIGH_SCORES_FILE;
use klondike_console::logger;
use log::{error, info};

fn main() -> Result<()> {
    logger::init().context("could not install the logger")?;
    info!("klondike {} 起動", env!("CARGO_PKG_VERSION"));

    let screen = TerminalScreen::new()?;
    let mut app = App::new(screen, SettingsStore::new(SETTINGS_FILE), HIGH_SCORES_FILE);
    let outcome = app.run();
    // 画面を元に戻してからエラーを出す
    drop(app);

    if let Err(err) = &outcome {
        error!("異常終了: {:#}", err);
    }
    println!("Thanks for playing!");
    outcome
}
