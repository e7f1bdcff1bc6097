// src/logic/rules/stock_waste.rs
//! 山札 (Stock) と捨て札 (Waste) に関するルールを定義するよ。

/// ストック（山札）からウェスト（捨て札）にカードを配れるかチェックする。
pub fn can_deal_from_stock(stock_is_empty: bool) -> bool {
    !stock_is_empty
}

/// ストック（山札）が空のときに、ウェスト（捨て札）からストックにカードを戻せるかチェックする。
pub fn can_reset_stock_from_waste(stock_is_empty: bool, waste_is_empty: bool) -> bool {
    stock_is_empty && !waste_is_empty
}

/// ストックにもウェストにも、普通の移動ではカードを置けない！
/// ストックはリセットで、ウェストはドローでしか増えないよ。
pub fn can_add_to_stock_or_waste() -> bool {
    false
}
