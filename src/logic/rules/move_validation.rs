// src/logic/rules/move_validation.rs
//! 「どこからどこへ」動かせるか、パイルの種類だけで決まるチェックを行う。

use crate::components::stack::{StackType, FOUNDATION_COUNT, TABLEAU_COUNT};

/// インデックスが範囲内かどうか。
pub fn is_stack_in_range(stack: StackType) -> bool {
    match stack {
        StackType::Stock | StackType::Waste => true,
        StackType::Foundation(i) => i < FOUNDATION_COUNT,
        StackType::Tableau(i) => i < TABLEAU_COUNT,
    }
}

/// 移動元になれるのは Waste / Foundation / Tableau だけ。
/// Stock からは「ドロー」でしか取れないよ。
pub fn is_valid_source(stack: StackType) -> bool {
    is_stack_in_range(stack) && !matches!(stack, StackType::Stock)
}

/// 移動先になれるのは Foundation / Tableau だけ。
pub fn is_valid_destination(stack: StackType) -> bool {
    is_stack_in_range(stack) && matches!(stack, StackType::Foundation(_) | StackType::Tableau(_))
}

/// 移動元と移動先の組み合わせとして成り立つか。
/// 同じパイルへの移動と、組札から組札への移動はダメ。
pub fn is_valid_route(source: StackType, dest: StackType) -> bool {
    is_valid_source(source)
        && is_valid_destination(dest)
        && source != dest
        && !(source.is_foundation() && dest.is_foundation())
}
