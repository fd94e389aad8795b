//! Selection Validation
//!
//! アクティブな選択範囲が「ちょうど1行・1列以上」であることを確認する。

use crate::error::SelectionIssue;
use crate::types::Selection;

/// 選択範囲を検証する
///
/// # 戻り値
///
/// * `Ok(Selection)` - 1行かつ1列以上の選択範囲
/// * `Err(SelectionIssue::NoRow)` - 行数または列数が0
/// * `Err(SelectionIssue::MultipleRows)` - 2行以上が選択されている
pub fn validate_selection(selection: Selection) -> Result<Selection, SelectionIssue> {
    if selection.num_rows == 0 || selection.num_columns == 0 {
        return Err(SelectionIssue::NoRow);
    }
    if selection.num_rows > 1 {
        return Err(SelectionIssue::MultipleRows {
            rows: selection.num_rows,
        });
    }
    Ok(selection)
}
