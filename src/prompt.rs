//! Filename Prompt
//!
//! 出力ドキュメントのファイル名をユーザーに入力してもらう。

use tracing::debug;

use crate::error::SheetToDocError;
use crate::services::{AlertService, PromptService};
use crate::types::PromptButton;

const PROMPT_TITLE: &str = "Name your document";
const PROMPT_PLACEHOLDER: &str = "Enter a filename:";

/// ファイル名を入力させる
///
/// # 戻り値
///
/// * `Ok(String)` - OKが押され、入力が空でない場合（確認のアラートを表示してから返す）
/// * `Err(SheetToDocError::PromptCancelled)` - キャンセルが押された場合
/// * `Err(SheetToDocError::PromptDismissed)` - ボタンを押さずに閉じられた場合
/// * `Err(SheetToDocError::PromptEmpty)` - 入力が空のままOKが押された場合
pub(crate) fn prompt_filename(
    prompt: &mut dyn PromptService,
    alerts: &mut dyn AlertService,
) -> Result<String, SheetToDocError> {
    let response = prompt.prompt_text(PROMPT_TITLE, PROMPT_PLACEHOLDER);

    match response.button {
        PromptButton::Cancel => Err(SheetToDocError::PromptCancelled),
        PromptButton::Close => Err(SheetToDocError::PromptDismissed),
        PromptButton::Ok if response.text.is_empty() => Err(SheetToDocError::PromptEmpty),
        PromptButton::Ok => {
            debug!(filename = %response.text, "filename accepted");
            alerts.alert(&format!("The document will be named '{}'.", response.text));
            Ok(response.text)
        }
    }
}
