//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use chrono::{DateTime, Utc};
use serde::Serialize;

/// セルの値を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 文字列
    String(String),

    /// 数値（f64）
    Number(f64),

    /// 論理値
    Bool(bool),

    /// 日付・時刻（UTC）
    DateTime(DateTime<Utc>),

    /// エラー値（例: #DIV/0!）
    Error(String),

    /// 構造化された値（配列やオブジェクト）
    Structured(serde_json::Value),

    /// 空セル（定義済みだが内容なし）
    Empty,

    /// 未定義の値
    Null,
}

impl CellValue {
    /// 値が空かどうかを判定
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// 値が未定義（null）かどうかを判定
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(value: DateTime<Utc>) -> Self {
        CellValue::DateTime(value)
    }
}

/// アクティブな選択範囲（行・列は1始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// 先頭行
    pub start_row: u32,
    /// 行数
    pub num_rows: u32,
    /// 列数
    pub num_columns: u32,
}

impl Selection {
    /// 新しい選択範囲を生成
    pub fn new(start_row: u32, num_rows: u32, num_columns: u32) -> Self {
        Self {
            start_row,
            num_rows,
            num_columns,
        }
    }
}

/// ドキュメントを構成するブロック
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Block {
    /// 見出し
    Heading(String),
    /// 本文の段落
    Body(String),
}

impl Block {
    /// ブロックのテキスト
    pub fn text(&self) -> &str {
        match self {
            Block::Heading(text) | Block::Body(text) => text,
        }
    }
}

/// ファイル（スプレッドシート、ドキュメント）の識別子
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileId(pub String);

/// フォルダの識別子
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FolderId(pub String);

/// ドキュメントハンドル
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(pub String);

macro_rules! impl_id_display {
    ($($ty:ty),*) => {
        $(impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        })*
    };
}

impl_id_display!(FileId, FolderId, DocumentId);

/// フォルダ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
}

/// 入力ダイアログで押されたボタン
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptButton {
    Ok,
    Cancel,
    /// ボタンを押さずにダイアログが閉じられた
    Close,
}

/// 入力ダイアログの応答
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptResponse {
    pub button: PromptButton,
    pub text: String,
}

impl PromptResponse {
    /// OKボタンと入力テキスト
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            button: PromptButton::Ok,
            text: text.into(),
        }
    }

    /// キャンセルボタン
    pub fn cancel() -> Self {
        Self {
            button: PromptButton::Cancel,
            text: String::new(),
        }
    }

    /// ダイアログを閉じた
    pub fn close() -> Self {
        Self {
            button: PromptButton::Close,
            text: String::new(),
        }
    }
}
