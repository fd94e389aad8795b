//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// 外部コラボレーター（シート、フォルダ、ドキュメントストア）が返すエラー
///
/// 各ステージはこのエラーを受け取り、`SheetToDocError`の該当バリアントに
/// 包んで呼び出し元へ返します。
#[derive(Error, Debug)]
pub enum ServiceError {
    /// I/O操作中に発生したエラー
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// スプレッドシートの解析中に発生したエラー（calamine由来）
    #[error("Failed to parse spreadsheet: {0}")]
    Parse(#[from] calamine::Error),

    /// 指定された識別子の対象が存在しない
    #[error("Not found: {0}")]
    NotFound(String),

    /// コラボレーターがサポートしない操作
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// その他のコラボレーター固有のエラー
    #[error("{0}")]
    Message(String),
}

/// 選択範囲の形状に関する問題
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionIssue {
    /// 行または列が選択されていない
    NoRow,

    /// 複数行が選択されている
    MultipleRows {
        /// 選択された行数
        rows: u32,
    },
}

impl std::fmt::Display for SelectionIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionIssue::NoRow => write!(f, "Please select a row."),
            SelectionIssue::MultipleRows { .. } => {
                write!(f, "Please select only one row at a time.")
            }
        }
    }
}

/// 出力先フォルダの解決に失敗したエラー
#[derive(Error, Debug)]
pub enum FolderError {
    /// スプレッドシートのファイルに親フォルダが存在しない
    #[error("file '{0}' has no parent folder")]
    NoParent(String),

    /// フォルダストアの操作に失敗した
    #[error(transparent)]
    Store(#[from] ServiceError),
}

/// sheet2docクレート全体で使用するエラー型
///
/// パイプラインの各ステージが返す失敗を統一的に扱います。
/// `Display`の出力はそのままユーザー向けのアラート本文として使われます。
///
/// # エラーの種類
///
/// - `SelectionInvalid`: 選択範囲が1行でない
/// - `NoHeaders` / `Read`: シートの読み込み失敗
/// - `PromptCancelled` / `PromptDismissed` / `PromptEmpty`: ファイル名入力の中断
/// - `FolderResolution`: 出力先フォルダの解決失敗
/// - `MissingHeader` / `MissingValue` / `DocumentWrite`: ドキュメント書き込み失敗
/// - `Config`: ビルダー設定の検証失敗
///
/// # 使用例
///
/// ```rust
/// use sheet2doc::SheetToDocError;
///
/// let error = SheetToDocError::MissingValue { index: 2 };
/// assert_eq!(error.to_string(), "Missing value at column index 2");
/// ```
#[derive(Error, Debug)]
pub enum SheetToDocError {
    /// 選択範囲の形状が不正
    #[error("{0}")]
    SelectionInvalid(SelectionIssue),

    /// ヘッダー行が空
    #[error("No headers found in the header row.")]
    NoHeaders,

    /// シートの読み込みに失敗した
    #[error("Failed to read row {row}: {source}")]
    Read {
        /// 読み込み対象の行（1始まり）
        row: u32,
        /// 元のエラー
        #[source]
        source: ServiceError,
    },

    /// ファイル名入力でキャンセルが押された
    #[error("Export cancelled.")]
    PromptCancelled,

    /// ファイル名入力がボタンを押さずに閉じられた
    #[error("The filename dialog was closed without a choice.")]
    PromptDismissed,

    /// ファイル名が空のままOKが押された
    #[error("A filename is required.")]
    PromptEmpty,

    /// 出力先フォルダの解決に失敗した
    #[error("Could not resolve the destination folder: {0}")]
    FolderResolution(#[from] FolderError),

    /// ヘッダーが未定義の列が存在する
    #[error("Missing header at column index {index}")]
    MissingHeader {
        /// 0始まりの列インデックス
        index: usize,
    },

    /// 値が未定義の列が存在する
    #[error("Missing value at column index {index}")]
    MissingValue {
        /// 0始まりの列インデックス
        index: usize,
    },

    /// ドキュメントの作成・追記・移動・確定に失敗した
    #[error("Failed to write document: {0}")]
    DocumentWrite(#[source] ServiceError),

    /// 設定の検証に失敗したエラー
    ///
    /// `ExporterBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O操作中に発生したエラー
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// スプレッドシートの解析中に発生したエラー
    #[error("Failed to parse spreadsheet: {0}")]
    Parse(#[from] calamine::Error),
}

impl From<SelectionIssue> for SheetToDocError {
    fn from(issue: SelectionIssue) -> Self {
        SheetToDocError::SelectionInvalid(issue)
    }
}
