//! Collaborator Contracts
//!
//! ホスト環境（UI、スプレッドシート、フォルダ、ドキュメントの各ストレージ）への
//! 依存をトレイトとして定義するモジュール。エンジンはこれらのトレイトにのみ依存し、
//! 具体的な実装は呼び出し側から注入されます。

use crate::api::HeadingLevel;
use crate::error::ServiceError;
use crate::types::{CellValue, DocumentId, FileId, Folder, FolderId, PromptResponse, Selection};

/// アクティブな選択範囲の取得元
pub trait SelectionSource {
    /// 現在の選択範囲を返す
    fn active_selection(&self) -> Selection;
}

/// シートの読み取り
///
/// 行・列の番号はすべて1始まりです。
pub trait SheetReader {
    /// `row`行目の`from_col`列目から`num_cols`列分の値を読み取る
    fn read_row(&self, row: u32, from_col: u32, num_cols: u32)
        -> Result<Vec<CellValue>, ServiceError>;

    /// 値が入っている最後の列番号（空のシートでは0）
    fn last_populated_column(&self) -> u32;
}

/// 1行テキスト入力ダイアログ
pub trait PromptService {
    /// ダイアログを表示し、ユーザーの応答を待つ
    fn prompt_text(&mut self, title: &str, placeholder: &str) -> PromptResponse;
}

/// アラート表示
pub trait AlertService {
    /// メッセージを表示し、閉じられるまで待つ
    fn alert(&mut self, message: &str);
}

/// 階層型フォルダストア
pub trait FolderStore {
    /// ファイルの直接の親フォルダ。親を持たない場合は`None`
    fn parent_of(&self, file: &FileId) -> Result<Option<FolderId>, ServiceError>;

    /// `folder`直下で名前が完全一致する子フォルダを探す
    fn find_child_by_name(
        &self,
        folder: &FolderId,
        name: &str,
    ) -> Result<Option<Folder>, ServiceError>;

    /// `folder`直下に子フォルダを作成する
    fn create_child(&mut self, folder: &FolderId, name: &str) -> Result<Folder, ServiceError>;
}

/// ドキュメントストア
pub trait DocumentStore {
    /// `title`という名前で新しいドキュメントを既定の場所に作成する
    fn create_document(&mut self, title: &str) -> Result<DocumentId, ServiceError>;

    /// ドキュメントのファイルを`folder`へ移動する
    fn move_to(&mut self, doc: &DocumentId, folder: &Folder) -> Result<(), ServiceError>;

    /// 見出し段落を末尾に追加する
    fn append_heading(
        &mut self,
        doc: &DocumentId,
        text: &str,
        level: HeadingLevel,
    ) -> Result<(), ServiceError>;

    /// 本文段落を末尾に追加する
    fn append_paragraph(&mut self, doc: &DocumentId, text: &str) -> Result<(), ServiceError>;

    /// 保留中の編集を確定し、開いているハンドルを解放する
    fn commit(&mut self, doc: &DocumentId) -> Result<(), ServiceError>;

    /// ドキュメントの外部アドレス
    fn url_of(&self, doc: &DocumentId) -> Result<String, ServiceError>;
}

/// 結果の表示
pub trait ResultDisplay {
    /// 生成されたドキュメントへのリンクを表示する
    fn show_link(&mut self, url: &str);
}

/// エンジンに注入するコラボレーター一式
pub struct Host<'a> {
    pub selection: &'a dyn SelectionSource,
    pub sheet: &'a dyn SheetReader,
    pub prompt: &'a mut dyn PromptService,
    pub alerts: &'a mut dyn AlertService,
    pub folders: &'a mut dyn FolderStore,
    pub documents: &'a mut dyn DocumentStore,
    pub display: &'a mut dyn ResultDisplay,
}
