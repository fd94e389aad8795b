//! Builder Module
//!
//! Fluent Builder APIを提供し、`Exporter`インスタンスを段階的に構築する。
//! `Exporter::run`が選択範囲の検証からリンク表示までのパイプラインを実行する。

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::{DateFormat, HeadingLevel};
use crate::error::SheetToDocError;
use crate::formatter::{is_valid_date_pattern, ValueNormalizer};
use crate::reader::SheetDataReader;
use crate::services::Host;
use crate::types::FileId;
use crate::writer::DocumentWriter;

/// 出力先フォルダの既定名
pub const DEFAULT_FOLDER_NAME: &str = "Sheet to Doc";

/// エクスポート処理の設定
///
/// JSONなどで保存・復元できるよう`serde`に対応しています。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// 出力先フォルダ名（スプレッドシートの親フォルダ直下）
    pub folder_name: String,

    /// ヘッダー行の番号（1始まり）
    pub header_row: u32,

    /// 見出しブロックのレベル
    pub heading_level: HeadingLevel,

    /// 日付形式
    pub date_format: DateFormat,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            folder_name: DEFAULT_FOLDER_NAME.to_string(),
            header_row: 1,
            heading_level: HeadingLevel::H2,
            date_format: DateFormat::Iso8601,
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// # 使用例
///
/// ```rust
/// use sheet2doc::{ExporterBuilder, HeadingLevel};
///
/// # fn main() -> Result<(), sheet2doc::SheetToDocError> {
/// let exporter = ExporterBuilder::new()
///     .with_folder_name("Exports")
///     .with_heading_level(HeadingLevel::H3)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ExporterBuilder {
    /// 内部設定（構築中）
    config: ExportConfig,
}

impl ExporterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 出力先フォルダ: `Sheet to Doc`
    /// - ヘッダー行: 1
    /// - 見出しレベル: H2
    /// - 日付形式: ISO 8601（ミリ秒、UTC）
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存済みの設定から開始する
    pub fn from_config(config: ExportConfig) -> Self {
        Self { config }
    }

    /// 出力先フォルダ名を指定する
    pub fn with_folder_name(mut self, name: impl Into<String>) -> Self {
        self.config.folder_name = name.into();
        self
    }

    /// ヘッダー行の番号（1始まり）を指定する
    pub fn with_header_row(mut self, row: u32) -> Self {
        self.config.header_row = row;
        self
    }

    /// 見出しブロックのレベルを指定する
    pub fn with_heading_level(mut self, level: HeadingLevel) -> Self {
        self.config.heading_level = level;
        self
    }

    /// 日付の出力形式を指定する
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.config.date_format = format;
        self
    }

    /// 設定を検証し、`Exporter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `SheetToDocError::Config(String)`: 設定の検証に失敗した場合
    ///   * フォルダ名が空、またはパス区切りを含む
    ///   * ヘッダー行が0
    ///   * カスタム日付形式が不正な書式文字列
    pub fn build(self) -> Result<Exporter, SheetToDocError> {
        // 1. フォルダ名の検証
        crate::security::validate_folder_name(&self.config.folder_name)
            .map_err(SheetToDocError::Config)?;

        // 2. ヘッダー行の検証
        if self.config.header_row == 0 {
            return Err(SheetToDocError::Config(
                "Header row is 1-based and must be at least 1".to_string(),
            ));
        }

        // 3. カスタム日付形式の検証
        if let DateFormat::Custom(ref pattern) = self.config.date_format {
            if !is_valid_date_pattern(pattern) {
                return Err(SheetToDocError::Config(format!(
                    "Invalid date format string: '{}'",
                    pattern
                )));
            }
        }

        Ok(Exporter::new(self.config))
    }
}

/// パイプラインのステージ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Selection,
    ReadEntries,
    ReadHeaders,
    Filename,
    Folder,
    Document,
}

impl Stage {
    /// アラートの接頭辞
    pub fn label(self) -> &'static str {
        match self {
            Stage::Selection => "Selection",
            Stage::ReadEntries => "Reading the selected row",
            Stage::ReadHeaders => "Reading headers",
            Stage::Filename => "Filename",
            Stage::Folder => "Destination folder",
            Stage::Document => "Writing document",
        }
    }
}

/// 行をドキュメントへ書き出す処理のファサード
///
/// # 使用例
///
/// ```rust
/// use sheet2doc::memory::*;
/// use sheet2doc::{ExporterBuilder, Host, PromptResponse, Selection};
///
/// # fn main() -> Result<(), sheet2doc::SheetToDocError> {
/// let sheet = MemorySheet::new(vec![
///     vec!["Question".into(), "Answer".into()],
///     vec!["Favorite color".into(), "Blue".into()],
/// ]);
/// let mut folders = MemoryFolderStore::new();
/// let spreadsheet = folders.add_file("root", "survey");
/// let mut documents = MemoryDocumentStore::new();
/// let mut host = Host {
///     selection: &FixedSelection(Selection::new(2, 1, 2)),
///     sheet: &sheet,
///     prompt: &mut ScriptedPrompt::new(vec![PromptResponse::ok("Test Doc")]),
///     alerts: &mut RecordingAlerts::default(),
///     folders: &mut folders,
///     documents: &mut documents,
///     display: &mut RecordingDisplay::default(),
/// };
///
/// let url = ExporterBuilder::new().build()?.run(&spreadsheet, &mut host)?;
/// assert!(!url.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Exporter {
    /// エクスポート設定
    config: ExportConfig,

    /// 値ノーマライザー
    normalizer: ValueNormalizer,
}

impl Exporter {
    pub(crate) fn new(config: ExportConfig) -> Self {
        Self {
            normalizer: ValueNormalizer::new(config.date_format.clone()),
            config,
        }
    }

    /// 現在の設定
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// 選択行をドキュメントに書き出す
    ///
    /// # 処理フロー
    ///
    /// 1. 選択範囲の検証
    /// 2. 選択行の読み取り
    /// 3. ヘッダー行の読み取り
    /// 4. ファイル名の入力
    /// 5. 出力先フォルダの解決
    /// 6. ドキュメントの書き込み
    /// 7. リンクの表示
    ///
    /// いずれかのステージが失敗した時点で、ステージ名を付けたアラートを表示して
    /// 終了します。後続のステージは実行されません。
    pub fn run(&self, spreadsheet: &FileId, host: &mut Host<'_>) -> Result<String, SheetToDocError> {
        match self.execute(spreadsheet, host) {
            Ok(url) => {
                host.display.show_link(&url);
                Ok(url)
            }
            Err((stage, error)) => {
                warn!(stage = stage.label(), "export failed: {}", error);
                host.alerts.alert(&format!("{}: {}", stage.label(), error));
                Err(error)
            }
        }
    }

    fn execute(
        &self,
        spreadsheet: &FileId,
        host: &mut Host<'_>,
    ) -> Result<String, (Stage, SheetToDocError)> {
        let at = |stage: Stage| move |error: SheetToDocError| (stage, error);

        // 1. 選択範囲の検証
        let selection = crate::selection::validate_selection(host.selection.active_selection())
            .map_err(|issue| (Stage::Selection, issue.into()))?;
        info!(row = selection.start_row, "exporting selected row");

        // 2-3. 行の読み取り
        let reader = SheetDataReader::new(host.sheet, self.config.header_row);
        let entries = reader
            .read_selected_row(&selection)
            .map_err(at(Stage::ReadEntries))?;
        let headers = reader.read_headers().map_err(at(Stage::ReadHeaders))?;

        // 4. ファイル名の入力
        let file_name = crate::prompt::prompt_filename(&mut *host.prompt, &mut *host.alerts)
            .map_err(at(Stage::Filename))?;

        // 5. 出力先フォルダ
        let folder = crate::folder::resolve_target_folder(
            &mut *host.folders,
            spreadsheet,
            &self.config.folder_name,
        )
        .map_err(at(Stage::Folder))?;

        // 6. ドキュメントの書き込み
        DocumentWriter::new(&self.normalizer, self.config.heading_level)
            .write(&mut *host.documents, &file_name, &folder, &entries, &headers)
            .map_err(at(Stage::Document))
    }
}
