//! Workbook Sheet
//!
//! calamineのラッパーとして、ワークブック内の1シートを読み取ります。

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;
use tracing::debug;

use crate::api::SheetSelector;
use crate::error::{ServiceError, SheetToDocError};
use crate::security::SecurityConfig;
use crate::services::SheetReader;
use crate::types::CellValue;

/// ワークブック内の1シート
///
/// XLSX / XLS / XLSB / ODS に対応します（calamineの自動判別）。
#[derive(Debug, Clone)]
pub struct WorkbookSheet {
    /// シート名
    name: String,
    /// 使用範囲のセルデータ
    range: Range<Data>,
}

impl WorkbookSheet {
    /// ワークブックを開き、シートを選択する
    ///
    /// # 引数
    ///
    /// * `reader` - ワークブックを読み込むためのリーダー（Read + Seekトレイトを実装）
    /// * `selector` - アクティブシートとして扱うシート
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookSheet)` - シートの読み込みに成功した場合
    /// * `Err(SheetToDocError::Parse)` - ワークブックの解析に失敗した場合
    /// * `Err(SheetToDocError::Config)` - シートが見つからない、またはサイズ上限を超えた場合
    pub fn open<R: Read + Seek>(
        reader: R,
        selector: &SheetSelector,
    ) -> Result<Self, SheetToDocError> {
        Self::open_with_config(reader, selector, &SecurityConfig::default())
    }

    /// サイズ上限を指定してワークブックを開く
    pub(crate) fn open_with_config<R: Read + Seek>(
        mut reader: R,
        selector: &SheetSelector,
        security_config: &SecurityConfig,
    ) -> Result<Self, SheetToDocError> {
        let limit = security_config.max_input_file_size;

        // 上限+1バイトまでしか読み込まない
        let mut buffer = Vec::new();
        let bytes_read = reader
            .by_ref()
            .take(limit.saturating_add(1))
            .read_to_end(&mut buffer)?;
        if bytes_read as u64 > limit {
            return Err(SheetToDocError::Config(format!(
                "Input file size exceeds maximum: more than {} bytes",
                limit
            )));
        }

        let mut workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        let name = select_sheet(&workbook.sheet_names(), selector)?;
        let range = workbook.worksheet_range(&name)?;
        debug!(sheet = %name, dims = ?range.get_size(), "opened worksheet");

        Ok(Self { name, range })
    }

    /// パスからワークブックを開く
    pub fn open_path(
        path: impl AsRef<Path>,
        selector: &SheetSelector,
    ) -> Result<Self, SheetToDocError> {
        let file = File::open(path)?;
        Self::open(BufReader::new(file), selector)
    }

    /// 選択されたシート名
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl SheetReader for WorkbookSheet {
    fn read_row(
        &self,
        row: u32,
        from_col: u32,
        num_cols: u32,
    ) -> Result<Vec<CellValue>, ServiceError> {
        if row == 0 || from_col == 0 {
            return Err(ServiceError::Message(format!(
                "rows and columns start at 1 (got row {}, column {})",
                row, from_col
            )));
        }

        let row_idx = row - 1;
        Ok((from_col - 1..from_col - 1 + num_cols)
            .map(|col_idx| {
                // 使用範囲外のセルは空セル
                self.range
                    .get_value((row_idx, col_idx))
                    .map(convert_cell)
                    .unwrap_or(CellValue::Empty)
            })
            .collect())
    }

    fn last_populated_column(&self) -> u32 {
        self.range.end().map(|(_, col)| col + 1).unwrap_or(0)
    }
}

/// シート選択方式に基づいてシート名を決定
fn select_sheet(names: &[String], selector: &SheetSelector) -> Result<String, SheetToDocError> {
    match selector {
        SheetSelector::First => names
            .first()
            .cloned()
            .ok_or_else(|| SheetToDocError::Config("Workbook has no sheets".to_string())),
        SheetSelector::Index(index) => names.get(*index).cloned().ok_or_else(|| {
            SheetToDocError::Config(format!(
                "Sheet index {} is out of range (total: {})",
                index,
                names.len()
            ))
        }),
        SheetSelector::Name(name) => {
            if names.contains(name) {
                Ok(name.clone())
            } else {
                Err(SheetToDocError::Config(format!("Sheet '{}' not found", name)))
            }
        }
    }
}

/// calamineのセルデータを変換
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => CellValue::DateTime(naive.and_utc()),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::String(s.clone())),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
    }
}

/// ISO 8601形式の日付・日時文字列を解析（タイムゾーンなしはUTCとみなす）
fn parse_iso_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}


// 実際のワークブックを使ったテストは統合テスト（tests/）で実装します。
