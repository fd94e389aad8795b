//! Sheet Data Reader
//!
//! 検証済みの選択範囲からヘッダー行とデータ行を読み取る。
//! 列の範囲は選択範囲の幅ではなく、シート全体で値が入っている列数で決まる。

use tracing::debug;

use crate::error::{ServiceError, SheetToDocError};
use crate::services::SheetReader;
use crate::types::{CellValue, Selection};

/// ヘッダー行とデータ行の読み取り
pub(crate) struct SheetDataReader<'a> {
    sheet: &'a dyn SheetReader,
    header_row: u32,
}

impl<'a> SheetDataReader<'a> {
    pub fn new(sheet: &'a dyn SheetReader, header_row: u32) -> Self {
        Self { sheet, header_row }
    }

    /// ヘッダー行を読み取る
    ///
    /// # 戻り値
    ///
    /// * `Err(SheetToDocError::NoHeaders)` - 読み取り結果が空の場合
    /// * `Err(SheetToDocError::Read)` - 読み取りに失敗した場合
    pub fn read_headers(&self) -> Result<Vec<CellValue>, SheetToDocError> {
        let width = self.sheet.last_populated_column();
        if width == 0 {
            return Err(SheetToDocError::NoHeaders);
        }

        let headers = self
            .sheet
            .read_row(self.header_row, 1, width)
            .map_err(|source| SheetToDocError::Read {
                row: self.header_row,
                source,
            })?;

        if headers.is_empty() {
            return Err(SheetToDocError::NoHeaders);
        }

        debug!(row = self.header_row, width = headers.len(), "read header row");
        Ok(headers)
    }

    /// 選択範囲の先頭行をシートの全幅で読み取る
    pub fn read_selected_row(&self, selection: &Selection) -> Result<Vec<CellValue>, SheetToDocError> {
        let row = selection.start_row;
        let width = self.sheet.last_populated_column();
        if width == 0 {
            return Err(SheetToDocError::Read {
                row,
                source: ServiceError::Message("the sheet has no populated columns".to_string()),
            });
        }

        let entries = self
            .sheet
            .read_row(row, 1, width)
            .map_err(|source| SheetToDocError::Read { row, source })?;

        debug!(row, width = entries.len(), "read selected row");
        Ok(entries)
    }
}
