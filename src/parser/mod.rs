//! Parser Module
//!
//! calamineを使用したワークブック読み取りの実装。
//! 選択したシートを`SheetReader`として公開します。

mod workbook;

pub use workbook::WorkbookSheet;
