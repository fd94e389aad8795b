//! Document Writer
//!
//! ヘッダーと値を位置で対応付け、見出しと本文を交互に並べたドキュメントを書き出す。
//!
//! 途中で失敗しても、それまでに作成・移動・追記した内容は巻き戻さない。

use tracing::{debug, info, warn};

use crate::api::HeadingLevel;
use crate::error::SheetToDocError;
use crate::formatter::ValueNormalizer;
use crate::services::DocumentStore;
use crate::types::{Block, CellValue, Folder};

/// ドキュメントライター
#[derive(Debug)]
pub(crate) struct DocumentWriter<'a> {
    normalizer: &'a ValueNormalizer,
    heading_level: HeadingLevel,
}

impl<'a> DocumentWriter<'a> {
    pub fn new(normalizer: &'a ValueNormalizer, heading_level: HeadingLevel) -> Self {
        Self {
            normalizer,
            heading_level,
        }
    }

    /// ドキュメントを作成し、フォルダへ移動してから内容を書き込む
    ///
    /// # 処理フロー
    ///
    /// 1. `file_name`のドキュメントを既定の場所に作成
    /// 2. `folder`へ移動
    /// 3. 各列について見出し・本文を追記（未定義のヘッダー・値で中断）
    /// 4. 確定してアドレスを返す
    pub fn write(
        &self,
        documents: &mut dyn DocumentStore,
        file_name: &str,
        folder: &Folder,
        entries: &[CellValue],
        headers: &[CellValue],
    ) -> Result<String, SheetToDocError> {
        let doc = documents
            .create_document(file_name)
            .map_err(SheetToDocError::DocumentWrite)?;
        documents
            .move_to(&doc, folder)
            .map_err(SheetToDocError::DocumentWrite)?;
        debug!(doc = %doc, folder = %folder.id, "document created");

        for block in pair_blocks(self.normalizer, entries, headers) {
            let block = block.inspect_err(|e| warn!(doc = %doc, "aborting write: {}", e))?;
            let appended = match block {
                Block::Heading(text) => documents.append_heading(&doc, &text, self.heading_level),
                Block::Body(text) => documents.append_paragraph(&doc, &text),
            };
            appended.map_err(SheetToDocError::DocumentWrite)?;
        }

        documents
            .commit(&doc)
            .map_err(SheetToDocError::DocumentWrite)?;
        let url = documents
            .url_of(&doc)
            .map_err(SheetToDocError::DocumentWrite)?;
        info!(doc = %doc, url = %url, "document written");
        Ok(url)
    }
}

/// ヘッダーと値から見出し・本文ブロックを順に生成する
///
/// 未定義のヘッダーまたは値に到達した時点でエラーを1つ返し、以降は何も生成しない。
pub fn pair_blocks<'v>(
    normalizer: &'v ValueNormalizer,
    entries: &'v [CellValue],
    headers: &'v [CellValue],
) -> impl Iterator<Item = Result<Block, SheetToDocError>> + 'v {
    let mut failed = false;
    headers
        .iter()
        .enumerate()
        .flat_map(move |(index, header)| {
            let heading = if header.is_null() {
                Err(SheetToDocError::MissingHeader { index })
            } else {
                Ok(Block::Heading(normalizer.normalize(header)))
            };
            let body = match entries.get(index) {
                Some(value) if !value.is_null() => Ok(Block::Body(normalizer.normalize(value))),
                _ => Err(SheetToDocError::MissingValue { index }),
            };
            [heading, body]
        })
        .take_while(move |block| {
            if failed {
                return false;
            }
            failed = block.is_err();
            true
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryDocumentStore, MemoryFolderStore};
    use proptest::prelude::*;

    fn folder() -> Folder {
        let mut store = MemoryFolderStore::new();
        store.add_folder("root", "Sheet to Doc")
    }

    fn write(
        store: &mut MemoryDocumentStore,
        entries: &[CellValue],
        headers: &[CellValue],
    ) -> Result<String, SheetToDocError> {
        let normalizer = ValueNormalizer::default();
        DocumentWriter::new(&normalizer, HeadingLevel::H2).write(
            store,
            "Test Doc",
            &folder(),
            entries,
            headers,
        )
    }

    #[test]
    fn test_alternating_blocks() {
        let mut store = MemoryDocumentStore::new();
        let url = write(
            &mut store,
            &["Favorite color".into(), "Blue".into()],
            &["Question".into(), "Answer".into()],
        )
        .unwrap();

        assert!(!url.is_empty());
        let doc = &store.documents()[0];
        assert_eq!(doc.title, "Test Doc");
        assert!(doc.committed);
        assert_eq!(
            doc.blocks,
            vec![
                Block::Heading("Question".to_string()),
                Block::Body("Favorite color".to_string()),
                Block::Heading("Answer".to_string()),
                Block::Body("Blue".to_string()),
            ]
        );
    }

    #[test]
    fn test_extra_values_are_ignored() {
        let mut store = MemoryDocumentStore::new();
        write(
            &mut store,
            &["a".into(), "b".into(), "c".into()],
            &["H1".into()],
        )
        .unwrap();
        assert_eq!(store.documents()[0].blocks.len(), 2);
    }

    #[test]
    fn test_missing_value_stops_after_heading() {
        let mut store = MemoryDocumentStore::new();
        let result = write(
            &mut store,
            &["a".into()],
            &["H1".into(), "H2".into(), "H3".into()],
        );
        assert!(matches!(
            result,
            Err(SheetToDocError::MissingValue { index: 1 })
        ));

        let doc = &store.documents()[0];
        assert_eq!(
            doc.blocks,
            vec![
                Block::Heading("H1".to_string()),
                Block::Body("a".to_string()),
                Block::Heading("H2".to_string()),
            ]
        );
        // 部分的な状態はそのまま残る
        assert!(!doc.committed);
        assert!(doc.folder.is_some());
    }

    #[test]
    fn test_null_value_is_missing() {
        let mut store = MemoryDocumentStore::new();
        let result = write(&mut store, &[CellValue::Null], &["H1".into()]);
        assert!(matches!(
            result,
            Err(SheetToDocError::MissingValue { index: 0 })
        ));
    }

    #[test]
    fn test_missing_header() {
        let mut store = MemoryDocumentStore::new();
        let result = write(
            &mut store,
            &["a".into(), "b".into()],
            &["H1".into(), CellValue::Null],
        );
        assert!(matches!(
            result,
            Err(SheetToDocError::MissingHeader { index: 1 })
        ));
        assert_eq!(store.documents()[0].blocks.len(), 2);
    }

    #[test]
    fn test_empty_cells_are_defined() {
        let mut store = MemoryDocumentStore::new();
        write(&mut store, &[CellValue::Empty], &["H1".into()]).unwrap();
        assert_eq!(
            store.documents()[0].blocks[1],
            Block::Body(String::new())
        );
    }

    #[test]
    fn test_store_failure_is_document_write_error() {
        let mut store = MemoryDocumentStore::new().fail_after_appends(1);
        let result = write(
            &mut store,
            &["a".into(), "b".into()],
            &["H1".into(), "H2".into()],
        );
        assert!(matches!(result, Err(SheetToDocError::DocumentWrite(_))));
        assert_eq!(store.documents()[0].blocks.len(), 1);
    }

    proptest! {
        #[test]
        fn test_block_count_and_order(
            headers in proptest::collection::vec("[a-z]{1,8}", 0..20),
            extra in proptest::collection::vec("[0-9]{0,4}", 0..5),
        ) {
            let header_cells: Vec<CellValue> = headers.iter().map(|h| h.as_str().into()).collect();
            let mut entry_cells: Vec<CellValue> =
                headers.iter().map(|h| format!("v-{}", h).into()).collect();
            entry_cells.extend(extra.iter().map(|e| e.as_str().into()));

            let normalizer = ValueNormalizer::default();
            let blocks: Vec<Block> = pair_blocks(&normalizer, &entry_cells, &header_cells)
                .collect::<Result<_, _>>()
                .unwrap();

            prop_assert_eq!(blocks.len(), headers.len() * 2);
            for (i, pair) in blocks.chunks(2).enumerate() {
                prop_assert_eq!(&pair[0], &Block::Heading(headers[i].clone()));
                prop_assert_eq!(&pair[1], &Block::Body(format!("v-{}", headers[i])));
            }
        }

        #[test]
        fn test_missing_value_stops_at_index(len in 1usize..20, cut in 0usize..20) {
            let cut = cut % len;
            let headers: Vec<CellValue> = (0..len).map(|i| format!("h{}", i).into()).collect();
            let entries: Vec<CellValue> = (0..cut).map(|i| format!("v{}", i).into()).collect();

            let normalizer = ValueNormalizer::default();
            let produced: Vec<_> = pair_blocks(&normalizer, &entries, &headers).collect();

            prop_assert_eq!(produced.len(), cut * 2 + 2);
            let is_missing_at_cut = matches!(
                produced.last(),
                Some(Err(SheetToDocError::MissingValue { index })) if *index == cut
            );
            prop_assert!(is_missing_at_cut);
        }
    }
}
