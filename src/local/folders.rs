//! ディレクトリをフォルダとして扱うフォルダストア。

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ServiceError;
use crate::services::FolderStore;
use crate::types::{FileId, Folder, FolderId};

/// ローカルファイルシステムのフォルダストア
///
/// `FileId`と`FolderId`はどちらもパス文字列です。
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFolderStore;

impl LocalFolderStore {
    pub fn new() -> Self {
        Self
    }

    /// パスから`FileId`を生成
    pub fn file_id(path: impl AsRef<Path>) -> FileId {
        FileId(path.as_ref().to_string_lossy().into_owned())
    }
}

fn folder_of(path: PathBuf, name: String) -> Folder {
    Folder {
        id: FolderId(path.to_string_lossy().into_owned()),
        name,
    }
}

impl FolderStore for LocalFolderStore {
    fn parent_of(&self, file: &FileId) -> Result<Option<FolderId>, ServiceError> {
        let path = fs::canonicalize(&file.0)?;
        Ok(path
            .parent()
            .map(|parent| FolderId(parent.to_string_lossy().into_owned())))
    }

    fn find_child_by_name(
        &self,
        folder: &FolderId,
        name: &str,
    ) -> Result<Option<Folder>, ServiceError> {
        for entry in fs::read_dir(&folder.0)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() && entry.file_name() == name {
                return Ok(Some(folder_of(entry.path(), name.to_string())));
            }
        }
        Ok(None)
    }

    fn create_child(&mut self, folder: &FolderId, name: &str) -> Result<Folder, ServiceError> {
        let path = Path::new(&folder.0).join(name);
        fs::create_dir(&path)?;
        Ok(folder_of(path, name.to_string()))
    }
}
