//! Folder Provisioning
//!
//! スプレッドシートと同じ親フォルダ直下にある出力先フォルダを探し、
//! 無ければ作成する。名前の比較は完全一致。
//! 検索と作成はアトミックではないため、同時に実行すると同名フォルダが
//! 2つ作られる可能性がある。

use tracing::{debug, info};

use crate::error::{FolderError, SheetToDocError};
use crate::services::FolderStore;
use crate::types::{FileId, Folder};

/// 出力先フォルダを解決する
///
/// # 戻り値
///
/// * `Ok(Folder)` - 既存または新規作成したフォルダ
/// * `Err(SheetToDocError::FolderResolution)` - 親が無い、またはストア操作に失敗した場合
pub(crate) fn resolve_target_folder(
    folders: &mut dyn FolderStore,
    spreadsheet: &FileId,
    name: &str,
) -> Result<Folder, SheetToDocError> {
    let parent = folders
        .parent_of(spreadsheet)
        .map_err(FolderError::from)?
        .ok_or_else(|| FolderError::NoParent(spreadsheet.to_string()))?;

    if let Some(existing) = folders
        .find_child_by_name(&parent, name)
        .map_err(FolderError::from)?
    {
        debug!(folder = %existing.id, "reusing destination folder");
        return Ok(existing);
    }

    let created = folders
        .create_child(&parent, name)
        .map_err(FolderError::from)?;
    info!(folder = %created.id, parent = %parent, "created destination folder");
    Ok(created)
}
