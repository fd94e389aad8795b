//! Local Filesystem Collaborators
//!
//! ディレクトリをフォルダ、Markdown/HTMLファイルをドキュメントとして扱う
//! ローカル実装。

mod documents;
mod folders;

pub use documents::LocalDocumentStore;
pub use folders::LocalFolderStore;
