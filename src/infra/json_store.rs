use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::model::book::Book;
use crate::domain::repository::ShelfRepository;

/// 永続化スロットの固定キー。ファイル名は `<key>.json`。
pub const STORAGE_KEY: &str = "books";

#[derive(Debug, thiserror::Error)]
pub enum JsonStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSONファイルによるShelfRepository実装。
/// 1 スロット = 1 JSONファイル（Bookの配列）。
pub struct JsonShelfRepository {
    path: PathBuf,
}

impl JsonShelfRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// データディレクトリ配下の固定キーのスロットを使う。
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(format!("{STORAGE_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ShelfRepository for JsonShelfRepository {
    type Error = JsonStoreError;

    fn load(&self) -> Result<Vec<Book>, Self::Error> {
        let content = match std::fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        // 壊れたデータは「データ無し」として扱い、起動は続行する
        match serde_json::from_slice::<Vec<Book>>(&content) {
            Ok(books) => Ok(books),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "discarding malformed shelf data"
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, books: &[Book]) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string(books)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, &content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
