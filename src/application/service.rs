use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::model::book::{Book, BookDraft};
use crate::domain::model::id::BookId;
use crate::domain::model::shelf::Bookshelf;
use crate::domain::projection::{project, Projection};
use crate::domain::repository::ShelfRepository;

use super::error::AppError;

/// 本棚に対するユースケース（Book Store）。
/// コレクションはメモリ上に保持し、変更のたびに全体を書き戻す。
/// 書き戻しに失敗した変更はメモリにも反映しない。
pub struct ShelfService<R: ShelfRepository> {
    repo: R,
    shelf: Bookshelf,
}

impl<R: ShelfRepository> ShelfService<R> {
    /// スロットから読み込んで開く。
    pub fn open(repo: R) -> Result<Self, AppError> {
        let loaded = repo.load().map_err(|e| AppError::Storage(Box::new(e)))?;
        let loaded_len = loaded.len();
        let shelf = Bookshelf::from_books(loaded);
        if shelf.len() != loaded_len {
            tracing::warn!(
                dropped = loaded_len - shelf.len(),
                "dropped books with duplicate ids"
            );
        }
        tracing::info!(books = shelf.len(), "shelf loaded");
        Ok(Self { repo, shelf })
    }

    /// 本を追加して作成したBookを返す。
    pub fn add(
        &mut self,
        title: &str,
        author: &str,
        year: &str,
        is_complete: bool,
    ) -> Result<Book, AppError> {
        let draft = BookDraft::parse(title, author, year)?;
        let book = self.commit(|shelf| shelf.add(draft, is_complete, now_millis()).clone())?;
        tracing::info!(id = %book.id(), title = book.title(), "book added");
        Ok(book)
    }

    /// 読了フラグを反転する。IDが無ければ何もせず false。
    pub fn toggle_completion(&mut self, id: BookId) -> Result<bool, AppError> {
        if self.shelf.get(id).is_none() {
            tracing::debug!(%id, "toggle: no such book");
            return Ok(false);
        }
        self.commit(|shelf| shelf.toggle_completion(id))?;
        tracing::info!(%id, "completion toggled");
        Ok(true)
    }

    /// 3項目まとめて差し替える。どれかが不正なら全体を拒否する。
    /// IDが無ければ入力に関わらず false。
    pub fn edit(
        &mut self,
        id: BookId,
        title: &str,
        author: &str,
        year: &str,
    ) -> Result<bool, AppError> {
        if self.shelf.get(id).is_none() {
            tracing::debug!(%id, "edit: no such book");
            return Ok(false);
        }
        let draft = BookDraft::parse(title, author, year)?;
        self.commit(|shelf| shelf.edit(id, draft))?;
        tracing::info!(%id, "book edited");
        Ok(true)
    }

    /// 削除する。IDが無ければ false。
    pub fn delete(&mut self, id: BookId) -> Result<bool, AppError> {
        if self.shelf.get(id).is_none() {
            tracing::debug!(%id, "delete: no such book");
            return Ok(false);
        }
        self.commit(|shelf| shelf.remove(id))?;
        tracing::info!(%id, "book deleted");
        Ok(true)
    }

    /// 挿入順の一覧（読み取り専用）。
    pub fn list(&self) -> &[Book] {
        self.shelf.books()
    }

    pub fn find(&self, id: BookId) -> Option<&Book> {
        self.shelf.get(id)
    }

    /// 検索語で絞り込んだ未読 / 読了の2リスト。
    pub fn project(&self, search_term: &str) -> Projection<'_> {
        project(self.shelf.books(), search_term)
    }

    // --- private ---

    /// コピーに変更を適用し、保存できた場合のみ確定する。
    fn commit<T>(&mut self, mutate: impl FnOnce(&mut Bookshelf) -> T) -> Result<T, AppError> {
        let mut next = self.shelf.clone();
        let out = mutate(&mut next);
        self.repo.save(next.books()).map_err(|e| {
            tracing::error!(error = %e, "failed to persist shelf");
            AppError::Storage(Box::new(e))
        })?;
        self.shelf = next;
        Ok(out)
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}
