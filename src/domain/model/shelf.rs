use std::collections::HashSet;

use super::book::{Book, BookDraft};
use super::id::BookId;

/// 本棚 — 集約ルート。全ての変更はここを経由する。
/// 挿入順を保持し、IDは常に一意。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bookshelf {
    books: Vec<Book>,
    /// このセッションで最後に発行したID（削除後の再利用を防ぐ）
    last_issued: Option<BookId>,
}

impl Bookshelf {
    pub fn new() -> Self {
        Self::default()
    }

    /// 読み込んだ一覧から組み立てる。重複IDは先勝ちで後続を捨てる。
    pub fn from_books(books: Vec<Book>) -> Self {
        let mut seen = HashSet::new();
        let books = books
            .into_iter()
            .filter(|b| seen.insert(b.id()))
            .collect();
        Self {
            books,
            last_issued: None,
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id() == id)
    }

    /// 未使用のIDを発行する。
    /// 上限に達している場合は、使われていない最小の正のIDを使う。
    pub fn generate_id(&mut self, now_millis: i64) -> BookId {
        let max_existing = self.books.iter().map(Book::id).max();
        let floor = max_existing.max(self.last_issued);
        let id = BookId::next(now_millis, floor).unwrap_or_else(|| self.lowest_free_id());
        self.last_issued = self.last_issued.max(Some(id));
        id
    }

    /// 末尾に追加して作成したBookを返す。
    pub fn add(&mut self, draft: BookDraft, is_complete: bool, now_millis: i64) -> &Book {
        let id = self.generate_id(now_millis);
        self.books.push(Book::from_draft(id, draft, is_complete));
        &self.books[self.books.len() - 1]
    }

    /// 読了フラグを反転する。見つからなければ false。
    pub fn toggle_completion(&mut self, id: BookId) -> bool {
        match self.get_mut(id) {
            Some(book) => {
                book.toggle();
                true
            }
            None => false,
        }
    }

    /// タイトル・著者・出版年を差し替える。見つからなければ false。
    pub fn edit(&mut self, id: BookId, draft: BookDraft) -> bool {
        match self.get_mut(id) {
            Some(book) => {
                book.apply(draft);
                true
            }
            None => false,
        }
    }

    /// 削除する（取り消し不可）。見つからなければ false。
    pub fn remove(&mut self, id: BookId) -> bool {
        let before = self.books.len();
        self.books.retain(|b| b.id() != id);
        self.books.len() != before
    }

    fn lowest_free_id(&self) -> BookId {
        let used: HashSet<BookId> = self.books.iter().map(Book::id).collect();
        (1..=i64::MAX)
            .map(BookId::new)
            .find(|id| !used.contains(id))
            .unwrap_or(BookId::new(0))
    }

    fn get_mut(&mut self, id: BookId) -> Option<&mut Book> {
        self.books.iter_mut().find(|b| b.id() == id)
    }
}
