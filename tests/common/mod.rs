//! Shared test harness for integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use bookshelf_mcp::application::service::ShelfService;
use bookshelf_mcp::domain::model::book::Book;
use bookshelf_mcp::domain::model::id::BookId;
use bookshelf_mcp::domain::repository::ShelfRepository;

// =============================================================================
// InMemoryRepo — テスト用リポジトリ
// =============================================================================

#[derive(Debug, thiserror::Error)]
#[error("in-memory store error")]
pub struct InMemoryError;

/// ファイルI/O不要のインメモリスロット。`fail_saves` で書き込み失敗を再現できる。
pub struct InMemoryRepo {
    store: RefCell<HashMap<String, String>>,
    fail_saves: Cell<bool>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self {
            store: RefCell::new(HashMap::new()),
            fail_saves: Cell::new(false),
        }
    }

    /// 生の文字列をスロットに直接書き込む（破損データの再現用）。
    pub fn with_raw(raw: &str) -> Self {
        let repo = Self::new();
        repo.store
            .borrow_mut()
            .insert("books".to_string(), raw.to_string());
        repo
    }

    pub fn raw(&self) -> Option<String> {
        self.store.borrow().get("books").cloned()
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }
}

impl ShelfRepository for &InMemoryRepo {
    type Error = InMemoryError;

    fn load(&self) -> Result<Vec<Book>, Self::Error> {
        let store = self.store.borrow();
        match store.get("books") {
            Some(json) => Ok(serde_json::from_str(json).unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, books: &[Book]) -> Result<(), Self::Error> {
        if self.fail_saves.get() {
            return Err(InMemoryError);
        }
        let json = serde_json::to_string(books).unwrap();
        self.store.borrow_mut().insert("books".to_string(), json);
        Ok(())
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// `[{id:1, "Dune", unread}, {id:2, "Dune Messiah", read}]`
pub fn dunes() -> Vec<Book> {
    vec![
        Book::new(BookId::new(1), "Dune", "Frank Herbert", 1965, false),
        Book::new(BookId::new(2), "Dune Messiah", "Frank Herbert", 1969, true),
    ]
}

/// 標準的なテスト用本棚（未読2冊・読了2冊、挿入順が交互）
pub fn standard_shelf() -> Vec<Book> {
    vec![
        Book::new(BookId::new(1), "Dune", "Frank Herbert", 1965, false),
        Book::new(BookId::new(2), "Dune Messiah", "Frank Herbert", 1969, true),
        Book::new(BookId::new(3), "Laskar Pelangi", "Andrea Hirata", 2005, false),
        Book::new(BookId::new(4), "Bumi Manusia", "Pramoedya Ananta Toer", 1980, true),
    ]
}

/// InMemoryRepoに本を保存してShelfServiceを開く。
pub fn service_with<'a>(
    repo: &'a InMemoryRepo,
    books: &[Book],
) -> ShelfService<&'a InMemoryRepo> {
    repo.save(books).unwrap();
    ShelfService::open(repo).unwrap()
}

pub fn ids(books: &[&Book]) -> Vec<i64> {
    books.iter().map(|b| b.id().get()).collect()
}

// =============================================================================
// Assertion helpers
// =============================================================================

/// 結果がErrで、メッセージに指定文字列を含むことをassert。
pub fn assert_error_contains<T: std::fmt::Debug>(
    result: Result<T, impl std::fmt::Display>,
    expected: &str,
) {
    match result {
        Err(e) => {
            let msg = e.to_string();
            assert!(
                msg.contains(expected),
                "Expected error containing '{expected}', got: '{msg}'"
            );
        }
        Ok(v) => panic!("Expected error containing '{expected}', got Ok({v:?})"),
    }
}
