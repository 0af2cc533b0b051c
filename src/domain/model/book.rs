use serde::{Deserialize, Serialize};

use super::id::BookId;
use crate::domain::error::DomainError;

/// 本棚の1冊。保存形式は `{id, title, author, year, isComplete}`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    id: BookId,
    title: String,
    author: String,
    year: i32,
    #[serde(rename = "isComplete")]
    is_complete: bool,
}

impl Book {
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        is_complete: bool,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            year,
            is_complete,
        }
    }

    pub(crate) fn from_draft(id: BookId, draft: BookDraft, is_complete: bool) -> Self {
        Self {
            id,
            title: draft.title,
            author: draft.author,
            year: draft.year,
            is_complete,
        }
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    // --- 内部操作（Bookshelf経由でのみ呼ばれる） ---

    pub(crate) fn toggle(&mut self) {
        self.is_complete = !self.is_complete;
    }

    /// id と is_complete は保持し、書誌情報だけを差し替える。
    pub(crate) fn apply(&mut self, draft: BookDraft) {
        self.title = draft.title;
        self.author = draft.author;
        self.year = draft.year;
    }
}

/// 検証済みの書誌情報（追加・編集の入力）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    title: String,
    author: String,
    year: i32,
}

impl BookDraft {
    /// フォーム入力をそのまま受け取り、3項目まとめて検証する。
    /// どれか1つでも不正なら全体を拒否する。
    pub fn parse(title: &str, author: &str, year: &str) -> Result<Self, DomainError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DomainError::EmptyTitle);
        }
        let author = author.trim();
        if author.is_empty() {
            return Err(DomainError::EmptyAuthor);
        }
        let year_text = year.trim();
        let year = year_text
            .parse::<i32>()
            .map_err(|_| DomainError::InvalidYear(year_text.to_string()))?;

        Ok(Self {
            title: title.to_string(),
            author: author.to_string(),
            year,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}
