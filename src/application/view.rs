use crate::domain::model::book::Book;
use crate::domain::projection::Projection;

/// 一致なし時に未読リストへ表示するメッセージ
pub const NO_MATCHES_MESSAGE: &str = "No books match the search.";

/// 射影 → 表示用テキストへの変換
pub struct ShelfView;

impl ShelfView {
    /// 未読 / 読了の2セクションを描画する。
    /// 一致なしの場合はメッセージを未読セクションに出す。
    /// 空の本棚（検索語なし）は空の2セクションのみ。
    pub fn render(view: &Projection<'_>, search_term: &str) -> String {
        let mut lines = Vec::new();

        if !search_term.is_empty() {
            lines.push(format!("Search: \"{search_term}\""));
            lines.push(String::new());
        }

        lines.push(format!("## Unfinished ({})", view.incomplete.len()));
        if view.no_matches {
            lines.push(NO_MATCHES_MESSAGE.to_string());
        }
        lines.extend(view.incomplete.iter().map(|b| Self::render_book(b)));

        lines.push(String::new());
        lines.push(format!("## Finished ({})", view.complete.len()));
        lines.extend(view.complete.iter().map(|b| Self::render_book(b)));

        lines.join("\n")
    }

    pub fn render_book(book: &Book) -> String {
        format!(
            "- [{}] {} / {} / {}",
            book.id(),
            book.title(),
            book.author(),
            book.year()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::id::BookId;
    use crate::domain::projection::project;

    #[test]
    fn book_line_format() {
        let book = Book::new(BookId::new(3), "Bumi", "Tere Liye", 2014, false);
        assert_eq!(ShelfView::render_book(&book), "- [3] Bumi / Tere Liye / 2014");
    }

    #[test]
    fn empty_shelf_has_no_message() {
        let books: Vec<Book> = Vec::new();
        let out = ShelfView::render(&project(&books, ""), "");
        assert!(!out.contains(NO_MATCHES_MESSAGE));
        assert_eq!(out, "## Unfinished (0)\n\n## Finished (0)");
    }

    #[test]
    fn no_matches_shows_message() {
        let books = vec![Book::new(BookId::new(1), "Dune", "Frank Herbert", 1965, true)];
        let out = ShelfView::render(&project(&books, "xyz"), "xyz");
        assert!(out.starts_with("Search: \"xyz\""));
        assert!(out.contains(NO_MATCHES_MESSAGE));
        assert!(!out.contains("Dune"));
    }
}
