//! 検索語による絞り込みと、未読 / 読了の2リストへの振り分け。

use super::model::book::Book;

/// 表示用の射影。各リストは元のコレクション順を保つ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection<'a> {
    pub incomplete: Vec<&'a Book>,
    pub complete: Vec<&'a Book>,
    /// 検索語ありで1件も一致しなかった場合のみ true。
    /// 空の本棚を検索語なしで表示した場合とは区別する。
    pub no_matches: bool,
}

impl Projection<'_> {
    pub fn is_empty(&self) -> bool {
        self.incomplete.is_empty() && self.complete.is_empty()
    }
}

/// タイトルの部分一致（大文字小文字を区別しない）で絞り込み、読了フラグで分ける。
/// 空の検索語は全件一致。副作用なし。
pub fn project<'a>(books: &'a [Book], search_term: &str) -> Projection<'a> {
    let needle = search_term.to_lowercase();
    let (complete, incomplete): (Vec<&Book>, Vec<&Book>) = books
        .iter()
        .filter(|b| needle.is_empty() || b.title().to_lowercase().contains(&needle))
        .partition(|b| b.is_complete());

    let no_matches = !needle.is_empty() && complete.is_empty() && incomplete.is_empty();

    Projection {
        incomplete,
        complete,
        no_matches,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::id::BookId;

    fn ids(books: &[&Book]) -> Vec<i64> {
        books.iter().map(|b| b.id().get()).collect()
    }

    fn shelf() -> Vec<Book> {
        vec![
            Book::new(BookId::new(1), "Dune", "Frank Herbert", 1965, false),
            Book::new(BookId::new(2), "Dune Messiah", "Frank Herbert", 1969, true),
            Book::new(BookId::new(3), "Laskar Pelangi", "Andrea Hirata", 2005, false),
        ]
    }

    #[test]
    fn empty_term_passes_everything() {
        let books = shelf();
        let view = project(&books, "");
        assert_eq!(ids(&view.incomplete), vec![1, 3]);
        assert_eq!(ids(&view.complete), vec![2]);
        assert!(!view.no_matches);
    }

    #[test]
    fn case_insensitive_substring() {
        let books = shelf();
        let view = project(&books, "dUNE");
        assert_eq!(ids(&view.incomplete), vec![1]);
        assert_eq!(ids(&view.complete), vec![2]);

        let view = project(&books, "pelang");
        assert_eq!(ids(&view.incomplete), vec![3]);
        assert!(view.complete.is_empty());
    }

    #[test]
    fn author_is_not_searched() {
        let books = shelf();
        let view = project(&books, "herbert");
        assert!(view.is_empty());
        assert!(view.no_matches);
    }

    #[test]
    fn no_matches_distinct_from_empty_collection() {
        let books = shelf();
        assert!(project(&books, "xyz").no_matches);

        let empty: Vec<Book> = Vec::new();
        let view = project(&empty, "");
        assert!(view.is_empty());
        assert!(!view.no_matches);
        assert!(project(&empty, "dune").no_matches);
    }
}
