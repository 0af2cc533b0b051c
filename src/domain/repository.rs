use super::model::book::Book;

/// 永続化スロットの抽象。Infra層が実装する。
/// コレクションの独自コピーは持たず、直列化の通り道に徹する。
pub trait ShelfRepository {
    type Error: std::error::Error + Send + Sync + 'static;

    /// データが無い、または壊れている場合は空を返す。
    fn load(&self) -> Result<Vec<Book>, Self::Error>;

    /// コレクション全体で上書きする（差分更新はしない）。
    fn save(&self, books: &[Book]) -> Result<(), Self::Error>;
}
