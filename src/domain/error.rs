/// 入力値の検証エラー。ID未発見はエラーではなく `false` で返す。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("author must not be empty")]
    EmptyAuthor,

    #[error("year must be an integer, got '{0}'")]
    InvalidYear(String),
}
