use serde::{Deserialize, Serialize};
use std::fmt;

/// 本のID。保存形式はJSONの整数そのまま。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(i64);

impl BookId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> i64 {
        self.0
    }

    /// 既存IDと発行済みIDのどれよりも大きい値を返す。
    /// `now_millis` を下限にするのでタイムスタンプ形のIDになるが、
    /// 同一ミリ秒内の連続発行でも衝突しない。
    /// floor が `i64::MAX` でそれより大きい値が無ければ None。
    pub fn next(now_millis: i64, floor: Option<BookId>) -> Option<Self> {
        match floor {
            Some(BookId(last)) => last.checked_add(1).map(|n| Self(now_millis.max(n))),
            None => Some(Self(now_millis)),
        }
    }
}

impl From<i64> for BookId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
