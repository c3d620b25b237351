use serde::{Deserialize, Serialize};

/// `GET /api/v1/names` の既定件数。
pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// 一覧取得で返す件数の上限。これを超える指定はエラーにせず丸める。
pub const MAX_LIST_LIMIT: i64 = 500;

/// `baby_names` テーブルの 1 行を表すドメインモデル。
/// `Serialize` を derive しているので、API のレスポンスとしてそのまま JSON になる。
/// フロントエンド側ではバックエンドの JSON を読むために `Deserialize` も使う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    pub name: String,
    pub rank: i32,
    pub count: i32,
    pub year: i32,
}

/// 一覧 API のレスポンス。`count` は `names` の要素数と常に一致する。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameListResponse {
    pub count: usize,
    pub names: Vec<NameRecord>,
}

impl From<Vec<NameRecord>> for NameListResponse {
    fn from(names: Vec<NameRecord>) -> Self {
        NameListResponse {
            count: names.len(),
            names,
        }
    }
}

/// 一覧 API のクエリパラメータ。
/// 構造体へ直接デシリアライズすると `?limit=5&limit=10` のような重複キーで
/// axum の `Query` 抽出が 400 になってしまうため、`(キー, 値)` の列から最初の値だけを拾う。
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListNamesQuery {
    pub limit: Option<String>,
}

impl ListNamesQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        ListNamesQuery {
            limit: first_param(pairs, "limit").map(str::to_string),
        }
    }

    pub fn limit(&self) -> NameLimit {
        NameLimit::from_query(self.limit.as_deref())
    }
}

/// クエリ文字列の `(キー, 値)` 列から、`key` に一致する最初の値を返す。
pub fn first_param<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// 上限・既定値を適用済みの取得件数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameLimit(i64);

impl NameLimit {
    /// クエリ文字列の `limit` を解釈する。
    /// 未指定や数値でない値は `DEFAULT_LIST_LIMIT`、上限超過は `MAX_LIST_LIMIT`、負数は 0 になる。
    pub fn from_query(raw: Option<&str>) -> Self {
        let requested = raw
            .and_then(|value| value.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_LIST_LIMIT);

        NameLimit(requested.clamp(0, MAX_LIST_LIMIT))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl Default for NameLimit {
    fn default() -> Self {
        NameLimit(DEFAULT_LIST_LIMIT)
    }
}

/// パスから受け取った名前をトリムし、空なら `None` を返す。
/// 空白だけの名前はデータ層に届く前にここで弾かれる。
pub fn normalize_name(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
