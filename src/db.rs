use crate::config::DatabaseConfig;
use crate::error::ApiError;
use crate::models::NameRecord;
use async_trait::async_trait;
use deadpool_postgres::{Config, Object, Pool, PoolConfig, Runtime, Timeouts};
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use tokio_postgres::Row;
use tracing::{debug, error, info, warn};

/// 名前ランキングを読み出すデータアクセス層の境界。
/// HTTP ハンドラは `Arc<dyn NameRepository>` だけを知っていればよく、
/// テストではインメモリ実装に差し替えられる。
///
/// 「見つからない」は `Ok(None)`、「問い合わせに失敗した」は `Err(ApiError::Database)` と
/// 型で区別されるので、呼び出し側が両者を取り違えることはない。
#[async_trait]
pub trait NameRepository: Send + Sync {
    /// 大文字小文字を区別せずに名前を 1 件引く。
    async fn lookup_by_name(&self, name: &str) -> Result<Option<NameRecord>, ApiError>;

    /// 順位の昇順で先頭 `limit` 件を返す。`limit` は呼び出し側で上限適用済み。
    async fn list_top(&self, limit: i64) -> Result<Vec<NameRecord>, ApiError>;

    /// 接続を 1 本借りて `SELECT 1` が通れば `true`。
    async fn health_check(&self) -> bool;
}

const LOOKUP_BY_NAME_SQL: &str = r#"
    SELECT name, rank, count, year
    FROM baby_names
    WHERE LOWER(name) = LOWER($1)
    ORDER BY year DESC, rank
    LIMIT 1
"#;

const LIST_TOP_SQL: &str = r#"
    SELECT name, rank, count, year
    FROM baby_names
    ORDER BY rank
    LIMIT $1
"#;

/// PostgreSQL への接続プールを握るリポジトリ層。
/// Deadpool の `Pool` を内部に保持し、`NameRepository` の各操作をメソッドとして提供する。
#[derive(Clone)]
pub struct Database {
    pool: Pool,
}

impl Database {
    /// 接続プールを構築し、起動時に疎通確認まで実施する。
    /// 最低 1 本の接続がここで張られるので、DB に届かなければ起動自体が失敗する。
    pub async fn new(config: DatabaseConfig) -> Result<Self, ApiError> {
        info!(
            "Creating PostgreSQL connection pool for {}:{}/{}",
            config.host, config.port, config.database
        );

        let pool = Self::create_pool(config)?;

        let db = Database { pool };
        db.test_connection().await?;

        Ok(db)
    }

    /// Deadpool 用の `Config` を組み立ててプールを生成する内部関数。
    /// `match` で SSL モードを切り替え、`native_tls` で TLS コネクタを差し込んでいる点に注目。
    fn create_pool(config: DatabaseConfig) -> Result<Pool, ApiError> {
        let mut pg_config = Config::new();

        // Set connection parameters
        pg_config.host = Some(config.host);
        pg_config.port = Some(config.port);
        pg_config.dbname = Some(config.database);
        pg_config.user = Some(config.username);
        pg_config.password = Some(config.password);
        pg_config.connect_timeout = Some(config.connection_timeout);

        pg_config.ssl_mode = Some(match config.ssl_mode.as_str() {
            "disable" => deadpool_postgres::SslMode::Disable,
            "prefer" => deadpool_postgres::SslMode::Prefer,
            "require" => deadpool_postgres::SslMode::Require,
            other => {
                warn!("Unknown SSL mode '{}', defaulting to 'prefer'", other);
                deadpool_postgres::SslMode::Prefer
            }
        });

        pg_config.manager = Some(deadpool_postgres::ManagerConfig {
            recycling_method: deadpool_postgres::RecyclingMethod::Fast,
        });

        // Bound both the wait for a free slot and the dial of a new connection
        let mut pool_config = PoolConfig::new(config.max_connections as usize);
        let mut timeouts = Timeouts::default();
        timeouts.wait = Some(config.connection_timeout);
        timeouts.create = Some(config.connection_timeout);
        timeouts.recycle = Some(config.connection_timeout);
        pool_config.timeouts = timeouts;
        pg_config.pool = Some(pool_config);

        let tls_connector = TlsConnector::builder().build().map_err(|e| {
            error!("Failed to create TLS connector: {}", e);
            ApiError::Database(format!("TLS connector creation failed: {}", e))
        })?;
        let tls = MakeTlsConnector::new(tls_connector);

        pg_config
            .create_pool(Some(Runtime::Tokio1), tls)
            .map_err(|e| {
                error!("Failed to create connection pool: {}", e);
                ApiError::Database(format!("Connection pool creation failed: {}", e))
            })
    }

    /// プールから接続を借りる小さなラッパー。
    /// 返ってくる `Object` は Drop 時にプールへ戻るので、成功・未検出・エラーのどの経路でも必ず返却される。
    async fn get_connection(&self) -> Result<Object, ApiError> {
        self.pool.get().await.map_err(ApiError::from)
    }

    /// `Database::new` 直後にプールが機能するかを確かめる。
    /// 失敗した場合は即座に `ApiError::Database` を返す。
    pub async fn test_connection(&self) -> Result<(), ApiError> {
        let client = self.get_connection().await?;

        client.execute("SELECT 1", &[]).await.map_err(|e| {
            error!("Database connection test failed: {}", e);
            ApiError::Database(format!("Connection test failed: {}", e))
        })?;

        info!("Database connection test successful");
        Ok(())
    }

    /// シャットダウン時にプールを閉じる。以降の `get` は `PoolError::Closed` になる。
    pub fn close(&self) {
        self.pool.close();
        info!("Database connection pool closed");
    }
}

#[async_trait]
impl NameRepository for Database {
    async fn lookup_by_name(&self, name: &str) -> Result<Option<NameRecord>, ApiError> {
        let client = self.get_connection().await?;

        let row = client
            .query_opt(LOOKUP_BY_NAME_SQL, &[&name])
            .await
            .map_err(ApiError::from)?;

        match row {
            Some(row) => Ok(Some(row_to_record(&row)?)),
            None => {
                debug!("No baby_names row matches '{}'", name);
                Ok(None)
            }
        }
    }

    async fn list_top(&self, limit: i64) -> Result<Vec<NameRecord>, ApiError> {
        let client = self.get_connection().await?;

        let rows = client
            .query(LIST_TOP_SQL, &[&limit])
            .await
            .map_err(ApiError::from)?;

        rows.iter().map(row_to_record).collect()
    }

    async fn health_check(&self) -> bool {
        let client = match self.get_connection().await {
            Ok(client) => client,
            Err(e) => {
                error!("Database health check could not acquire a connection: {}", e);
                return false;
            }
        };

        match client.execute("SELECT 1", &[]).await {
            Ok(_) => true,
            Err(e) => {
                error!("Database health check failed: {}", e);
                false
            }
        }
    }
}

/// `tokio_postgres::Row` から `NameRecord` を取り出す。
/// `row.get` は型が合わないと panic するため、`try_get` でエラーとして返している。
fn row_to_record(row: &Row) -> Result<NameRecord, ApiError> {
    Ok(NameRecord {
        name: row.try_get("name")?,
        rank: row.try_get("rank")?,
        count: row.try_get("count")?,
        year: row.try_get("year")?,
    })
}
