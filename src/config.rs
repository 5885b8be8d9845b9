use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
};
use ydb_dialect_core::ConnPool;

/// Settings of a `YdbDriver`, read when the session is initialized.
#[derive(Default, Clone)]
pub struct YdbConfig {
    /// Open the pool through the driver registered under this name instead of the native one.
    pub driver_name: Option<String>,
    /// Data source name, `ydb://user@host:port/database?sslmode=require`.
    pub dsn: String,
    /// Inline the values and use the simple query protocol instead of prepared statements.
    pub prefer_simple_protocol: bool,
    /// Keep the default callbacks, statements won't have a `RETURNING` clause.
    pub without_returning: bool,
    /// Pool to use as is, it wins over every other setting.
    pub conn: Option<Arc<dyn ConnPool>>,
    /// Token sent as password by the native driver when the dsn doesn't carry one.
    pub access_token: Option<String>,
    /// Maximum number of connections of the native pool.
    pub max_connections: Option<usize>,
}

impl YdbConfig {
    pub fn new(dsn: impl Into<String>) -> Self {
        Self {
            dsn: dsn.into(),
            ..Default::default()
        }
    }
    pub fn with_driver_name(mut self, name: impl Into<String>) -> Self {
        self.driver_name = Some(name.into());
        self
    }
    pub fn with_conn(mut self, conn: Arc<dyn ConnPool>) -> Self {
        self.conn = Some(conn);
        self
    }
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
    pub fn with_max_connections(mut self, max: usize) -> Self {
        self.max_connections = Some(max);
        self
    }
    pub fn prefer_simple_protocol(mut self, value: bool) -> Self {
        self.prefer_simple_protocol = value;
        self
    }
    pub fn without_returning(mut self, value: bool) -> Self {
        self.without_returning = value;
        self
    }
}

impl Debug for YdbConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("YdbConfig")
            .field("driver_name", &self.driver_name)
            .field("dsn", &self.dsn)
            .field("prefer_simple_protocol", &self.prefer_simple_protocol)
            .field("without_returning", &self.without_returning)
            .field("conn", &self.conn.as_ref().map(|_| ".."))
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}
