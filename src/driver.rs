use crate::{YdbConfig, YdbPool, YdbSqlWriter};
use std::{future::Future, sync::Arc};
use ydb_dialect_core::{
    CallbacksConfig, ConnPool, Db, Driver, ErrorContext, Migrator, MigratorConfig, Result,
    future::FutureExt, open_pool, register_driver,
};

/// YDB dialect of the `Db` session.
#[derive(Debug, Default, Clone)]
pub struct YdbDriver {
    config: YdbConfig,
}

impl YdbDriver {
    pub fn new(config: YdbConfig) -> Self {
        Self { config }
    }

    /// Driver using the native pool on `dsn` and the default settings.
    pub fn open(dsn: impl Into<String>) -> Self {
        Self::new(YdbConfig::new(dsn))
    }

    pub fn config(&self) -> &YdbConfig {
        &self.config
    }

    /// Callbacks emitting `RETURNING` for the statements that modify rows.
    pub fn returning_callbacks() -> CallbacksConfig {
        CallbacksConfig {
            create_clauses: vec!["INSERT", "VALUES", "ON CONFLICT", "RETURNING"],
            query_clauses: Vec::new(),
            update_clauses: vec!["UPDATE", "SET", "WHERE", "RETURNING"],
            delete_clauses: vec!["DELETE", "FROM", "WHERE", "RETURNING"],
        }
    }

    /// Register the native pool as the generic driver `ydb`, for configurations that only
    /// carry a driver name.
    pub fn register() -> Result<()> {
        register_driver(Self::NAME, |dsn| {
            async move {
                let pool = YdbPool::connect(&YdbConfig::new(dsn)).await?;
                Ok(Arc::new(pool) as Arc<dyn ConnPool>)
            }
            .boxed()
        })
    }
}

impl Driver for YdbDriver {
    type SqlWriter = YdbSqlWriter;

    const NAME: &'static str = "ydb";

    fn sql_writer(&self) -> YdbSqlWriter {
        YdbSqlWriter::new()
    }

    fn initialize(&self, db: &mut Db) -> impl Future<Output = Result<()>> + Send {
        async move {
            if !self.config.without_returning {
                db.callbacks
                    .register_default_callbacks(Self::returning_callbacks());
            }
            let pool: Arc<dyn ConnPool> = if let Some(conn) = &self.config.conn {
                log::debug!("Using the connection pool provided by the configuration");
                conn.clone()
            } else if let Some(name) = &self.config.driver_name {
                open_pool(name, &self.config.dsn)
                    .await
                    .with_context(|| format!("While opening the pool with the `{}` driver", name))?
            } else {
                Arc::new(YdbPool::connect(&self.config).await?)
            };
            db.conn_pool = Some(pool);
            Ok(())
        }
    }

    fn migrator<'d>(&self, db: &'d Db) -> Migrator<'d> {
        Migrator::new(
            db,
            MigratorConfig {
                create_index_after_create_table: true,
            },
        )
    }
}
