use crate::{
    ConnPool, Driver, Error, ErrorContext, Query, QueryResult, Result, RowLabeled, RowsAffected,
    SqlWriter, Transaction, log_error,
};
use futures::{
    FutureExt, TryStreamExt,
    future::{BoxFuture, ready},
    stream::{BoxStream, StreamExt},
};
use std::sync::Arc;

/// The CRUD operations the callbacks are registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Query,
    Update,
    Delete,
}

/// Clauses, in order, that statement builders emit for each operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbacksConfig {
    pub create_clauses: Vec<&'static str>,
    pub query_clauses: Vec<&'static str>,
    pub update_clauses: Vec<&'static str>,
    pub delete_clauses: Vec<&'static str>,
}

impl Default for CallbacksConfig {
    fn default() -> Self {
        Self {
            create_clauses: vec!["INSERT", "VALUES", "ON CONFLICT"],
            query_clauses: vec![
                "SELECT", "FROM", "WHERE", "GROUP BY", "ORDER BY", "LIMIT", "FOR",
            ],
            update_clauses: vec!["UPDATE", "SET", "WHERE"],
            delete_clauses: vec!["DELETE", "FROM", "WHERE"],
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Callbacks {
    config: CallbacksConfig,
    registered: bool,
}

impl Callbacks {
    /// Replace the clause lists. Empty lists in `config` keep the current ones.
    pub fn register_default_callbacks(&mut self, config: CallbacksConfig) {
        let CallbacksConfig {
            create_clauses,
            query_clauses,
            update_clauses,
            delete_clauses,
        } = config;
        for (current, new) in [
            (&mut self.config.create_clauses, create_clauses),
            (&mut self.config.query_clauses, query_clauses),
            (&mut self.config.update_clauses, update_clauses),
            (&mut self.config.delete_clauses, delete_clauses),
        ] {
            if !new.is_empty() {
                *current = new;
            }
        }
        self.registered = true;
    }
    /// Whether a driver registered its own callbacks, otherwise the defaults are in place.
    pub fn is_registered(&self) -> bool {
        self.registered
    }
    pub fn clauses(&self, operation: Operation) -> &[&'static str] {
        match operation {
            Operation::Create => &self.config.create_clauses,
            Operation::Query => &self.config.query_clauses,
            Operation::Update => &self.config.update_clauses,
            Operation::Delete => &self.config.delete_clauses,
        }
    }
    pub fn returning(&self, operation: Operation) -> bool {
        self.clauses(operation).contains(&"RETURNING")
    }
}

/// The session: a connection pool, the dialect writing its SQL and the registered callbacks.
///
/// The pool lives as long as the session, it's closed by [`Db::close`] or once the last
/// reference to it is dropped.
pub struct Db {
    pub conn_pool: Option<Arc<dyn ConnPool>>,
    pub callbacks: Callbacks,
    writer: Arc<dyn SqlWriter>,
    name: &'static str,
}

impl Db {
    /// Session that is not initialized by any driver yet.
    pub fn new(name: &'static str, writer: Arc<dyn SqlWriter>) -> Self {
        Self {
            conn_pool: None,
            callbacks: Callbacks::default(),
            writer,
            name,
        }
    }

    /// Create the session and let the driver initialize it.
    pub async fn open<D: Driver>(driver: D) -> Result<Self> {
        let mut db = Self::new(driver.name(), Arc::new(driver.sql_writer()));
        driver
            .initialize(&mut db)
            .await
            .with_context(|| format!("While initializing the `{}` driver", driver.name()))?;
        if db.conn_pool.is_none() {
            return Err(log_error!(Error::msg(format!(
                "The `{}` driver did not install any connection pool",
                driver.name()
            ))));
        }
        log::info!("Opened a `{}` session", db.name);
        Ok(db)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn sql_writer(&self) -> &dyn SqlWriter {
        self.writer.as_ref()
    }

    pub fn conn_pool(&self) -> Result<&Arc<dyn ConnPool>> {
        self.conn_pool
            .as_ref()
            .ok_or_else(|| Error::msg("The session has no connection pool"))
    }

    pub fn run(&self, query: Query) -> BoxStream<'_, Result<QueryResult>> {
        let pool = match self.conn_pool() {
            Ok(pool) => pool,
            Err(e) => return futures::stream::once(ready(Err(e))).boxed(),
        };
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("{}", self.writer.explain(&query.sql, &query.params));
        }
        // Errors are given their context and logged by the connection that produced them
        pool.run(query)
    }

    pub fn fetch(&self, query: Query) -> BoxStream<'_, Result<RowLabeled>> {
        self.run(query)
            .try_filter_map(|v| {
                ready(Ok(match v {
                    QueryResult::Row(row) => Some(row),
                    QueryResult::Affected(..) => None,
                }))
            })
            .boxed()
    }

    pub fn execute(&self, query: Query) -> BoxFuture<'_, Result<RowsAffected>> {
        self.run(query)
            .try_filter_map(|v| {
                ready(Ok(match v {
                    QueryResult::Affected(affected) => Some(affected),
                    QueryResult::Row(..) => None,
                }))
            })
            .try_collect()
            .boxed()
    }

    /// Start a transaction on a dedicated connection.
    pub async fn begin(&self) -> Result<Transaction> {
        let connection = self.conn_pool()?.acquire().await?;
        Transaction::new(connection, self.writer.clone()).await
    }

    /// Close the connection pool, the session cannot run queries afterwards.
    pub fn close(&mut self) {
        if let Some(pool) = self.conn_pool.take() {
            pool.close();
        }
    }
}
