use crate::{Db, Executor, Migrator, MigratorConfig, Result, SqlWriter};
use std::future::Future;

/// A backend plugged into the `Db` session.
pub trait Driver: Send + Sync {
    type SqlWriter: SqlWriter + 'static;

    const NAME: &'static str;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn sql_writer(&self) -> Self::SqlWriter;

    /// Called once by `Db::open`: register callbacks and install the connection pool.
    fn initialize(&self, db: &mut Db) -> impl Future<Output = Result<()>> + Send;

    fn migrator<'d>(&self, db: &'d Db) -> Migrator<'d> {
        Migrator::new(db, MigratorConfig::default())
    }

    /// Mark a point inside the current transaction of `executor`.
    fn savepoint<E: Executor + ?Sized>(
        &self,
        executor: &mut E,
        name: &str,
    ) -> impl Future<Output = Result<()>> + Send {
        let mut sql = String::new();
        self.sql_writer().write_savepoint(&mut sql, name);
        async move { executor.execute(sql.into()).await.map(|_| ()) }
    }

    /// Roll the current transaction of `executor` back to the savepoint `name`.
    fn rollback_to<E: Executor + ?Sized>(
        &self,
        executor: &mut E,
        name: &str,
    ) -> impl Future<Output = Result<()>> + Send {
        let mut sql = String::new();
        self.sql_writer().write_rollback_to_savepoint(&mut sql, name);
        async move { executor.execute(sql.into()).await.map(|_| ()) }
    }
}
