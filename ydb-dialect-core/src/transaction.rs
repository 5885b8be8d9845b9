use crate::{Connection, Executor, Query, QueryResult, Result, SqlWriter};
use futures::stream::BoxStream;
use std::sync::Arc;

/// A connection pinned between `BEGIN` and `COMMIT`/`ROLLBACK`.
///
/// Statements come from the `SqlWriter` of the session that opened it. A transaction dropped
/// before a successful `commit` or `rollback` discards its connection, the pool never hands
/// out a connection with a transaction still open.
pub struct Transaction {
    connection: Box<dyn Connection>,
    writer: Arc<dyn SqlWriter>,
    finished: bool,
}

impl Transaction {
    pub async fn new(connection: Box<dyn Connection>, writer: Arc<dyn SqlWriter>) -> Result<Self> {
        let mut result = Self {
            connection,
            writer,
            finished: false,
        };
        let mut sql = String::new();
        result.writer.write_transaction_begin(&mut sql);
        result.connection.execute(sql.into()).await?;
        Ok(result)
    }

    pub async fn commit(mut self) -> Result<()> {
        let mut sql = String::new();
        self.writer.write_transaction_commit(&mut sql);
        self.connection.execute(sql.into()).await?;
        self.finished = true;
        Ok(())
    }

    pub async fn rollback(mut self) -> Result<()> {
        let mut sql = String::new();
        self.writer.write_transaction_rollback(&mut sql);
        self.connection.execute(sql.into()).await?;
        self.finished = true;
        Ok(())
    }

    /// Mark a point the transaction can later roll back to.
    pub async fn savepoint(&mut self, name: &str) -> Result<()> {
        let mut sql = String::new();
        self.writer.write_savepoint(&mut sql, name);
        self.connection.execute(sql.into()).await.map(|_| ())
    }

    /// Undo everything done after the savepoint `name`, the transaction stays open.
    pub async fn rollback_to(&mut self, name: &str) -> Result<()> {
        let mut sql = String::new();
        self.writer.write_rollback_to_savepoint(&mut sql, name);
        self.connection.execute(sql.into()).await.map(|_| ())
    }
}

impl Executor for Transaction {
    fn run<'s>(&'s mut self, query: Query) -> BoxStream<'s, Result<QueryResult>> {
        self.connection.run(query)
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if !self.finished {
            log::warn!("Transaction dropped while still open, its connection is discarded");
            self.connection.discard();
        }
    }
}
