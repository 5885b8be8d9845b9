use crate::{Query, QueryResult, Result, RowLabeled, RowsAffected};
use async_stream::try_stream;
use futures::{
    FutureExt, StreamExt, TryStreamExt,
    future::{BoxFuture, ready},
    stream::BoxStream,
};

/// Something able to send a query to the database.
///
/// The trait is object safe: pools and connections coming from different backends are handed
/// around as `Box<dyn Connection>` and `Arc<dyn ConnPool>`.
pub trait Executor: Send {
    /// General method to send any query and return any result type (either row or count).
    fn run<'s>(&'s mut self, query: Query) -> BoxStream<'s, Result<QueryResult>>;

    /// Execute the query and returns the rows.
    fn fetch<'s>(&'s mut self, query: Query) -> BoxStream<'s, Result<RowLabeled>> {
        self.run(query)
            .try_filter_map(|v| {
                ready(Ok(match v {
                    QueryResult::Row(row) => Some(row),
                    QueryResult::Affected(..) => None,
                }))
            })
            .boxed()
    }

    /// Execute the query and return the total number of rows affected.
    fn execute<'s>(&'s mut self, query: Query) -> BoxFuture<'s, Result<RowsAffected>> {
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
}

/// A single connection checked out of a `ConnPool`.
pub trait Connection: Executor {
    /// Close the connection once dropped instead of giving it back to its pool, its session
    /// state (an open transaction) is unknown.
    fn discard(&mut self);
}

/// Connection pool installed into the `Db` session by a `Driver`.
pub trait ConnPool: Send + Sync {
    /// Check out a connection, it goes back to the pool once dropped.
    fn acquire(&self) -> BoxFuture<'_, Result<Box<dyn Connection>>>;

    /// Run a query on a freshly acquired connection.
    fn run<'s>(&'s self, query: Query) -> BoxStream<'s, Result<QueryResult>> {
        try_stream! {
            let mut connection = self.acquire().await?;
            let mut stream = connection.run(query);
            while let Some(value) = stream.next().await.transpose()? {
                yield value;
            }
        }
        .boxed()
    }

    /// Stop handing out connections, the ones checked out are closed when returned.
    fn close(&self) {}
}
