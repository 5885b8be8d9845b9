use crate::{
    ValueHolder, YdbConfig, YdbDriver, YdbSqlWriter,
    util::{row_labels, row_to_value_row, simple_query_messages_to_results},
};
use async_stream::try_stream;
use deadpool_postgres::{Manager, ManagerConfig, Object, Pool, RecyclingMethod};
use openssl::ssl::{SslConnector, SslFiletype, SslMethod, SslVerifyMode};
use postgres_openssl::MakeTlsConnector;
use std::{path::Path, pin::pin, sync::Arc};
use tokio_postgres::{NoTls, config::SslMode};
use url::Url;
use ydb_dialect_core::{
    ConnPool, Connection, Driver, Error, ErrorContext, Executor, Query, QueryResult, Result,
    RowLabeled, RowsAffected, SqlWriter, TruncateLong,
    future::{BoxFuture, FutureExt},
    log_error,
    stream::{BoxStream, StreamExt, TryStreamExt},
};

/// Pool of connections to the PostgreSQL compatible endpoint of YDB.
pub struct YdbPool {
    pub(crate) pool: Pool,
    pub(crate) simple: bool,
}

impl YdbPool {
    pub const SCHEMES: [&'static str; 3] = ["ydb", "postgres", "postgresql"];

    /// Build the pool described by `config.dsn` and check out one connection to make sure the
    /// database is reachable.
    pub async fn connect(config: &YdbConfig) -> Result<YdbPool> {
        Self::build(config)
            .await
            .with_context(|| format!("While trying to connect to `{}`", TruncateLong(&config.dsn)))
            .map_err(|e| log_error!(e))
    }

    async fn build(config: &YdbConfig) -> Result<YdbPool> {
        let mut url = Url::parse(&config.dsn)?;
        if !Self::SCHEMES.contains(&url.scheme()) {
            return Err(Error::msg(format!(
                "{} connection url must start with `{}://`",
                <YdbDriver as Driver>::NAME,
                <YdbDriver as Driver>::NAME,
            )));
        }
        let mut take_url_param = |key: &str| {
            let mut pairs: Vec<(String, String)> = url
                .query_pairs()
                .map(|(k, v)| (k.into(), v.into()))
                .collect();
            let value = pairs
                .iter()
                .position(|(k, _)| k == key)
                .map(|pos| pairs.remove(pos).1);
            if pairs.is_empty() {
                url.set_query(None);
            } else {
                url.query_pairs_mut()
                    .clear()
                    .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            }
            value
        };
        let sslmode = take_url_param("sslmode").unwrap_or_else(|| "disable".into());
        let sslrootcert = take_url_param("sslrootcert");
        let sslcert = take_url_param("sslcert");
        let sslkey = take_url_param("sslkey");
        let max_size = match take_url_param("pool_max_size") {
            Some(v) => Some(
                v.parse::<usize>()
                    .with_context(|| format!("Invalid pool_max_size `{}`", v))?,
            ),
            None => config.max_connections,
        };
        let postgres_url = format!("postgres{}", &url.as_str()[url.scheme().len()..]);
        let mut pg_config = postgres_url.parse::<tokio_postgres::Config>()?;
        if pg_config.get_password().is_none()
            && let Some(token) = &config.access_token
        {
            pg_config.password(token);
        }
        let manager_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };
        let manager = if sslmode == "disable" {
            Manager::from_config(pg_config, NoTls, manager_config)
        } else {
            pg_config.ssl_mode(SslMode::Require);
            let mut builder = SslConnector::builder(SslMethod::tls())?;
            if let Some(path) = sslrootcert.as_deref().map(Path::new) {
                builder.set_ca_file(path)?;
            }
            if let Some(path) = sslcert.as_deref().map(Path::new) {
                builder.set_certificate_chain_file(path)?;
            }
            if let Some(path) = sslkey.as_deref().map(Path::new) {
                builder.set_private_key_file(path, SslFiletype::PEM)?;
            }
            let verify_hostname = match &*sslmode {
                "require" => {
                    builder.set_verify(SslVerifyMode::NONE);
                    false
                }
                "verify-ca" => {
                    builder.set_verify(SslVerifyMode::PEER);
                    false
                }
                _ => {
                    builder.set_verify(SslVerifyMode::PEER);
                    true
                }
            };
            let mut connector = MakeTlsConnector::new(builder.build());
            connector.set_callback(move |connect, _| {
                connect.set_verify_hostname(verify_hostname);
                Ok(())
            });
            Manager::from_config(pg_config, connector, manager_config)
        };
        let mut builder = Pool::builder(manager);
        if let Some(max_size) = max_size {
            builder = builder.max_size(max_size);
        }
        let pool = builder.build()?;
        drop(pool.get().await?);
        log::info!(
            "Connected to {} at {}:{}",
            <YdbDriver as Driver>::NAME,
            url.host_str().unwrap_or_default(),
            url.port().unwrap_or(5432)
        );
        Ok(YdbPool {
            pool,
            simple: config.prefer_simple_protocol,
        })
    }
}

impl ConnPool for YdbPool {
    fn acquire(&self) -> BoxFuture<'_, Result<Box<dyn Connection>>> {
        async move {
            let client = self.pool.get().await.map_err(|e| {
                log_error!(Error::new(e).context("While acquiring a connection from the pool"))
            })?;
            Ok(Box::new(YdbConnection {
                client: Some(client),
                simple: self.simple,
            }) as Box<dyn Connection>)
        }
        .boxed()
    }

    fn close(&self) {
        self.pool.close();
    }
}

/// A connection checked out of a `YdbPool`, returned to it once dropped unless discarded.
pub struct YdbConnection {
    pub(crate) client: Option<Object>,
    pub(crate) simple: bool,
}

impl Executor for YdbConnection {
    fn run<'s>(&'s mut self, query: Query) -> BoxStream<'s, Result<QueryResult>> {
        let context = Arc::new(format!("While running the query:\n{}", query));
        let client = self.client.as_deref();
        let simple = self.simple || !query.has_params();
        try_stream! {
            let client = client.ok_or_else(|| Error::msg("The connection was discarded"))?;
            if simple {
                let sql = if query.has_params() {
                    YdbSqlWriter::new().inline_values(&query.sql, &query.params)
                } else {
                    query.sql
                };
                for result in simple_query_messages_to_results(client.simple_query(&sql).await?) {
                    yield result;
                }
            } else {
                let statement = client.prepare_cached(&query.sql).await?;
                let params = query.params.into_iter().map(ValueHolder);
                if statement.columns().is_empty() {
                    let rows_affected = client.execute_raw(&statement, params).await?;
                    yield RowsAffected {
                        rows_affected,
                        last_affected_id: None,
                    }
                    .into();
                } else {
                    let stream = client.query_raw(&statement, params).await?;
                    let mut stream = pin!(stream);
                    let mut labels = None;
                    while let Some(row) = stream.next().await.transpose()? {
                        let labels = labels.get_or_insert_with(|| row_labels(&row)).clone();
                        yield RowLabeled::new(labels, row_to_value_row(&row)?).into();
                    }
                }
            }
        }
        .map_err(move |e: Error| log_error!(e.context(context.clone())))
        .boxed()
    }
}

impl Connection for YdbConnection {
    fn discard(&mut self) {
        if let Some(client) = self.client.take() {
            // Detached from the pool, the connection is closed when the client drops
            drop(Object::take(client));
        }
    }
}
