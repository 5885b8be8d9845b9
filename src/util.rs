use crate::ValueHolder;
use std::sync::Arc;
use tokio_postgres::SimpleQueryMessage;
use ydb_dialect_core::{Error, QueryResult, Result, Row, RowLabeled, RowNames, RowsAffected, Value};

pub(crate) fn row_to_value_row(row: &tokio_postgres::Row) -> Result<Row> {
    (0..row.len())
        .map(|i| match row.try_get::<_, ValueHolder>(i) {
            Ok(v) => Ok(v.0),
            Err(..) => {
                let col = &row.columns()[i];
                Err(Error::msg(format!(
                    "Could not deserialize column {} `{}`: {}",
                    i,
                    col.name(),
                    col.type_()
                )))
            }
        })
        .collect()
}

pub(crate) fn row_labels(row: &tokio_postgres::Row) -> RowNames {
    row.columns().iter().map(|c| c.name().to_string()).collect()
}

/// Results of the simple query protocol come as text, every cell is a `Varchar`.
pub(crate) fn simple_query_messages_to_results(
    messages: Vec<SimpleQueryMessage>,
) -> Vec<QueryResult> {
    let mut labels: Option<RowNames> = None;
    let mut results = Vec::with_capacity(messages.len());
    for message in messages {
        match message {
            SimpleQueryMessage::Row(row) => {
                let labels = labels
                    .get_or_insert_with(|| {
                        row.columns()
                            .iter()
                            .map(|c| c.name().to_string())
                            .collect::<Arc<[String]>>()
                    })
                    .clone();
                let values = (0..row.len())
                    .map(|i| Value::Varchar(row.get(i).map(Into::into)))
                    .collect();
                results.push(RowLabeled::new(labels, values).into());
            }
            SimpleQueryMessage::CommandComplete(rows_affected) => {
                labels = None;
                results.push(
                    RowsAffected {
                        rows_affected,
                        last_affected_id: None,
                    }
                    .into(),
                );
            }
            _ => {}
        }
    }
    results
}
