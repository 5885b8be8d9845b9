use crate::{SqlWriter, Value};
use regex::{Captures, Regex};
use std::slice::Iter;

fn render(writer: &dyn SqlWriter, value: &Value) -> String {
    let mut out = String::new();
    writer.write_value(&mut out, value);
    out
}

/// Replace the placeholders of `sql`, a fragment containing no quoted text.
fn replace_placeholders(
    out: &mut String,
    writer: &dyn SqlWriter,
    sql: &str,
    placeholder: Option<&Regex>,
    values: &[Value],
    next: &mut Iter<'_, Value>,
) {
    if let Some(placeholder) = placeholder {
        let replaced = placeholder.replace_all(sql, |captures: &Captures| {
            captures
                .get(1)
                .and_then(|v| v.as_str().parse::<usize>().ok())
                .and_then(|i| i.checked_sub(1))
                .and_then(|i| values.get(i))
                .map(|v| render(writer, v))
                .unwrap_or_else(|| captures[0].to_string())
        });
        out.push_str(&replaced);
        return;
    }
    for c in sql.chars() {
        match (c, next.as_slice().first()) {
            ('?', Some(value)) => {
                out.push_str(&render(writer, value));
                next.next();
            }
            _ => out.push(c),
        }
    }
}

/// Inline the bound values into the SQL text, for logging.
///
/// With a `placeholder` pattern, its first capture group is the 1-based position of the value
/// (numbered placeholders like `$1`), every match is replaced. Without it, every `?` outside
/// string literals takes the next value. Placeholders without a matching value are left as
/// they are. Values are rendered by `writer.write_value`.
pub fn explain_sql(
    writer: &dyn SqlWriter,
    sql: &str,
    placeholder: Option<&Regex>,
    values: &[Value],
) -> String {
    match placeholder {
        Some(..) => {
            let mut out = String::with_capacity(sql.len());
            replace_placeholders(&mut out, writer, sql, placeholder, values, &mut values.iter());
            out
        }
        None => inline_sql(writer, sql, None, values),
    }
}

/// Inline the bound values into the SQL text to be executed.
///
/// Like `explain_sql`, but text inside `'...'`, `"..."` and `` `...` `` is copied unchanged.
pub fn inline_sql(
    writer: &dyn SqlWriter,
    sql: &str,
    placeholder: Option<&Regex>,
    values: &[Value],
) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut next = values.iter();
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in sql.char_indices() {
        match quote {
            Some(q) if c == q => {
                out.push_str(&sql[start..=i]);
                start = i + 1;
                quote = None;
            }
            Some(..) => {}
            None if matches!(c, '\'' | '"' | '`') => {
                replace_placeholders(
                    &mut out,
                    writer,
                    &sql[start..i],
                    placeholder,
                    values,
                    &mut next,
                );
                start = i;
                quote = Some(c);
            }
            None => {}
        }
    }
    match quote {
        // Unterminated quote, copied as is
        Some(..) => out.push_str(&sql[start..]),
        None => replace_placeholders(
            &mut out,
            writer,
            &sql[start..],
            placeholder,
            values,
            &mut next,
        ),
    }
    out
}
