use regex::Regex;
use std::{fmt::Write, sync::LazyLock};
use ydb_dialect_core::{DataType, Field, SqlWriter, Value, explain_sql, inline_sql};

static NUMERIC_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\d+)").expect("The placeholder pattern is valid"));

#[derive(Default, Clone, Copy)]
pub struct YdbSqlWriter {}

impl YdbSqlWriter {
    pub const fn new() -> Self {
        Self {}
    }

    /// Integer width for the effective size (unsigned fields count one extra bit).
    fn integer_type(size: u32, unsigned: bool) -> &'static str {
        match size.saturating_add(unsigned as u32) {
            0..=16 => "Int8",
            17..=32 => "Int32",
            _ => "Int64",
        }
    }
}

impl SqlWriter for YdbSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }

    /// Backtick quoting: `a.b` becomes `` `a`.`b` ``, a literal backtick is doubled and an
    /// identifier that is already quoted is kept as a single token.
    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        if value.is_empty() {
            out.push_str("``");
            return;
        }
        // Only ASCII bytes are inspected or inserted, the buffer stays valid UTF-8
        let mut buff = Vec::with_capacity(value.len() + 2);
        let mut under_quoted = false;
        let mut self_quoted = false;
        let mut continuous_backtick = 0usize;
        let mut shift_delimiter = 0usize;
        for &v in value.as_bytes() {
            match v {
                b'`' => {
                    continuous_backtick += 1;
                    if continuous_backtick == 2 {
                        buff.extend_from_slice(b"``");
                        continuous_backtick = 0;
                    }
                }
                b'.' => {
                    if continuous_backtick > 0 || !self_quoted {
                        shift_delimiter = 0;
                        under_quoted = false;
                        continuous_backtick = 0;
                        buff.push(b'`');
                    }
                    buff.push(v);
                    continue;
                }
                _ => {
                    if shift_delimiter <= continuous_backtick && !under_quoted {
                        buff.push(b'`');
                        under_quoted = true;
                        self_quoted = continuous_backtick > 0;
                        if self_quoted {
                            continuous_backtick -= 1;
                        }
                    }
                    while continuous_backtick > 0 {
                        buff.extend_from_slice(b"``");
                        continuous_backtick -= 1;
                    }
                    buff.push(v);
                }
            }
            shift_delimiter += 1;
        }
        if continuous_backtick > 0 && !self_quoted {
            buff.extend_from_slice(b"``");
        }
        buff.push(b'`');
        out.push_str(&String::from_utf8_lossy(&buff));
    }

    fn write_column_type(&self, out: &mut String, field: &Field) {
        match &field.data_type {
            DataType::Bool => out.push_str("Bool"),
            DataType::Int | DataType::Uint => {
                out.push_str(Self::integer_type(field.size, field.is_unsigned()))
            }
            DataType::Float => {
                if field.precision > 0 {
                    if field.scale > 0 {
                        let _ = write!(out, "numeric({}, {})", field.precision, field.scale);
                    } else {
                        let _ = write!(out, "numeric({})", field.precision);
                    }
                } else {
                    out.push_str("decimal");
                }
            }
            DataType::String => {
                if field.size > 0 {
                    let _ = write!(out, "varchar({})", field.size);
                } else {
                    out.push_str("text");
                }
            }
            DataType::Time => {
                if field.precision > 0 {
                    let _ = write!(out, "Timestamp({})", field.precision);
                } else {
                    out.push_str("Timestamp");
                }
            }
            DataType::Bytes => out.push_str("bytea"),
            DataType::Custom(name) => {
                if field.auto_increment && !name.to_ascii_lowercase().contains("int32") {
                    out.push_str(Self::integer_type(field.size, field.is_unsigned()));
                } else {
                    out.push_str(name);
                }
            }
        }
    }

    fn write_bind_var(&self, out: &mut String, index: usize) {
        out.push('$');
        let mut buffer = itoa::Buffer::new();
        out.push_str(buffer.format(index));
    }

    fn write_default_value(&self, out: &mut String, _field: &Field) {
        out.push_str("DEFAULT");
    }

    fn explain(&self, sql: &str, values: &[Value]) -> String {
        explain_sql(self, sql, Some(&*NUMERIC_PLACEHOLDER), values)
    }

    fn inline_values(&self, sql: &str, values: &[Value]) -> String {
        inline_sql(self, sql, Some(&*NUMERIC_PLACEHOLDER), values)
    }
}
