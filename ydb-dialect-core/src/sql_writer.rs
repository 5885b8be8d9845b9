use crate::{
    DataType, Field, IndexDef, TableDef, Value, explain_sql, inline_sql, separated_by,
};
use std::fmt::Write;
use time::{Date, Time};

macro_rules! write_integer {
    ($out:ident, $value:expr) => {{
        let mut buffer = itoa::Buffer::new();
        $out.push_str(buffer.format($value));
    }};
}
macro_rules! write_float {
    ($this:ident, $out:ident, $value:expr) => {{
        let value = $value;
        if value.is_finite() {
            let mut buffer = ryu::Buffer::new();
            $out.push_str(buffer.format(value));
        } else if value.is_nan() {
            $this.write_value_string($out, "NaN");
        } else if value.is_sign_negative() {
            $this.write_value_string($out, "-Infinity");
        } else {
            $this.write_value_string($out, "Infinity");
        }
    }};
}

/// The dialect: everything a backend needs to customize to turn the abstractions of this
/// crate into SQL text.
pub trait SqlWriter: Send + Sync {
    fn as_dyn(&self) -> &dyn SqlWriter;

    fn write_escaped(&self, out: &mut String, value: &str, search: char, replace: &str) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    /// Quote an identifier, possibly qualified (`schema.table`).
    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        separated_by(
            out,
            value.split('.'),
            |out, v| {
                out.push('"');
                self.write_escaped(out, v, '"', r#""""#);
                out.push('"');
            },
            ".",
        );
    }

    /// Column type of the field.
    fn write_column_type(&self, out: &mut String, field: &Field);

    /// Placeholder for the bound value at `index` (from 1).
    fn write_bind_var(&self, out: &mut String, _index: usize) {
        out.push('?');
    }

    /// Expression inserted in place of a value the database must fill in.
    fn write_default_value(&self, out: &mut String, _field: &Field) {
        out.push_str("DEFAULT");
    }

    /// Render the query with its values inlined as literals.
    fn explain(&self, sql: &str, values: &[Value]) -> String {
        explain_sql(self.as_dyn(), sql, None, values)
    }

    /// Inline the values as literals into SQL that is going to be executed, quoted text is
    /// left untouched.
    fn inline_values(&self, sql: &str, values: &[Value]) -> String {
        inline_sql(self.as_dyn(), sql, None, values)
    }

    fn write_value(&self, out: &mut String, value: &Value) {
        if value.is_null() {
            return self.write_value_none(out);
        }
        match value {
            Value::Boolean(Some(v), ..) => self.write_value_bool(out, *v),
            Value::Int8(Some(v), ..) => write_integer!(out, *v),
            Value::Int16(Some(v), ..) => write_integer!(out, *v),
            Value::Int32(Some(v), ..) => write_integer!(out, *v),
            Value::Int64(Some(v), ..) => write_integer!(out, *v),
            Value::UInt8(Some(v), ..) => write_integer!(out, *v),
            Value::UInt16(Some(v), ..) => write_integer!(out, *v),
            Value::UInt32(Some(v), ..) => write_integer!(out, *v),
            Value::UInt64(Some(v), ..) => write_integer!(out, *v),
            Value::Float32(Some(v), ..) => write_float!(self, out, *v),
            Value::Float64(Some(v), ..) => write_float!(self, out, *v),
            Value::Decimal(Some(v), ..) => drop(write!(out, "{}", v)),
            Value::Varchar(Some(v), ..) => self.write_value_string(out, v),
            Value::Blob(Some(v), ..) => self.write_value_blob(out, v.as_ref()),
            Value::Date(Some(v), ..) => {
                out.push('\'');
                self.write_value_date(out, v);
                out.push('\'');
            }
            Value::Time(Some(v), ..) => {
                out.push('\'');
                self.write_value_time(out, v);
                out.push('\'');
            }
            Value::Timestamp(Some(v), ..) => {
                out.push('\'');
                self.write_value_date(out, &v.date());
                out.push(' ');
                self.write_value_time(out, &v.time());
                out.push('\'');
            }
            Value::TimestampWithTimezone(Some(v), ..) => {
                out.push('\'');
                self.write_value_date(out, &v.date());
                out.push(' ');
                self.write_value_time(out, &v.time());
                let offset = v.offset();
                let _ = write!(
                    out,
                    "{}{:02}:{:02}",
                    if offset.is_negative() { '-' } else { '+' },
                    offset.whole_hours().unsigned_abs(),
                    offset.minutes_past_hour().unsigned_abs()
                );
                if offset.seconds_past_minute() != 0 {
                    let _ = write!(out, ":{:02}", offset.seconds_past_minute().unsigned_abs());
                }
                out.push('\'');
            }
            Value::Uuid(Some(v), ..) => drop(write!(out, "'{}'", v)),
            _ => self.write_value_none(out),
        };
    }

    fn write_value_none(&self, out: &mut String) {
        out.push_str("NULL")
    }

    fn write_value_bool(&self, out: &mut String, value: bool) {
        out.push_str(["false", "true"][value as usize])
    }

    fn write_value_string(&self, out: &mut String, value: &str) {
        out.push('\'');
        self.write_escaped(out, value, '\'', "''");
        out.push('\'');
    }

    fn write_value_blob(&self, out: &mut String, value: &[u8]) {
        out.push_str("'\\x");
        for b in value {
            let _ = write!(out, "{:02X}", b);
        }
        out.push('\'');
    }

    fn write_value_date(&self, out: &mut String, value: &Date) {
        let _ = write!(
            out,
            "{:04}-{:02}-{:02}",
            value.year(),
            value.month() as u8,
            value.day()
        );
    }

    fn write_value_time(&self, out: &mut String, value: &Time) {
        let _ = write!(
            out,
            "{:02}:{:02}:{:02}",
            value.hour(),
            value.minute(),
            value.second(),
        );
        let mut subsecond = value.nanosecond();
        if subsecond != 0 {
            let mut width = 9;
            while subsecond % 10 == 0 {
                subsecond /= 10;
                width -= 1;
            }
            let _ = write!(out, ".{:0width$}", subsecond);
        }
    }

    fn write_create_table(&self, out: &mut String, table: &TableDef, inline_indexes: bool) {
        out.push_str("CREATE TABLE ");
        self.write_identifier_quoted(out, &table.full_name());
        out.push_str(" (\n");
        let composite = table.primary_key().count() > 1;
        separated_by(
            out,
            &table.fields,
            |out, v| self.write_create_table_column_fragment(out, v, composite),
            ",\n",
        );
        if composite {
            out.push_str(",\nPRIMARY KEY (");
            separated_by(
                out,
                table.primary_key(),
                |out, v| self.write_identifier_quoted(out, &v.name),
                ", ",
            );
            out.push(')');
        }
        if inline_indexes {
            for index in &table.indexes {
                out.push_str(",\n");
                if index.unique {
                    out.push_str("UNIQUE ");
                }
                out.push_str("INDEX ");
                self.write_identifier_quoted(out, &index.name);
                out.push_str(" (");
                self.write_index_columns(out, index);
                out.push(')');
            }
        }
        out.push_str("\n);");
    }

    fn write_create_table_column_fragment(&self, out: &mut String, field: &Field, composite: bool) {
        self.write_identifier_quoted(out, &field.name);
        out.push(' ');
        self.write_column_type(out, field);
        if !field.nullable && !field.primary_key {
            out.push_str(" NOT NULL");
        }
        if let Some(default) = &field.default {
            out.push_str(" DEFAULT ");
            self.write_value(out, default);
        }
        if field.primary_key && !composite {
            out.push_str(" PRIMARY KEY");
        }
        if field.unique && !field.primary_key {
            out.push_str(" UNIQUE");
        }
    }

    fn write_drop_table(&self, out: &mut String, table: &TableDef, if_exists: bool) {
        out.push_str("DROP TABLE ");
        if if_exists {
            out.push_str("IF EXISTS ");
        }
        self.write_identifier_quoted(out, &table.full_name());
        out.push(';');
    }

    fn write_create_index(&self, out: &mut String, table: &TableDef, index: &IndexDef) {
        out.push_str("CREATE ");
        if index.unique {
            out.push_str("UNIQUE ");
        }
        out.push_str("INDEX ");
        self.write_identifier_quoted(out, &index.name);
        out.push_str(" ON ");
        self.write_identifier_quoted(out, &table.full_name());
        out.push_str(" (");
        self.write_index_columns(out, index);
        out.push_str(");");
    }

    fn write_index_columns(&self, out: &mut String, index: &IndexDef) {
        separated_by(
            out,
            &index.columns,
            |out, v| self.write_identifier_quoted(out, v),
            ", ",
        );
    }

    fn write_transaction_begin(&self, out: &mut String) {
        out.push_str("BEGIN;");
    }

    fn write_transaction_commit(&self, out: &mut String) {
        out.push_str("COMMIT;");
    }

    fn write_transaction_rollback(&self, out: &mut String) {
        out.push_str("ROLLBACK;");
    }

    fn write_savepoint(&self, out: &mut String, name: &str) {
        out.push_str("SAVEPOINT ");
        out.push_str(name);
    }

    fn write_rollback_to_savepoint(&self, out: &mut String, name: &str) {
        out.push_str("ROLLBACK TO SAVEPOINT ");
        out.push_str(name);
    }
}

/// ANSI flavoured writer, used when no dialect is at hand (mostly tests).
#[derive(Default, Clone, Copy)]
pub struct GenericSqlWriter;

impl GenericSqlWriter {
    pub const fn new() -> Self {
        Self
    }
}

impl SqlWriter for GenericSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }

    fn write_column_type(&self, out: &mut String, field: &Field) {
        match &field.data_type {
            DataType::Bool => out.push_str("BOOLEAN"),
            DataType::Int | DataType::Uint => out.push_str(match field.size {
                0..=16 => "SMALLINT",
                17..=32 => "INTEGER",
                _ => "BIGINT",
            }),
            DataType::Float if field.precision > 0 => {
                let _ = write!(out, "DECIMAL({},{})", field.precision, field.scale);
            }
            DataType::Float => out.push_str("DOUBLE PRECISION"),
            DataType::String if field.size > 0 => {
                let _ = write!(out, "VARCHAR({})", field.size);
            }
            DataType::String => out.push_str("TEXT"),
            DataType::Time => out.push_str("TIMESTAMP"),
            DataType::Bytes => out.push_str("BLOB"),
            DataType::Custom(name) => out.push_str(name),
        }
    }
}
