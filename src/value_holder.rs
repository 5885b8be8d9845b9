use bytes::BytesMut;
use postgres_types::{FromSql, IsNull, ToSql, Type, to_sql_checked};
use rust_decimal::{Decimal, prelude::FromPrimitive};
use std::error::Error;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;
use ydb_dialect_core::Value;

/// Bridges `Value` with the encoding of the PostgreSQL compatible endpoint.
#[derive(Debug)]
pub(crate) struct ValueHolder(pub(crate) Value);

impl From<Value> for ValueHolder {
    fn from(value: Value) -> Self {
        ValueHolder(value)
    }
}

impl<'a> FromSql<'a> for ValueHolder {
    fn from_sql(ty: &Type, raw: &'a [u8]) -> Result<Self, Box<dyn Error + Sync + Send>> {
        Self::from_sql_nullable(ty, Some(raw))
    }
    fn from_sql_null(ty: &Type) -> Result<Self, Box<dyn Error + Sync + Send>> {
        Self::from_sql_nullable(ty, None)
    }
    fn from_sql_nullable(
        ty: &Type,
        raw: Option<&'a [u8]>,
    ) -> Result<Self, Box<dyn Error + Sync + Send>> {
        macro_rules! to_value {
            ($ty_var:ident, $raw:ident, $($($ty:path)|+ => ( $value:path, $source:ty $(, $additional:expr)* ) ,)+) => {
                match *$ty_var {
                    $($($ty)|+ => $value(if let Some($raw) = $raw { Some(<$source>::from_sql($ty_var, $raw)?.into()) } else { None } $(, $additional)*),)+
                    _ => {
                        if $raw.is_some() {
                            return Err(ydb_dialect_core::Error::msg(format!("Cannot decode sql type: `{}`", $ty_var)).into());
                        }
                        Value::Null
                    }
                }
            };
        }
        let value = to_value!(ty, raw,
            Type::BOOL => (Value::Boolean, bool),
            Type::CHAR => (Value::Int8, i8),
            Type::INT2 => (Value::Int16, i16),
            Type::INT4 => (Value::Int32, i32),
            Type::INT8 => (Value::Int64, i64),
            Type::FLOAT4 => (Value::Float32, f32),
            Type::FLOAT8 => (Value::Float64, f64),
            Type::NUMERIC => (Value::Decimal, Decimal, 0, 0),
            Type::OID => (Value::UInt32, u32),
            Type::VARCHAR
            | Type::TEXT
            | Type::NAME
            | Type::BPCHAR
            | Type::JSON
            | Type::XML => (Value::Varchar, String),
            Type::BYTEA => (Value::Blob, Vec<u8>),
            Type::DATE => (Value::Date, Date),
            Type::TIME => (Value::Time, Time),
            Type::TIMESTAMP => (Value::Timestamp, PrimitiveDateTime),
            Type::TIMESTAMPTZ => (Value::TimestampWithTimezone, OffsetDateTime),
            Type::UUID => (Value::Uuid, Uuid),
        );
        Ok(value.into())
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }
}

impl ValueHolder {
    /// Integer payload, `Some(None)` being a typed integer `NULL`.
    fn as_integer(&self) -> Option<Option<i128>> {
        Some(match &self.0 {
            Value::Int8(v) => v.map(Into::into),
            Value::Int16(v) => v.map(Into::into),
            Value::Int32(v) => v.map(Into::into),
            Value::Int64(v) => v.map(Into::into),
            Value::UInt8(v) => v.map(Into::into),
            Value::UInt16(v) => v.map(Into::into),
            Value::UInt32(v) => v.map(Into::into),
            Value::UInt64(v) => v.map(Into::into),
            _ => return None,
        })
    }
    fn as_float(&self) -> Option<Option<f64>> {
        Some(match &self.0 {
            Value::Float32(v) => v.map(Into::into),
            Value::Float64(v) => *v,
            _ => return None,
        })
    }
}

impl ToSql for ValueHolder {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, Box<dyn Error + Sync + Send>>
    where
        Self: Sized,
    {
        // Parameter types are inferred by the server, numbers are encoded with its width
        if let Some(v) = self.as_integer() {
            return match *ty {
                Type::BOOL => v.map(|v| v != 0).to_sql(ty, out),
                Type::INT2 => v.map(i16::try_from).transpose()?.to_sql(ty, out),
                Type::INT4 => v.map(i32::try_from).transpose()?.to_sql(ty, out),
                Type::INT8 => v.map(i64::try_from).transpose()?.to_sql(ty, out),
                Type::FLOAT4 => v.map(|v| v as f32).to_sql(ty, out),
                Type::FLOAT8 => v.map(|v| v as f64).to_sql(ty, out),
                Type::NUMERIC => v.and_then(Decimal::from_i128).to_sql(ty, out),
                _ => v.map(|v| v.to_string()).to_sql(ty, out),
            };
        }
        if let Some(v) = self.as_float() {
            return match *ty {
                Type::FLOAT4 => v.map(|v| v as f32).to_sql(ty, out),
                Type::NUMERIC => v.and_then(Decimal::from_f64).to_sql(ty, out),
                Type::FLOAT8 => v.to_sql(ty, out),
                _ => v.map(|v| v.to_string()).to_sql(ty, out),
            };
        }
        match &self.0 {
            Value::Boolean(v) => v.to_sql(ty, out),
            Value::Decimal(v, ..) => v.to_sql(ty, out),
            Value::Varchar(v) => v.to_sql(ty, out),
            Value::Blob(v) => v.as_deref().to_sql(ty, out),
            Value::Date(v) => v.to_sql(ty, out),
            Value::Time(v) => v.to_sql(ty, out),
            Value::Timestamp(v) => v.to_sql(ty, out),
            Value::TimestampWithTimezone(v) => v.to_sql(ty, out),
            Value::Uuid(v) => v.to_sql(ty, out),
            _ => Ok(IsNull::Yes),
        }
    }

    fn accepts(_ty: &Type) -> bool
    where
        Self: Sized,
    {
        true
    }

    to_sql_checked!();
}
