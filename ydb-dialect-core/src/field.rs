use crate::Value;
use std::borrow::Cow;

/// Abstract type of a field, independent of any backend.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    Bool,
    Int,
    Uint,
    Float,
    #[default]
    String,
    Time,
    Bytes,
    /// Type name declared by the user, written as is by most dialects.
    Custom(Cow<'static, str>),
}

/// Declarative description of a table column, consumed by the `SqlWriter`.
#[derive(Default, Debug, Clone)]
pub struct Field {
    /// Column name.
    pub name: Cow<'static, str>,
    /// Type the dialect maps to a column type.
    pub data_type: DataType,
    /// Kind of the Rust value backing the field, relevant when `data_type` is `Custom`.
    pub underlying: DataType,
    /// Size in bits for numbers, length for strings (0 => unbounded).
    pub size: u32,
    pub precision: u32,
    pub scale: u32,
    pub auto_increment: bool,
    pub primary_key: bool,
    pub nullable: bool,
    pub unique: bool,
    /// Default value rendered as a literal.
    pub default: Option<Value>,
}

impl Field {
    pub fn new(name: impl Into<Cow<'static, str>>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            underlying: data_type.clone(),
            data_type,
            ..Default::default()
        }
    }
    /// Field of the Rust type `T`, size and kind are inferred from it.
    pub fn of<T: FieldType>(name: impl Into<Cow<'static, str>>) -> Self {
        let mut field = Self::new(name, T::DATA_TYPE);
        field.size = T::SIZE;
        field.nullable = T::NULLABLE;
        field
    }
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }
    pub fn with_precision(mut self, precision: u32, scale: u32) -> Self {
        self.precision = precision;
        self.scale = scale;
        self
    }
    pub fn with_underlying(mut self, underlying: DataType) -> Self {
        self.underlying = underlying;
        self
    }
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
    pub fn is_unsigned(&self) -> bool {
        self.data_type == DataType::Uint || self.underlying == DataType::Uint
    }
}

/// Rust types that describe themselves as a `Field`.
pub trait FieldType {
    const DATA_TYPE: DataType;
    const SIZE: u32 = 0;
    const NULLABLE: bool = false;
}

macro_rules! impl_field_type {
    ($($ty:ty => $data_type:ident $(, $size:expr)?;)+) => {
        $(
            impl FieldType for $ty {
                const DATA_TYPE: DataType = DataType::$data_type;
                $(const SIZE: u32 = $size;)?
            }
        )+
    };
}

impl_field_type! {
    bool => Bool;
    i8 => Int, 8;
    i16 => Int, 16;
    i32 => Int, 32;
    i64 => Int, 64;
    isize => Int, isize::BITS;
    u8 => Uint, 8;
    u16 => Uint, 16;
    u32 => Uint, 32;
    u64 => Uint, 64;
    usize => Uint, usize::BITS;
    f32 => Float, 32;
    f64 => Float, 64;
    rust_decimal::Decimal => Float;
    String => String;
    Vec<u8> => Bytes;
    Box<[u8]> => Bytes;
    time::PrimitiveDateTime => Time;
    time::OffsetDateTime => Time;
}

impl<T: FieldType> FieldType for Option<T> {
    const DATA_TYPE: DataType = T::DATA_TYPE;
    const SIZE: u32 = T::SIZE;
    const NULLABLE: bool = true;
}

/// Index over one or more columns of a table.
#[derive(Default, Debug, Clone)]
pub struct IndexDef {
    pub name: Cow<'static, str>,
    pub columns: Vec<Cow<'static, str>>,
    pub unique: bool,
}

impl IndexDef {
    pub fn new<C, I>(name: impl Into<Cow<'static, str>>, columns: I) -> Self
    where
        C: Into<Cow<'static, str>>,
        I: IntoIterator<Item = C>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            unique: false,
        }
    }
}

/// Table schema handed to the `Migrator`.
#[derive(Default, Debug, Clone)]
pub struct TableDef {
    pub name: Cow<'static, str>,
    /// Schema name (may be empty).
    pub schema: Cow<'static, str>,
    pub fields: Vec<Field>,
    pub indexes: Vec<IndexDef>,
}

impl TableDef {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
    pub fn with_schema(mut self, schema: impl Into<Cow<'static, str>>) -> Self {
        self.schema = schema.into();
        self
    }
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }
    pub fn index(mut self, index: IndexDef) -> Self {
        self.indexes.push(index);
        self
    }
    pub fn primary_key(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.primary_key)
    }
    /// Qualified name, `schema.name` or just `name`, to be passed to the quoting engine.
    pub fn full_name(&self) -> Cow<'_, str> {
        if self.schema.is_empty() {
            Cow::Borrowed(self.name.as_ref())
        } else {
            Cow::Owned(format!("{}.{}", self.schema, self.name))
        }
    }
}
