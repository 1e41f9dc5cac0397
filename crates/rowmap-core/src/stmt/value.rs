use super::Type;
use crate::entity::{entity_eq, Entity, Mapped};
use crate::{Error, Result};

use chrono::{DateTime, NaiveDate, Utc};

/// A value flowing between entity fields and database columns.
#[derive(Debug, Default)]
pub enum Value {
    /// Null value (absence of a value)
    #[default]
    Null,

    /// String value
    String(String),

    /// Signed 64-bit integer
    I64(i64),

    /// Single-precision float
    F32(f32),

    /// Double-precision float
    F64(f64),

    /// UTC timestamp
    Timestamp(DateTime<Utc>),

    /// Calendar date
    Date(NaiveDate),

    /// Single character
    Char(char),

    /// The default marker: instructs the SQL generator to emit the column's
    /// database-side `default` instead of binding a parameter. Distinct from
    /// `Null`.
    DbDefault,

    /// A nested mapped entity
    Entity(Box<dyn Entity>),
}

impl Value {
    /// Returns a `Value` representing null
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn is_db_default(&self) -> bool {
        matches!(self, Self::DbDefault)
    }

    /// True when the value belongs to the closed atomic set.
    pub const fn is_atomic(&self) -> bool {
        self.infer_ty().is_some()
    }

    /// The atomic type of the value, when it has one.
    pub const fn infer_ty(&self) -> Option<Type> {
        Some(match self {
            Self::String(_) => Type::String,
            Self::I64(_) => Type::I64,
            Self::F32(_) => Type::F32,
            Self::F64(_) => Type::F64,
            Self::Timestamp(_) => Type::Timestamp,
            Self::Date(_) => Type::Date,
            Self::Char(_) => Type::Char,
            Self::Null | Self::DbDefault | Self::Entity(_) => return None,
        })
    }

    pub fn ty_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::DbDefault => "DbDefault",
            Self::Entity(_) => "Entity",
            other => other.infer_ty().unwrap().name(),
        }
    }

    /// Wraps a mapped instance as a value.
    pub fn entity(instance: impl Mapped) -> Self {
        Self::Entity(Box::new(instance))
    }

    pub fn as_entity(&self) -> Option<&dyn Entity> {
        match self {
            Self::Entity(entity) => Some(entity.as_ref()),
            _ => None,
        }
    }

    /// Unwraps a nested entity value into its concrete type.
    pub fn to_entity<T: Mapped>(self) -> Result<T> {
        match self {
            Self::Entity(entity) => entity
                .into_any()
                .downcast::<T>()
                .map(|boxed| *boxed)
                .map_err(|_| Error::type_conversion("Entity", std::any::type_name::<T>())),
            other => Err(Error::type_conversion(other.ty_name(), "Entity")),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn to_option_string(self) -> Result<Option<String>> {
        match self {
            Self::Null => Ok(None),
            Self::String(v) => Ok(Some(v)),
            other => Err(Error::type_conversion(other.ty_name(), "String")),
        }
    }

    pub fn to_option_i64(self) -> Result<Option<i64>> {
        match self {
            Self::Null => Ok(None),
            Self::I64(v) => Ok(Some(v)),
            other => Err(Error::type_conversion(other.ty_name(), "I64")),
        }
    }

    pub fn to_option_f32(self) -> Result<Option<f32>> {
        match self {
            Self::Null => Ok(None),
            Self::F32(v) => Ok(Some(v)),
            other => Err(Error::type_conversion(other.ty_name(), "F32")),
        }
    }

    pub fn to_option_f64(self) -> Result<Option<f64>> {
        match self {
            Self::Null => Ok(None),
            Self::F64(v) => Ok(Some(v)),
            other => Err(Error::type_conversion(other.ty_name(), "F64")),
        }
    }

    pub fn to_option_timestamp(self) -> Result<Option<DateTime<Utc>>> {
        match self {
            Self::Null => Ok(None),
            Self::Timestamp(v) => Ok(Some(v)),
            other => Err(Error::type_conversion(other.ty_name(), "Timestamp")),
        }
    }

    pub fn to_option_date(self) -> Result<Option<NaiveDate>> {
        match self {
            Self::Null => Ok(None),
            Self::Date(v) => Ok(Some(v)),
            other => Err(Error::type_conversion(other.ty_name(), "Date")),
        }
    }

    pub fn to_option_char(self) -> Result<Option<char>> {
        match self {
            Self::Null => Ok(None),
            Self::Char(v) => Ok(Some(v)),
            other => Err(Error::type_conversion(other.ty_name(), "Char")),
        }
    }

    /// Unwraps a nested entity, mapping null to `None`.
    pub fn to_option_entity<T: Mapped>(self) -> Result<Option<T>> {
        match self {
            Self::Null => Ok(None),
            other => other.to_entity().map(Some),
        }
    }

    /// Coerces the value to the given declared field type.
    ///
    /// Exact matches and null pass through. Lossless numeric widening and
    /// string/char and string/chrono conversions are applied; anything else
    /// is a materialization error.
    pub fn coerce(self, ty: Type) -> Result<Value> {
        if self.is_null() || self.infer_ty() == Some(ty) {
            return Ok(self);
        }

        if let Some(value) = self.coerce_chrono(ty)? {
            return Ok(value);
        }

        Ok(match (self, ty) {
            (Value::I64(v), Type::F64) => Value::F64(v as f64),
            (Value::I64(v), Type::F32) => Value::F32(v as f32),
            (Value::F32(v), Type::F64) => Value::F64(v as f64),
            (Value::Char(v), Type::String) => Value::String(v.to_string()),
            (Value::String(v), Type::Char) => {
                let mut chars = v.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Value::Char(c),
                    _ => return Err(Error::type_conversion("String", ty.name())),
                }
            }
            (value, _) => return Err(Error::type_conversion(value.ty_name(), ty.name())),
        })
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Self::Null => Self::Null,
            Self::String(v) => Self::String(v.clone()),
            Self::I64(v) => Self::I64(*v),
            Self::F32(v) => Self::F32(*v),
            Self::F64(v) => Self::F64(*v),
            Self::Timestamp(v) => Self::Timestamp(*v),
            Self::Date(v) => Self::Date(*v),
            Self::Char(v) => Self::Char(*v),
            Self::DbDefault => Self::DbDefault,
            Self::Entity(v) => Self::Entity(v.clone_box()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::I64(a), Self::I64(b)) => a == b,
            (Self::F32(a), Self::F32(b)) => a == b,
            (Self::F64(a), Self::F64(b)) => a == b,
            (Self::Timestamp(a), Self::Timestamp(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::DbDefault, Self::DbDefault) => true,
            (Self::Entity(a), Self::Entity(b)) => entity_eq(a.as_ref(), b.as_ref()),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I64(src as i64)
    }
}

impl From<f32> for Value {
    fn from(src: f32) -> Self {
        Self::F32(src)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<char> for Value {
    fn from(src: char) -> Self {
        Self::Char(src)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(src: DateTime<Utc>) -> Self {
        Self::Timestamp(src)
    }
}

impl From<NaiveDate> for Value {
    fn from(src: NaiveDate) -> Self {
        Self::Date(src)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(src: Option<T>) -> Self {
        match src {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}
