/// Primitive types and boxed scalar values.
///
/// A [`Value`] wraps exactly one scalar from the closed primitive set and
/// knows its own tag. Typed accessors fail with a type-mismatch error rather
/// than coercing, so a caller can never silently read an `Int` out of a
/// `Float64` cell.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of column types.
///
/// Adding a type means extending every `match` over this enum; that is a
/// deliberate extension point, not an accident. `Int` (`i32`) and `Int64`
/// (`i64`) are genuinely distinct with no implicit widening between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    String,
    Int,
    Int64,
    Float64,
}

impl PrimitiveType {
    /// Returns true for the types [`crate::Column::mean`] and
    /// [`crate::Column::std_dev`] accept.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, PrimitiveType::String)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveType::String => "string",
            PrimitiveType::Int => "int",
            PrimitiveType::Int64 => "int64",
            PrimitiveType::Float64 => "float64",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for PrimitiveType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "string" | "str" => Ok(PrimitiveType::String),
            "int" | "int32" => Ok(PrimitiveType::Int),
            "int64" => Ok(PrimitiveType::Int64),
            "float64" | "float" => Ok(PrimitiveType::Float64),
            _ => Err(Error::UnsupportedType {
                name: s.to_string(),
            }),
        }
    }
}

/// A scalar tagged with its primitive type.
///
/// Values are immutable once constructed and are always returned by value,
/// never aliased into column storage.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i32),
    Int64(i64),
    Float64(f64),
}

impl Value {
    pub fn dtype(&self) -> PrimitiveType {
        match self {
            Value::String(_) => PrimitiveType::String,
            Value::Int(_) => PrimitiveType::Int,
            Value::Int64(_) => PrimitiveType::Int64,
            Value::Float64(_) => PrimitiveType::Float64,
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(Error::WrongType {
                expected: PrimitiveType::String,
                given: other.dtype(),
            }),
        }
    }

    pub fn as_int(&self) -> Result<i32> {
        match self {
            Value::Int(v) => Ok(*v),
            other => Err(Error::WrongType {
                expected: PrimitiveType::Int,
                given: other.dtype(),
            }),
        }
    }

    pub fn as_int64(&self) -> Result<i64> {
        match self {
            Value::Int64(v) => Ok(*v),
            other => Err(Error::WrongType {
                expected: PrimitiveType::Int64,
                given: other.dtype(),
            }),
        }
    }

    pub fn as_float(&self) -> Result<f64> {
        match self {
            Value::Float64(v) => Ok(*v),
            other => Err(Error::WrongType {
                expected: PrimitiveType::Float64,
                given: other.dtype(),
            }),
        }
    }

    /// The universal escape hatch: every value converts to a JSON scalar.
    /// Row materialization goes through this to reach arbitrary caller
    /// structs via serde.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Int(v) => serde_json::Value::Number((*v).into()),
            Value::Int64(v) => serde_json::Value::Number((*v).into()),
            Value::Float64(v) => serde_json::Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
        }
    }
}

impl fmt::Display for Value {
    /// Host-default decimal form; this is what CSV export writes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Int(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
        }
    }
}
