use std::convert::Infallible;

use thiserror::Error;

use crate::ParticipantId;

/// A value as carried by the host transport. Arguments to every fire and
/// invoke, and every reply, are built from these.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Number(f64),
    Str(String),
    Participant(ParticipantId),
    List(Vec<Value>),
}

/// Argument list of a single fire or invoke.
pub type Args = Vec<Value>;

/// Builds an [`Args`] list, converting each element with `Value::from`.
///
/// ```
/// use simple_shared::{args, Value};
///
/// let args = args![1, "two", true];
/// assert_eq!(args, vec![Value::Int(1), Value::Str("two".into()), Value::Bool(true)]);
/// ```
#[macro_export]
macro_rules! args {
    () => { ::std::vec::Vec::<$crate::Value>::new() };
    ($($value:expr),+ $(,)?) => { ::std::vec![$($crate::Value::from($value)),+] };
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Participant(_) => "participant",
            Value::List(_) => "list",
        }
    }
}

/// A [`Value`] could not be converted into the requested Rust type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected a value of type {expected}, found {found}")]
pub struct ValueError {
    pub expected: &'static str,
    pub found: &'static str,
}

impl From<Infallible> for ValueError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

macro_rules! impl_value_conversions {
    ($($ty:ty => $variant:ident as $expected:literal),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }

            impl TryFrom<Value> for $ty {
                type Error = ValueError;

                fn try_from(value: Value) -> Result<Self, Self::Error> {
                    match value {
                        Value::$variant(inner) => Ok(inner),
                        other => Err(ValueError {
                            expected: $expected,
                            found: other.type_name(),
                        }),
                    }
                }
            }
        )*
    };
}

impl_value_conversions! {
    bool => Bool as "bool",
    i64 => Int as "int",
    String => Str as "string",
    ParticipantId => Participant as "participant",
    Vec<Value> => List as "list",
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Nil
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

// Ints widen into numbers, the other way round is lossy.
impl TryFrom<Value> for f64 {
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(number) => Ok(number),
            Value::Int(int) => Ok(int as f64),
            other => Err(ValueError {
                expected: "number",
                found: other.type_name(),
            }),
        }
    }
}

impl TryFrom<Value> for () {
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Nil => Ok(()),
            other => Err(ValueError {
                expected: "nil",
                found: other.type_name(),
            }),
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Nil, Into::into)
    }
}
