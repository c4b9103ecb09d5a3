//! Typed scalar values carried across the wire (§3 "Data object descriptor").

/// The declared scalar type of a data-object slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Bool,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    Text,
    Decimal,
}

/// A descriptor's declared type: a bare scalar, or a homogeneous array of
/// scalars (the only structured shape this engine supports; see spec.md
/// Non-goals on nested structured values).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Scalar(ScalarType),
    Array(ScalarType),
}

/// A value as it exists in a slot, or as decoded off / encoded onto the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    Text(String),
    /// `mantissa * 10^exponent`, distinct from `F32` because the wire
    /// encoding and rounding behavior differ (§4.1, §10.5).
    Decimal { mantissa: i64, exponent: i8 },
    Array(Vec<Value>),
}

impl Value {
    pub fn scalar_type(&self) -> Option<ScalarType> {
        Some(match self {
            Value::Bool(_) => ScalarType::Bool,
            Value::I16(_) => ScalarType::I16,
            Value::U16(_) => ScalarType::U16,
            Value::I32(_) => ScalarType::I32,
            Value::U32(_) => ScalarType::U32,
            Value::I64(_) => ScalarType::I64,
            Value::U64(_) => ScalarType::U64,
            Value::F32(_) => ScalarType::F32,
            Value::Text(_) => ScalarType::Text,
            Value::Decimal { .. } => ScalarType::Decimal,
            Value::Array(_) => return None,
        })
    }

    /// True if `self`'s shape matches `tag`. Values that match here may
    /// still be rejected by a narrower range check at write time.
    pub fn matches_type(&self, tag: TypeTag) -> bool {
        match (self, tag) {
            (Value::Array(items), TypeTag::Array(elem)) => items
                .iter()
                .all(|v| v.matches_type(TypeTag::Scalar(elem))),
            (v, TypeTag::Scalar(elem)) => v.scalar_type() == Some(elem),
            _ => false,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        Some(match self {
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::I16(v) => *v as f64,
            Value::U16(v) => *v as f64,
            Value::I32(v) => *v as f64,
            Value::U32(v) => *v as f64,
            Value::I64(v) => *v as f64,
            Value::U64(v) => *v as f64,
            Value::F32(v) => *v as f64,
            Value::Decimal { mantissa, exponent } => (*mantissa as f64) * 10f64.powi(*exponent as i32),
            Value::Text(_) | Value::Array(_) => return None,
        })
    }
}
