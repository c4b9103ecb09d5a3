//! Self-describing binary TLV codec (§4.1).
//!
//! Major type occupies the top 3 bits of the first byte, additional-info the
//! low 5, with a follow-on byte count for values 24 through 27 — real minimal
//! CBOR, not a literal nibble split. Free functions with the same shape as
//! `opcua-types::basic_types`'s `write_*`/`read_*` helpers.

use byteorder::{BigEndian, ByteOrder};

use crate::error::CodecError;
use crate::value::{ScalarType, TypeTag, Value};

pub const MAJOR_UINT: u8 = 0;
pub const MAJOR_NEGINT: u8 = 1;
pub const MAJOR_BYTES: u8 = 2;
pub const MAJOR_TEXT: u8 = 3;
pub const MAJOR_ARRAY: u8 = 4;
pub const MAJOR_MAP: u8 = 5;
pub const MAJOR_TAG: u8 = 6;
pub const MAJOR_SIMPLE: u8 = 7;

const SIMPLE_FALSE: u8 = 20;
const SIMPLE_TRUE: u8 = 21;
const SIMPLE_NULL: u8 = 22;
const SIMPLE_FLOAT32: u8 = 26;
const ADDITIONAL_INDEFINITE: u8 = 31;

const TAG_DECIMAL_FRACTION: u64 = 4;

/// The decoded head of a TLV item: its major type and inline/follow-on value.
#[derive(Debug, Clone, Copy)]
struct Head {
    major: u8,
    value: u64,
}

fn require(buf: &[u8], len: usize) -> Result<(), CodecError> {
    if buf.len() < len {
        Err(CodecError::BufferTooSmall)
    } else {
        Ok(())
    }
}

fn slice_at(buf: &[u8], offset: usize, len: usize) -> Result<&[u8], CodecError> {
    buf.get(offset..offset + len).ok_or(CodecError::UnexpectedEof)
}

fn write_head(buf: &mut [u8], major: u8, value: u64) -> Result<usize, CodecError> {
    let top = major << 5;
    if value <= 23 {
        require(buf, 1)?;
        buf[0] = top | value as u8;
        Ok(1)
    } else if value <= u8::MAX as u64 {
        require(buf, 2)?;
        buf[0] = top | 24;
        buf[1] = value as u8;
        Ok(2)
    } else if value <= u16::MAX as u64 {
        require(buf, 3)?;
        buf[0] = top | 25;
        BigEndian::write_u16(&mut buf[1..3], value as u16);
        Ok(3)
    } else if value <= u32::MAX as u64 {
        require(buf, 5)?;
        buf[0] = top | 26;
        BigEndian::write_u32(&mut buf[1..5], value as u32);
        Ok(5)
    } else {
        require(buf, 9)?;
        buf[0] = top | 27;
        BigEndian::write_u64(&mut buf[1..9], value);
        Ok(9)
    }
}

fn read_head(buf: &[u8]) -> Result<(Head, usize), CodecError> {
    let first = *buf.first().ok_or(CodecError::UnexpectedEof)?;
    let major = first >> 5;
    let additional = first & 0x1F;
    match additional {
        0..=23 => Ok((Head { major, value: additional as u64 }, 1)),
        24 => Ok((
            Head { major, value: *slice_at(buf, 1, 1)?.first().unwrap() as u64 },
            2,
        )),
        25 => Ok((
            Head { major, value: BigEndian::read_u16(slice_at(buf, 1, 2)?) as u64 },
            3,
        )),
        26 => Ok((
            Head { major, value: BigEndian::read_u32(slice_at(buf, 1, 4)?) as u64 },
            5,
        )),
        27 => Ok((Head { major, value: BigEndian::read_u64(slice_at(buf, 1, 8)?) }, 9)),
        ADDITIONAL_INDEFINITE => Err(CodecError::IndefiniteLength),
        _ => Err(CodecError::Malformed("reserved additional-info value")),
    }
}

fn mismatch(scalar: ScalarType) -> CodecError {
    CodecError::TypeMismatch { expected: TypeTag::Scalar(scalar) }
}

// --- encoding ---------------------------------------------------------

pub fn encode_uint(buf: &mut [u8], value: u64) -> Result<usize, CodecError> {
    write_head(buf, MAJOR_UINT, value)
}

pub fn encode_int(buf: &mut [u8], value: i64) -> Result<usize, CodecError> {
    if value >= 0 {
        write_head(buf, MAJOR_UINT, value as u64)
    } else {
        write_head(buf, MAJOR_NEGINT, (-1 - value) as u64)
    }
}

pub fn encode_bool(buf: &mut [u8], value: bool) -> Result<usize, CodecError> {
    require(buf, 1)?;
    buf[0] = (MAJOR_SIMPLE << 5) | if value { SIMPLE_TRUE } else { SIMPLE_FALSE };
    Ok(1)
}

pub fn encode_null(buf: &mut [u8]) -> Result<usize, CodecError> {
    require(buf, 1)?;
    buf[0] = (MAJOR_SIMPLE << 5) | SIMPLE_NULL;
    Ok(1)
}

pub fn encode_f32(buf: &mut [u8], value: f32) -> Result<usize, CodecError> {
    require(buf, 5)?;
    buf[0] = (MAJOR_SIMPLE << 5) | SIMPLE_FLOAT32;
    BigEndian::write_u32(&mut buf[1..5], value.to_bits());
    Ok(5)
}

pub fn encode_text(buf: &mut [u8], value: &str) -> Result<usize, CodecError> {
    let head_len = write_head(buf, MAJOR_TEXT, value.len() as u64)?;
    let total = head_len + value.len();
    require(buf, total)?;
    buf[head_len..total].copy_from_slice(value.as_bytes());
    Ok(total)
}

pub fn encode_array_header(buf: &mut [u8], count: u64) -> Result<usize, CodecError> {
    write_head(buf, MAJOR_ARRAY, count)
}

pub fn encode_map_header(buf: &mut [u8], pairs: u64) -> Result<usize, CodecError> {
    write_head(buf, MAJOR_MAP, pairs)
}

pub fn encode_decimal(buf: &mut [u8], mantissa: i64, exponent: i8) -> Result<usize, CodecError> {
    let mut off = write_head(buf, MAJOR_TAG, TAG_DECIMAL_FRACTION)?;
    off += encode_array_header(&mut buf[off..], 2)?;
    off += encode_int(&mut buf[off..], exponent as i64)?;
    off += encode_int(&mut buf[off..], mantissa)?;
    Ok(off)
}

/// Encodes any `Value`, recursing into arrays element-wise.
pub fn encode_value(buf: &mut [u8], value: &Value) -> Result<usize, CodecError> {
    match value {
        Value::Bool(b) => encode_bool(buf, *b),
        Value::I16(v) => encode_int(buf, *v as i64),
        Value::U16(v) => encode_uint(buf, *v as u64),
        Value::I32(v) => encode_int(buf, *v as i64),
        Value::U32(v) => encode_uint(buf, *v as u64),
        Value::I64(v) => encode_int(buf, *v),
        Value::U64(v) => encode_uint(buf, *v),
        Value::F32(v) => encode_f32(buf, *v),
        Value::Text(s) => encode_text(buf, s),
        Value::Decimal { mantissa, exponent } => encode_decimal(buf, *mantissa, *exponent),
        Value::Array(items) => {
            let mut off = encode_array_header(buf, items.len() as u64)?;
            for item in items {
                off += encode_value(&mut buf[off..], item)?;
            }
            Ok(off)
        }
    }
}

// --- decoding -----------------------------------------------------------

fn decode_unsigned(buf: &[u8]) -> Result<(u64, usize), CodecError> {
    let (head, len) = read_head(buf)?;
    if head.major != MAJOR_UINT {
        return Err(mismatch(ScalarType::U64));
    }
    Ok((head.value, len))
}

fn decode_signed(buf: &[u8]) -> Result<(i64, usize), CodecError> {
    let (head, len) = read_head(buf)?;
    match head.major {
        MAJOR_UINT => {
            if head.value > i64::MAX as u64 {
                return Err(CodecError::OutOfRange);
            }
            Ok((head.value as i64, len))
        }
        MAJOR_NEGINT => {
            if head.value > i64::MAX as u64 {
                return Err(CodecError::OutOfRange);
            }
            Ok((-1 - head.value as i64, len))
        }
        _ => Err(mismatch(ScalarType::I64)),
    }
}

pub fn decode_uint16(buf: &[u8]) -> Result<(u16, usize), CodecError> {
    let (v, len) = decode_unsigned(buf)?;
    if v > u16::MAX as u64 {
        return Err(CodecError::OutOfRange);
    }
    Ok((v as u16, len))
}

pub fn decode_uint32(buf: &[u8]) -> Result<(u32, usize), CodecError> {
    let (v, len) = decode_unsigned(buf)?;
    if v > u32::MAX as u64 {
        return Err(CodecError::OutOfRange);
    }
    Ok((v as u32, len))
}

pub fn decode_uint64(buf: &[u8]) -> Result<(u64, usize), CodecError> {
    decode_unsigned(buf)
}

pub fn decode_int16(buf: &[u8]) -> Result<(i16, usize), CodecError> {
    let (v, len) = decode_signed(buf)?;
    if v < i16::MIN as i64 || v > i16::MAX as i64 {
        return Err(CodecError::OutOfRange);
    }
    Ok((v as i16, len))
}

pub fn decode_int32(buf: &[u8]) -> Result<(i32, usize), CodecError> {
    let (v, len) = decode_signed(buf)?;
    if v < i32::MIN as i64 || v > i32::MAX as i64 {
        return Err(CodecError::OutOfRange);
    }
    Ok((v as i32, len))
}

pub fn decode_int64(buf: &[u8]) -> Result<(i64, usize), CodecError> {
    decode_signed(buf)
}

pub fn decode_bool(buf: &[u8]) -> Result<(bool, usize), CodecError> {
    let (head, len) = read_head(buf)?;
    if head.major != MAJOR_SIMPLE {
        return Err(mismatch(ScalarType::Bool));
    }
    match head.value as u8 {
        SIMPLE_FALSE => Ok((false, len)),
        SIMPLE_TRUE => Ok((true, len)),
        _ => Err(mismatch(ScalarType::Bool)),
    }
}

pub fn decode_f32(buf: &[u8]) -> Result<(f32, usize), CodecError> {
    let first = *buf.first().ok_or(CodecError::UnexpectedEof)?;
    if first >> 5 != MAJOR_SIMPLE || (first & 0x1F) != SIMPLE_FLOAT32 {
        return Err(mismatch(ScalarType::F32));
    }
    let bits = BigEndian::read_u32(slice_at(buf, 1, 4)?);
    Ok((f32::from_bits(bits), 5))
}

pub fn decode_text(buf: &[u8]) -> Result<(String, usize), CodecError> {
    let (head, len) = read_head(buf)?;
    if head.major != MAJOR_TEXT {
        return Err(mismatch(ScalarType::Text));
    }
    let str_len = head.value as usize;
    let bytes = slice_at(buf, len, str_len)?;
    let s = std::str::from_utf8(bytes).map_err(|_| CodecError::Malformed("invalid utf-8 text"))?;
    Ok((s.to_string(), len + str_len))
}

pub fn decode_array_header(buf: &[u8]) -> Result<(u64, usize), CodecError> {
    let (head, len) = read_head(buf)?;
    if head.major != MAJOR_ARRAY {
        return Err(CodecError::Malformed("expected array header"));
    }
    Ok((head.value, len))
}

pub fn decode_map_header(buf: &[u8]) -> Result<(u64, usize), CodecError> {
    let (head, len) = read_head(buf)?;
    if head.major != MAJOR_MAP {
        return Err(CodecError::Malformed("expected map header"));
    }
    Ok((head.value, len))
}

pub fn decode_decimal(buf: &[u8]) -> Result<(i64, i8, usize), CodecError> {
    let (head, mut off) = read_head(buf)?;
    if head.major != MAJOR_TAG || head.value != TAG_DECIMAL_FRACTION {
        return Err(CodecError::Malformed("expected decimal-fraction tag"));
    }
    let (count, len) = decode_array_header(&buf[off..])?;
    off += len;
    if count != 2 {
        return Err(CodecError::Malformed("decimal-fraction array must have 2 elements"));
    }
    let (exponent, len) = decode_int16(&buf[off..])?;
    off += len;
    if !(i8::MIN as i16..=i8::MAX as i16).contains(&exponent) {
        return Err(CodecError::OutOfRange);
    }
    let (mantissa, len) = decode_int64(&buf[off..])?;
    off += len;
    Ok((mantissa, exponent as i8, off))
}

fn decode_scalar_as(scalar: ScalarType, buf: &[u8]) -> Result<(Value, usize), CodecError> {
    Ok(match scalar {
        ScalarType::Bool => {
            let (v, l) = decode_bool(buf)?;
            (Value::Bool(v), l)
        }
        ScalarType::I16 => {
            let (v, l) = decode_int16(buf)?;
            (Value::I16(v), l)
        }
        ScalarType::U16 => {
            let (v, l) = decode_uint16(buf)?;
            (Value::U16(v), l)
        }
        ScalarType::I32 => {
            let (v, l) = decode_int32(buf)?;
            (Value::I32(v), l)
        }
        ScalarType::U32 => {
            let (v, l) = decode_uint32(buf)?;
            (Value::U32(v), l)
        }
        ScalarType::I64 => {
            let (v, l) = decode_int64(buf)?;
            (Value::I64(v), l)
        }
        ScalarType::U64 => {
            let (v, l) = decode_uint64(buf)?;
            (Value::U64(v), l)
        }
        ScalarType::F32 => {
            let (v, l) = decode_f32(buf)?;
            (Value::F32(v), l)
        }
        ScalarType::Text => {
            let (v, l) = decode_text(buf)?;
            (Value::Text(v), l)
        }
        ScalarType::Decimal => {
            let (mantissa, exponent, l) = decode_decimal(buf)?;
            (Value::Decimal { mantissa, exponent }, l)
        }
    })
}

/// Decodes a value matching the declared `tag`, recursing for arrays.
/// `max_elements` bounds the declared array length before it is used to
/// size an allocation, since the count is read straight off the wire.
pub fn decode_value_as(tag: TypeTag, buf: &[u8], max_elements: usize) -> Result<(Value, usize), CodecError> {
    match tag {
        TypeTag::Scalar(scalar) => decode_scalar_as(scalar, buf),
        TypeTag::Array(elem) => {
            let (count, mut off) = decode_array_header(buf)?;
            if count as usize > max_elements {
                return Err(CodecError::OutOfRange);
            }
            let mut items = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let (v, len) = decode_scalar_as(elem, &buf[off..])?;
                items.push(v);
                off += len;
            }
            Ok((Value::Array(items), off))
        }
    }
}

/// The shape of a `list` argument (§4.5): null, empty array, or empty map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    Ids,
    Names,
    NameValueMap,
}

/// Recognizes a `list` argument without needing to know the target category.
pub fn decode_list_marker(buf: &[u8]) -> Option<(ListStyle, usize)> {
    let (head, len) = read_head(buf).ok()?;
    match (head.major, head.value) {
        (MAJOR_SIMPLE, v) if v as u8 == SIMPLE_NULL => Some((ListStyle::Ids, len)),
        (MAJOR_ARRAY, 0) => Some((ListStyle::Names, len)),
        (MAJOR_MAP, 0) => Some((ListStyle::NameValueMap, len)),
        _ => None,
    }
}

/// Peeks the major type of the next item without consuming it; the
/// classifier (§4.5) uses this to tell a write (map) from a read.
pub fn peek_is_map(buf: &[u8]) -> bool {
    buf.first().map(|b| b >> 5 == MAJOR_MAP).unwrap_or(false)
}

/// Peeks the major type of the next item without consuming it.
pub fn peek_major(buf: &[u8]) -> Option<u8> {
    buf.first().map(|b| b >> 5)
}
