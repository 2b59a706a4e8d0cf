//! Fixed-width big-endian integers, and their hex text form.
//!
//! Every multi-byte value in a compiled font is big-endian. The encoding
//! functions here never truncate: a value that does not fit in the requested
//! width is reported as an [`ScalarError::OutOfRange`] error.

use std::fmt::{Display, Formatter, Write};

/// The widest field, in bytes, that can be encoded.
pub const MAX_FIELD_WIDTH: usize = 4;

/// The declared width and signedness of a field in a compiled font.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldType {
    width: u8,
    signed: bool,
}

/// An error encountered while encoding or decoding a scalar.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScalarError {
    /// The value cannot be represented in the field.
    OutOfRange { value: i64, ty: FieldType },
    /// Only widths in `1..=4` are supported.
    UnsupportedWidth(usize),
}

impl FieldType {
    /// An unsigned 8-bit field.
    pub const U8: FieldType = FieldType::unsigned(1);
    /// A two's complement 8-bit field.
    pub const I8: FieldType = FieldType::signed(1);
    /// An unsigned 16-bit field.
    pub const U16: FieldType = FieldType::unsigned(2);

    /// An unsigned field `width` bytes wide.
    pub const fn unsigned(width: u8) -> Self {
        FieldType {
            width,
            signed: false,
        }
    }

    /// A two's complement field `width` bytes wide.
    pub const fn signed(width: u8) -> Self {
        FieldType {
            width,
            signed: true,
        }
    }

    /// The size of this field, in bytes.
    pub const fn width(self) -> usize {
        self.width as usize
    }

    /// Whether this field holds two's complement values.
    pub const fn is_signed(self) -> bool {
        self.signed
    }

    /// The smallest value this field can hold.
    pub fn min_value(self) -> i64 {
        if self.signed {
            -(1i64 << (self.bits() - 1))
        } else {
            0
        }
    }

    /// The largest value this field can hold.
    pub fn max_value(self) -> i64 {
        if self.signed {
            (1i64 << (self.bits() - 1)) - 1
        } else {
            (1i64 << self.bits()) - 1
        }
    }

    /// `true` if `value` is representable in this field.
    pub fn contains(self, value: i64) -> bool {
        (self.min_value()..=self.max_value()).contains(&value)
    }

    /// The name of the equivalent C fixed-width integer type, e.g. `uint16_t`.
    pub fn c_type(self) -> String {
        let prefix = if self.is_signed() { "" } else { "u" };
        format!("{prefix}int{}_t", self.bits())
    }

    /// Encode `value` as big-endian bytes, checking it against this field's range.
    pub fn encode(self, value: i64) -> Result<Vec<u8>, ScalarError> {
        check_width(self.width())?;
        if !self.contains(value) {
            return Err(ScalarError::OutOfRange { value, ty: self });
        }
        // the range check above makes the wrapping conversion exact
        let raw = value.rem_euclid(1i64 << self.bits()) as u64;
        Ok(raw_be_bytes(raw, self.width()))
    }

    /// Decode a value of this type from the start of `bytes`.
    pub fn decode(self, bytes: &[u8]) -> Result<i64, ScalarError> {
        check_width(self.width())?;
        let bytes = bytes
            .get(..self.width())
            .ok_or(ScalarError::UnsupportedWidth(bytes.len()))?;
        if self.signed {
            decode_signed(bytes).map(i64::from)
        } else {
            decode_unsigned(bytes).map(i64::from)
        }
    }

    fn bits(self) -> u32 {
        self.width as u32 * 8
    }
}

/// Hex encode an unsigned integer, filling `num_bytes` bytes.
///
/// ```
/// # use bitfont_types::scalar::unsigned;
/// assert_eq!(unsigned(1, 2).unwrap(), "0001");
/// assert_eq!(unsigned(178, 1).unwrap(), "b2");
/// assert_eq!(unsigned(1788, 2).unwrap(), "06fc");
/// ```
pub fn unsigned(value: u32, num_bytes: usize) -> Result<String, ScalarError> {
    unsigned_be_bytes(value, num_bytes).map(|bytes| to_hex(&bytes))
}

/// Hex encode a signed integer, filling `num_bytes` bytes.
///
/// Negative values are written in two's complement; non-negative values are
/// encoded exactly as [`unsigned`] would encode them.
///
/// ```
/// # use bitfont_types::scalar::signed;
/// assert_eq!(signed(-1, 1).unwrap(), "ff");
/// assert_eq!(signed(-16, 2).unwrap(), "fff0");
/// assert_eq!(signed(-1788, 2).unwrap(), "f904");
/// ```
pub fn signed(value: i32, num_bytes: usize) -> Result<String, ScalarError> {
    signed_be_bytes(value, num_bytes).map(|bytes| to_hex(&bytes))
}

/// Encode an unsigned integer as `num_bytes` big-endian bytes.
pub fn unsigned_be_bytes(value: u32, num_bytes: usize) -> Result<Vec<u8>, ScalarError> {
    check_width(num_bytes)?;
    let ty = FieldType::unsigned(num_bytes as u8);
    if i64::from(value) > ty.max_value() {
        return Err(ScalarError::OutOfRange {
            value: value.into(),
            ty,
        });
    }
    Ok(raw_be_bytes(value.into(), num_bytes))
}

/// Encode a signed integer as `num_bytes` big-endian bytes.
pub fn signed_be_bytes(value: i32, num_bytes: usize) -> Result<Vec<u8>, ScalarError> {
    check_width(num_bytes)?;
    if value >= 0 {
        return unsigned_be_bytes(value as u32, num_bytes);
    }
    let ty = FieldType::signed(num_bytes as u8);
    if i64::from(value) < ty.min_value() {
        return Err(ScalarError::OutOfRange {
            value: value.into(),
            ty,
        });
    }
    let wrapped = (1i64 << (8 * num_bytes)) + i64::from(value);
    Ok(raw_be_bytes(wrapped as u64, num_bytes))
}

/// Interpret big-endian bytes as an unsigned integer.
pub fn decode_unsigned(bytes: &[u8]) -> Result<u32, ScalarError> {
    check_width(bytes.len())?;
    Ok(bytes
        .iter()
        .fold(0u32, |acc, byte| (acc << 8) | u32::from(*byte)))
}

/// Interpret big-endian bytes as a two's complement integer.
pub fn decode_signed(bytes: &[u8]) -> Result<i32, ScalarError> {
    let raw = i64::from(decode_unsigned(bytes)?);
    let bits = 8 * bytes.len() as u32;
    let value = if raw >= 1i64 << (bits - 1) {
        raw - (1i64 << bits)
    } else {
        raw
    };
    Ok(value as i32)
}

/// Lowercase hex, two digits per byte.
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        // writing to a String cannot fail
        let _ = write!(out, "{byte:02x}");
    }
    out
}

fn check_width(num_bytes: usize) -> Result<(), ScalarError> {
    if (1..=MAX_FIELD_WIDTH).contains(&num_bytes) {
        Ok(())
    } else {
        Err(ScalarError::UnsupportedWidth(num_bytes))
    }
}

fn raw_be_bytes(raw: u64, num_bytes: usize) -> Vec<u8> {
    raw.to_be_bytes()[8 - num_bytes..].to_vec()
}

impl Display for FieldType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.c_type())
    }
}

impl Display for ScalarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarError::OutOfRange { value, ty } => write!(
                f,
                "value {value} out of range for {ty} ({}..={})",
                ty.min_value(),
                ty.max_value()
            ),
            ScalarError::UnsupportedWidth(width) => {
                write!(f, "unsupported field width ({width} bytes)")
            }
        }
    }
}

impl std::error::Error for ScalarError {}
