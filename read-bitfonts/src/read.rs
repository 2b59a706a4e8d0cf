use bitfont_types::{LayoutLedger, ScalarError};

use crate::font_data::FontData;

/// An error that occurs when reading compiled font data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    OutOfBounds,
    /// The layout ledger has no entry for this field.
    FieldIsMissing(&'static str),
    /// A field the reader needs a value from was recorded as a marker.
    UntypedField(&'static str),
    /// A glyph's length field is smaller than its own header.
    MalformedLength { offset: usize, len: usize },
    /// A value was decoded but does not fit the type used to represent it.
    MalformedValue { field: &'static str, value: i64 },
    /// The font contains no glyph records at all.
    NoGlyphs,
    Scalar(ScalarError),
}

impl From<ScalarError> for ReadError {
    fn from(src: ScalarError) -> ReadError {
        ReadError::Scalar(src)
    }
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::OutOfBounds => write!(f, "An offset was out of bounds"),
            ReadError::FieldIsMissing(name) => {
                write!(f, "the layout has no entry for '{name}'")
            }
            ReadError::UntypedField(name) => {
                write!(f, "the layout entry for '{name}' has no type")
            }
            ReadError::MalformedLength { offset, len } => {
                write!(f, "glyph at offset {offset} has invalid length {len}")
            }
            ReadError::MalformedValue { field, value } => {
                write!(f, "invalid value {value} for '{field}'")
            }
            ReadError::NoGlyphs => write!(f, "the font contains no glyphs"),
            ReadError::Scalar(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ReadError {}

/// Read the field `name` from `data`, at the position recorded in `ledger`.
pub(crate) fn read_field(
    data: &FontData,
    ledger: &LayoutLedger,
    name: &'static str,
) -> Result<i64, ReadError> {
    let entry = ledger.get(name).ok_or(ReadError::FieldIsMissing(name))?;
    let ty = entry.ty.ok_or(ReadError::UntypedField(name))?;
    data.read_at(entry.offset, ty)
}

pub(crate) fn read_unsigned(
    data: &FontData,
    ledger: &LayoutLedger,
    name: &'static str,
) -> Result<u32, ReadError> {
    let value = read_field(data, ledger, name)?;
    u32::try_from(value).map_err(|_| ReadError::MalformedValue { field: name, value })
}

pub(crate) fn read_signed(
    data: &FontData,
    ledger: &LayoutLedger,
    name: &'static str,
) -> Result<i32, ReadError> {
    let value = read_field(data, ledger, name)?;
    i32::try_from(value).map_err(|_| ReadError::MalformedValue { field: name, value })
}

/// The offset of a position marker such as the start of a bitmap.
pub(crate) fn marker(ledger: &LayoutLedger, name: &'static str) -> Result<usize, ReadError> {
    ledger.offset(name).ok_or(ReadError::FieldIsMissing(name))
}
