//! raw font bytes

use std::ops::{Bound, RangeBounds};

use bitfont_types::FieldType;

use crate::read::ReadError;

/// A reference to compiled font data.
///
/// This is a wrapper around a byte slice that remembers where it sits in the
/// original data, and provides bounds-checked access to typed fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontData<'a> {
    total_pos: usize,
    bytes: &'a [u8],
}

impl<'a> FontData<'a> {
    /// Create a new `FontData` with these bytes.
    pub const fn new(bytes: &'a [u8]) -> Self {
        FontData {
            total_pos: 0,
            bytes,
        }
    }

    /// The length of the data, in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The position of the start of this data within the original buffer.
    pub fn position(&self) -> usize {
        self.total_pos
    }

    pub fn split_off(&self, pos: usize) -> Option<FontData<'a>> {
        self.bytes.get(pos..).map(|bytes| FontData {
            bytes,
            total_pos: self.total_pos.saturating_add(pos),
        })
    }

    pub fn slice(&self, range: impl RangeBounds<usize>) -> Option<FontData<'a>> {
        let start = match range.start_bound() {
            Bound::Unbounded => 0,
            Bound::Included(i) => *i,
            Bound::Excluded(i) => i.saturating_add(1),
        };

        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        let total_pos = self.total_pos.saturating_add(start);
        self.bytes
            .get(bounds)
            .map(|bytes| FontData { bytes, total_pos })
    }

    /// Decode a field of type `ty` at `offset`.
    pub fn read_at(&self, offset: usize, ty: FieldType) -> Result<i64, ReadError> {
        let bytes = self
            .bytes
            .get(offset..offset.saturating_add(ty.width()))
            .ok_or(ReadError::OutOfBounds)?;
        ty.decode(bytes).map_err(Into::into)
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_typed() {
        let data = FontData::new(&[0x06, 0xfc, 0xfe]);
        assert_eq!(data.read_at(0, FieldType::U16), Ok(1788));
        assert_eq!(data.read_at(2, FieldType::I8), Ok(-2));
        assert_eq!(data.read_at(2, FieldType::U8), Ok(254));
        assert_eq!(data.read_at(2, FieldType::U16), Err(ReadError::OutOfBounds));
    }

    #[test]
    fn positions_track_slices() {
        let data = FontData::new(&[0, 1, 2, 3, 4, 5]);
        let tail = data.split_off(2).unwrap();
        assert_eq!(tail.position(), 2);
        let mid = tail.slice(1..3).unwrap();
        assert_eq!(mid.position(), 3);
        assert_eq!(mid.as_bytes(), &[3, 4]);
        assert!(data.slice(4..10).is_none());
    }
}
