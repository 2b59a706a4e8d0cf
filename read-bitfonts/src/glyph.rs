//! A single compiled glyph record

use bitfont_types::{layout::glyph, BoundingBox, DeviceWidth, GlyphCode, LayoutLedger};

use crate::{
    font_data::FontData,
    read::{marker, read_signed, read_unsigned, ReadError},
};

/// A glyph record within compiled font data.
#[derive(Clone, Copy)]
pub struct GlyphRef<'a> {
    data: FontData<'a>,
    ledger: &'a LayoutLedger,
}

impl<'a> GlyphRef<'a> {
    /// Read the glyph that starts at the beginning of `data`.
    ///
    /// The returned glyph covers exactly the number of bytes given by its
    /// length field.
    pub fn read(data: FontData<'a>, ledger: &'a LayoutLedger) -> Result<Self, ReadError> {
        let len = read_unsigned(&data, ledger, glyph::BYTES)? as usize;
        let header_len = marker(ledger, glyph::BITMAP)?;
        if len < header_len {
            return Err(ReadError::MalformedLength {
                offset: data.position(),
                len,
            });
        }
        let data = data.slice(..len).ok_or(ReadError::OutOfBounds)?;
        Ok(GlyphRef { data, ledger })
    }

    pub fn code(&self) -> Result<GlyphCode, ReadError> {
        let raw = read_unsigned(&self.data, self.ledger, glyph::CODE)?;
        u16::try_from(raw)
            .map(GlyphCode::new)
            .map_err(|_| ReadError::MalformedValue {
                field: glyph::CODE,
                value: raw.into(),
            })
    }

    /// The total length of this record, in bytes.
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// The position of this record in the font data.
    pub fn position(&self) -> usize {
        self.data.position()
    }

    pub fn device_width(&self) -> Result<DeviceWidth, ReadError> {
        Ok(DeviceWidth::new(
            read_unsigned(&self.data, self.ledger, glyph::DEVICE_WIDTH_X)?,
            read_unsigned(&self.data, self.ledger, glyph::DEVICE_WIDTH_Y)?,
        ))
    }

    pub fn bounding_box(&self) -> Result<BoundingBox, ReadError> {
        Ok(BoundingBox::new(
            read_unsigned(&self.data, self.ledger, glyph::BBX_WIDTH)?,
            read_unsigned(&self.data, self.ledger, glyph::BBX_HEIGHT)?,
            read_signed(&self.data, self.ledger, glyph::BBX_X_OFFSET)?,
            read_signed(&self.data, self.ledger, glyph::BBX_Y_OFFSET)?,
        ))
    }

    /// The packed bitmap bytes.
    pub fn bitmap_data(&self) -> Result<&'a [u8], ReadError> {
        let start = marker(self.ledger, glyph::BITMAP)?;
        self.data
            .split_off(start)
            .map(|data| data.as_bytes())
            .ok_or(ReadError::OutOfBounds)
    }

    /// Unpack the bitmap into rows of pixels.
    ///
    /// Pixels are stored row-major with no per-row alignment, most significant
    /// bit first.
    pub fn bitmap(&self) -> Result<Vec<Vec<bool>>, ReadError> {
        let bbx = self.bounding_box()?;
        let packed = self.bitmap_data()?;
        if packed.len() * 8 < bbx.pixel_count() {
            return Err(ReadError::OutOfBounds);
        }
        let width = bbx.width as usize;
        let rows = (0..bbx.height as usize)
            .map(|y| {
                (0..width)
                    .map(|x| {
                        let bit = y * width + x;
                        packed[bit / 8] & (0x80 >> (bit % 8)) != 0
                    })
                    .collect()
            })
            .collect();
        Ok(rows)
    }
}

impl std::fmt::Debug for GlyphRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphRef")
            .field("position", &self.position())
            .field("byte_len", &self.byte_len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{standard_ledger, TWO_GLYPHS};
    use pretty_assertions::assert_eq;

    #[test]
    fn read_second_glyph() {
        let ledger = standard_ledger();
        let data = FontData::new(TWO_GLYPHS).split_off(20).unwrap();
        let glyph = GlyphRef::read(data, &ledger).unwrap();
        assert_eq!(glyph.code().unwrap(), GlyphCode::new(0x41));
        assert_eq!(glyph.byte_len(), 12);
        assert_eq!(glyph.device_width().unwrap(), DeviceWidth::new(4, 0));
        assert_eq!(glyph.bounding_box().unwrap(), BoundingBox::new(3, 3, 0, -2));
        assert_eq!(glyph.bitmap_data().unwrap(), &[0xbe, 0x80]);
        assert_eq!(
            glyph.bitmap().unwrap(),
            vec![
                vec![true, false, true],
                vec![true, true, true],
                vec![true, false, true],
            ]
        );
    }

    #[test]
    fn length_shorter_than_header() {
        let ledger = standard_ledger();
        let mut bytes = TWO_GLYPHS[9..20].to_vec();
        bytes[3] = 4;
        let err = GlyphRef::read(FontData::new(&bytes), &ledger).unwrap_err();
        assert_eq!(err, ReadError::MalformedLength { offset: 0, len: 4 });
    }

    #[test]
    fn length_past_end() {
        let ledger = standard_ledger();
        let bytes = &TWO_GLYPHS[9..19];
        let err = GlyphRef::read(FontData::new(bytes), &ledger).unwrap_err();
        assert_eq!(err, ReadError::OutOfBounds);
    }
}
