//! The compiled font header, and iteration over its glyphs

use bitfont_types::{layout::font, BoundingBox, GlyphCode, LayoutLedger};

use crate::{
    font_data::FontData,
    glyph::GlyphRef,
    read::{marker, read_signed, read_unsigned, ReadError},
};

/// A compiled font.
///
/// All field positions come from the [`LayoutLedger`] produced when the font
/// was compiled.
#[derive(Clone, Copy)]
pub struct FontRef<'a> {
    data: FontData<'a>,
    ledger: &'a LayoutLedger,
    first_glyph: usize,
}

/// An iterator over the glyph records in a font.
///
/// Each record's length field is used to find the start of the next one.
/// Iteration stops after the first error.
#[derive(Clone)]
pub struct Glyphs<'a> {
    data: FontData<'a>,
    ledger: &'a LayoutLedger,
    failed: bool,
}

impl<'a> FontRef<'a> {
    pub fn new(bytes: &'a [u8], ledger: &'a LayoutLedger) -> Result<Self, ReadError> {
        let data = FontData::new(bytes);
        let first_glyph = marker(ledger, font::FIRST_CHARACTER)?;
        if first_glyph > data.len() {
            return Err(ReadError::OutOfBounds);
        }
        Ok(FontRef {
            data,
            ledger,
            first_glyph,
        })
    }

    /// The nominal pixel size.
    pub fn size(&self) -> Result<u32, ReadError> {
        read_unsigned(&self.data, self.ledger, font::SIZE)
    }

    /// The character count declared by the source font.
    ///
    /// This does not include the synthesized missing glyph.
    pub fn declared_char_count(&self) -> Result<u32, ReadError> {
        read_unsigned(&self.data, self.ledger, font::CHARACTERS)
    }

    pub fn bounding_box(&self) -> Result<BoundingBox, ReadError> {
        Ok(BoundingBox::new(
            read_unsigned(&self.data, self.ledger, font::BOUNDING_BOX_WIDTH)?,
            read_unsigned(&self.data, self.ledger, font::BOUNDING_BOX_HEIGHT)?,
            read_signed(&self.data, self.ledger, font::BOUNDING_BOX_X_OFFSET)?,
            read_signed(&self.data, self.ledger, font::BOUNDING_BOX_Y_OFFSET)?,
        ))
    }

    pub fn ascent(&self) -> Result<u32, ReadError> {
        read_unsigned(&self.data, self.ledger, font::ASCENT)
    }

    pub fn descent(&self) -> Result<u32, ReadError> {
        read_unsigned(&self.data, self.ledger, font::DESCENT)
    }

    /// Iterate over every glyph record, starting with the missing glyph.
    pub fn glyphs(&self) -> Glyphs<'a> {
        Glyphs {
            data: self.data.split_off(self.first_glyph).unwrap_or_default(),
            ledger: self.ledger,
            failed: false,
        }
    }

    /// Find the glyph with this code.
    pub fn glyph(&self, code: GlyphCode) -> Result<Option<GlyphRef<'a>>, ReadError> {
        for glyph in self.glyphs() {
            let glyph = glyph?;
            if glyph.code()? == code {
                return Ok(Some(glyph));
            }
        }
        Ok(None)
    }

    /// Find the glyph with this code, or the missing glyph if there is none.
    pub fn glyph_or_missing(&self, code: GlyphCode) -> Result<GlyphRef<'a>, ReadError> {
        match self.glyph(code)? {
            Some(glyph) => Ok(glyph),
            None => self.glyphs().next().unwrap_or(Err(ReadError::NoGlyphs)),
        }
    }
}

impl<'a> Iterator for Glyphs<'a> {
    type Item = Result<GlyphRef<'a>, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.data.is_empty() {
            return None;
        }
        match GlyphRef::read(self.data, self.ledger) {
            Ok(glyph) => {
                self.data = self
                    .data
                    .split_off(glyph.byte_len())
                    .unwrap_or_default();
                Some(Ok(glyph))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl std::fmt::Debug for FontRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRef")
            .field("len", &self.data.len())
            .field("first_glyph", &self.first_glyph)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{standard_ledger, TWO_GLYPHS};
    use pretty_assertions::assert_eq;

    #[test]
    fn header_fields() {
        let ledger = standard_ledger();
        let font = FontRef::new(TWO_GLYPHS, &ledger).unwrap();
        assert_eq!(font.size(), Ok(4));
        assert_eq!(font.declared_char_count(), Ok(1));
        assert_eq!(font.bounding_box(), Ok(BoundingBox::new(3, 4, 0, -1)));
        assert_eq!(font.ascent(), Ok(3));
        assert_eq!(font.descent(), Ok(1));
    }

    #[test]
    fn walk_glyphs() {
        let ledger = standard_ledger();
        let font = FontRef::new(TWO_GLYPHS, &ledger).unwrap();
        let glyphs = font.glyphs().collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].code(), Ok(GlyphCode::MISSING));
        assert_eq!(glyphs[1].position(), 20);
        let total: usize = glyphs.iter().map(GlyphRef::byte_len).sum();
        assert_eq!(total + 9, TWO_GLYPHS.len());
    }

    #[test]
    fn lookup_falls_back_to_missing() {
        let ledger = standard_ledger();
        let font = FontRef::new(TWO_GLYPHS, &ledger).unwrap();
        let a = font.glyph_or_missing(GlyphCode::new(0x41)).unwrap();
        assert_eq!(a.code(), Ok(GlyphCode::new(0x41)));
        assert!(font.glyph(GlyphCode::new(0x42)).unwrap().is_none());
        let fallback = font.glyph_or_missing(GlyphCode::new(0x42)).unwrap();
        assert_eq!(fallback.code(), Ok(GlyphCode::MISSING));
    }

    #[test]
    fn truncated_glyph_stops_iteration() {
        let ledger = standard_ledger();
        let font = FontRef::new(&TWO_GLYPHS[..25], &ledger).unwrap();
        let mut glyphs = font.glyphs();
        assert!(glyphs.next().unwrap().is_ok());
        assert_eq!(glyphs.next().unwrap().unwrap_err(), ReadError::OutOfBounds);
        assert!(glyphs.next().is_none());
    }

    #[test]
    fn empty_font_has_no_missing_glyph() {
        let ledger = standard_ledger();
        let font = FontRef::new(&TWO_GLYPHS[..9], &ledger).unwrap();
        assert_eq!(
            font.glyph_or_missing(GlyphCode::new(1)).unwrap_err(),
            ReadError::NoGlyphs
        );
    }

    #[test]
    fn ledger_without_marker() {
        let ledger = LayoutLedger::new();
        assert_eq!(
            FontRef::new(TWO_GLYPHS, &ledger).unwrap_err(),
            ReadError::FieldIsMissing(font::FIRST_CHARACTER)
        );
    }
}
