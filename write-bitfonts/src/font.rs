//! Whole-font records and their encoding

use std::fmt::Write;

use bitfont_types::{layout::font, BoundingBox, FieldType, LayoutLedger};
use read_bitfonts::{FontRef, ReadError};

use crate::{
    bdf::BdfFont,
    error::Error,
    glyph::GlyphRecord,
    missing::missing_glyph,
    validate::{Validate, ValidationCtx},
    write::{dump_table, FontWrite, TableWriter},
};

/// The font-wide values written in the header of a compiled font.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontMetrics {
    /// Point size.
    pub size: u32,
    /// The character count as declared by the source.
    ///
    /// This is written as-is, even if it disagrees with the number of glyphs.
    pub declared_char_count: u32,
    pub bounding_box: BoundingBox,
    pub ascent: u32,
    pub descent: u32,
}

/// A font, ready to be compiled.
///
/// The first glyph is always the placeholder drawn for missing characters;
/// it is added when the record is constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontRecord {
    /// The family name. Only used for documentation.
    pub name: String,
    pub metrics: FontMetrics,
    /// Only used for documentation.
    pub copyright: String,
    glyphs: Vec<GlyphRecord>,
}

impl FontRecord {
    /// Create a new font, prepending the missing-glyph placeholder to `glyphs`.
    ///
    /// The placeholder is sized from `metrics`, so they are validated first;
    /// this fails if any of them would not fit in the compiled header.
    pub fn new(
        name: impl Into<String>,
        metrics: FontMetrics,
        copyright: impl Into<String>,
        glyphs: impl IntoIterator<Item = GlyphRecord>,
    ) -> Result<Self, Error> {
        metrics.validate()?;
        let glyphs = std::iter::once(missing_glyph(metrics.size))
            .chain(glyphs)
            .collect();
        Ok(FontRecord {
            name: name.into(),
            metrics,
            copyright: copyright.into(),
            glyphs,
        })
    }

    pub fn from_bdf(name: impl Into<String>, bdf: BdfFont) -> Result<Self, Error> {
        let metrics = FontMetrics {
            size: bdf.size,
            declared_char_count: bdf.declared_char_count,
            bounding_box: bdf.bounding_box,
            ascent: bdf.ascent,
            descent: bdf.descent,
        };
        FontRecord::new(name, metrics, bdf.copyright, bdf.glyphs)
    }

    /// Decode a compiled font.
    ///
    /// The placeholder glyph in the compiled data is kept; the returned
    /// record has it as its first glyph, just like the record that was
    /// compiled.
    pub fn from_ref(
        name: impl Into<String>,
        copyright: impl Into<String>,
        font: &FontRef,
    ) -> Result<Self, ReadError> {
        let metrics = FontMetrics {
            size: font.size()?,
            declared_char_count: font.declared_char_count()?,
            bounding_box: font.bounding_box()?,
            ascent: font.ascent()?,
            descent: font.descent()?,
        };
        let glyphs = font
            .glyphs()
            .map(|glyph| glyph.and_then(|glyph| GlyphRecord::from_ref(&glyph)))
            .collect::<Result<_, _>>()?;
        Ok(FontRecord {
            name: name.into(),
            metrics,
            copyright: copyright.into(),
            glyphs,
        })
    }

    /// All glyphs, starting with the missing-glyph placeholder.
    pub fn glyphs(&self) -> &[GlyphRecord] {
        &self.glyphs
    }

    /// Validate and encode this font, recording its layout in `ledger`.
    pub fn compile(&self, ledger: &mut LayoutLedger) -> Result<Vec<u8>, Error> {
        let bytes = dump_table(self, ledger)?;
        log::debug!(
            "compiled {} size {}: {} glyphs, {} bytes",
            self.name,
            self.metrics.size,
            self.glyphs.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// A comment describing this font, for generated code.
    ///
    /// ```
    /// # use write_bitfonts::{FontMetrics, FontRecord};
    /// let metrics = FontMetrics { size: 8, declared_char_count: 95, ..Default::default() };
    /// let font = FontRecord::new("bailleul", metrics, "Copyright 2021", []).unwrap();
    /// assert_eq!(
    ///     font.doc_comment(),
    ///     "// bailleul\n//   - Copyright 2021\n//   - Size: 8\n//   - Characters: 95\n"
    /// );
    /// ```
    pub fn doc_comment(&self) -> String {
        let mut out = String::new();
        // writing to a String cannot fail
        let _ = write!(
            out,
            "// {}\n//   - {}\n//   - Size: {}\n//   - Characters: {}\n",
            self.name, self.copyright, self.metrics.size, self.metrics.declared_char_count
        );
        out
    }
}

impl FontWrite for FontRecord {
    fn write_into(&self, writer: &mut TableWriter) -> Result<(), Error> {
        let FontMetrics {
            size,
            declared_char_count,
            bounding_box,
            ascent,
            descent,
        } = self.metrics;
        writer.write_field(font::SIZE, FieldType::U8, size)?;
        writer.write_field(font::CHARACTERS, FieldType::U16, declared_char_count)?;
        writer.write_field(font::BOUNDING_BOX_WIDTH, FieldType::U8, bounding_box.width)?;
        writer.write_field(font::BOUNDING_BOX_HEIGHT, FieldType::U8, bounding_box.height)?;
        writer.write_field(font::BOUNDING_BOX_X_OFFSET, FieldType::I8, bounding_box.x_offset)?;
        writer.write_field(font::BOUNDING_BOX_Y_OFFSET, FieldType::I8, bounding_box.y_offset)?;
        writer.write_field(font::ASCENT, FieldType::U8, ascent)?;
        writer.write_field(font::DESCENT, FieldType::U8, descent)?;
        writer.mark(font::FIRST_CHARACTER);
        for glyph in &self.glyphs {
            writer.write_record(glyph)?;
        }
        Ok(())
    }
}

impl Validate for FontMetrics {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("FontMetrics", |ctx| {
            ctx.in_field("size", |ctx| ctx.check_range(FieldType::U8, self.size));
            ctx.in_field("declared_char_count", |ctx| {
                ctx.check_range(FieldType::U16, self.declared_char_count)
            });
            ctx.in_field("bounding_box", |ctx| self.bounding_box.validate_impl(ctx));
            ctx.in_field("ascent", |ctx| ctx.check_range(FieldType::U8, self.ascent));
            ctx.in_field("descent", |ctx| ctx.check_range(FieldType::U8, self.descent));
        })
    }
}

impl Validate for FontRecord {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("FontRecord", |ctx| {
            ctx.in_field("metrics", |ctx| self.metrics.validate_impl(ctx));
            ctx.in_field("glyphs", |ctx| self.glyphs.validate_impl(ctx));
        })
    }
}
