//! Glyph records and their encoding

use bitfont_types::{layout::glyph, BoundingBox, DeviceWidth, FieldType, GlyphCode};
use read_bitfonts::{GlyphRef, ReadError};

use crate::{
    error::Error,
    validate::{Validate, ValidationCtx},
    write::{FontWrite, TableWriter},
};

/// One character's metrics and pixels.
///
/// The bitmap is stored as rows of pixels, top to bottom; there are
/// `bounding_box.height` rows of `bounding_box.width` pixels each. This is
/// checked during validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphRecord {
    pub code: GlyphCode,
    pub device_width: DeviceWidth,
    pub bounding_box: BoundingBox,
    pub bitmap: Vec<Vec<bool>>,
}

impl GlyphRecord {
    pub fn new(
        code: GlyphCode,
        device_width: DeviceWidth,
        bounding_box: BoundingBox,
        bitmap: Vec<Vec<bool>>,
    ) -> Self {
        GlyphRecord {
            code,
            device_width,
            bounding_box,
            bitmap,
        }
    }

    /// Decode a compiled glyph back into a record.
    pub fn from_ref(glyph: &GlyphRef) -> Result<Self, ReadError> {
        Ok(GlyphRecord {
            code: glyph.code()?,
            device_width: glyph.device_width()?,
            bounding_box: glyph.bounding_box()?,
            bitmap: glyph.bitmap()?,
        })
    }

    /// The number of bytes this glyph occupies once compiled.
    pub fn compiled_len(&self) -> usize {
        HEADER_LEN + self.bounding_box.pixel_count().div_ceil(8)
    }
}

/// code + length + two device width fields + four bounding box fields
const HEADER_LEN: usize = 2 + 2 + 2 + 4;

/// Pack pixels into bytes, most significant bit first.
///
/// Rows are concatenated with no per-row alignment; the final byte is padded
/// with zeros.
pub fn pack_bitmap(rows: &[Vec<bool>]) -> Vec<u8> {
    let n_pixels: usize = rows.iter().map(Vec::len).sum();
    let mut packed = vec![0u8; n_pixels.div_ceil(8)];
    for (i, _) in rows.iter().flatten().enumerate().filter(|(_, on)| **on) {
        packed[i / 8] |= 0x80 >> (i % 8);
    }
    packed
}

impl FontWrite for GlyphRecord {
    fn write_into(&self, writer: &mut TableWriter) -> Result<(), Error> {
        writer.write_field(glyph::CODE, FieldType::U16, self.code.to_u16())?;
        let byte_len = writer.reserve(glyph::BYTES, FieldType::U16);
        writer.write_field(glyph::DEVICE_WIDTH_X, FieldType::U8, self.device_width.x)?;
        writer.write_field(glyph::DEVICE_WIDTH_Y, FieldType::U8, self.device_width.y)?;
        writer.write_field(glyph::BBX_WIDTH, FieldType::U8, self.bounding_box.width)?;
        writer.write_field(glyph::BBX_HEIGHT, FieldType::U8, self.bounding_box.height)?;
        writer.write_field(glyph::BBX_X_OFFSET, FieldType::I8, self.bounding_box.x_offset)?;
        writer.write_field(glyph::BBX_Y_OFFSET, FieldType::I8, self.bounding_box.y_offset)?;
        writer.mark(glyph::BITMAP);
        writer.write_slice(&pack_bitmap(&self.bitmap));
        let total = writer.position() as i64;
        writer.patch(byte_len, total)
    }
}

impl Validate for GlyphRecord {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("GlyphRecord", |ctx| {
            ctx.in_field("device_width", |ctx| self.device_width.validate_impl(ctx));
            ctx.in_field("bounding_box", |ctx| self.bounding_box.validate_impl(ctx));
            ctx.in_field("bitmap", |ctx| {
                let BoundingBox { width, height, .. } = self.bounding_box;
                if self.bitmap.len() != height as usize {
                    ctx.report(format_args!(
                        "glyph {} has {} rows, expected {height}",
                        self.code,
                        self.bitmap.len()
                    ));
                }
                for (i, row) in self.bitmap.iter().enumerate() {
                    if row.len() != width as usize {
                        ctx.report(format_args!(
                            "row {i} of glyph {} has {} pixels, expected {width}",
                            self.code,
                            row.len()
                        ));
                    }
                }
            });
        })
    }
}
