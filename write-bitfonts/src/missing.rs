//! The "character not found" glyph

use bitfont_types::{BoundingBox, DeviceWidth, GlyphCode};

use crate::glyph::GlyphRecord;

/// Build the glyph drawn in place of characters a font does not have.
///
/// This is a hollow rectangle half as wide as the font is tall, with code
/// [`GlyphCode::MISSING`]. It advances one pixel further than it is wide so
/// that consecutive placeholders do not touch.
///
/// `size` is expected to already fit a byte; [`FontRecord::new`] checks it
/// before calling this.
///
/// [`FontRecord::new`]: crate::FontRecord::new
pub fn missing_glyph(size: u32) -> GlyphRecord {
    let width = size / 2;
    let height = size;
    let bitmap = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| x == 0 || x + 1 == width || y == 0 || y + 1 == height)
                .collect()
        })
        .collect();
    GlyphRecord::new(
        GlyphCode::MISSING,
        DeviceWidth::new(width + 1, height),
        BoundingBox::new(width, height, 0, 0),
        bitmap,
    )
}
