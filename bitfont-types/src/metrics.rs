//! Glyph and font metrics.
//!
//! Metrics are stored in wide integers so that values read from a source
//! file survive unchanged until they are range-checked during compilation.

/// The rectangle containing a glyph's pixels, and its offset from the origin.
///
/// The same shape is used for a font's default bounding box.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    /// Width of the bitmap, in pixels.
    pub width: u32,
    /// Height of the bitmap, in pixels.
    pub height: u32,
    /// Offset of the bottom left corner from the origin, in the x direction.
    pub x_offset: i32,
    /// Offset of the bottom left corner from the origin. Y-up.
    pub y_offset: i32,
}

/// The advance applied after drawing a glyph.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceWidth {
    pub x: u32,
    pub y: u32,
}

impl BoundingBox {
    pub const fn new(width: u32, height: u32, x_offset: i32, y_offset: i32) -> Self {
        BoundingBox {
            width,
            height,
            x_offset,
            y_offset,
        }
    }

    /// The number of pixels covered by the box.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl DeviceWidth {
    pub const fn new(x: u32, y: u32) -> Self {
        DeviceWidth { x, y }
    }
}
