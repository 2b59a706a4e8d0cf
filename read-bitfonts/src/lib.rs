//! Reading compiled bitmap fonts
//!
//! This crate reads the binary data produced by [`write-bitfonts`], using a
//! [`LayoutLedger`] to locate each field. It walks glyph records the same way
//! firmware does: starting at the first glyph, and using each record's own
//! length field to find the next one.
//!
//! # Example
//!
//! ```no_run
//! # fn get_compiled() -> (Vec<u8>, bitfont_types::LayoutLedger) { unimplemented!() }
//! use bitfont_types::GlyphCode;
//! use read_bitfonts::FontRef;
//!
//! let (bytes, ledger) = get_compiled();
//! let font = FontRef::new(&bytes, &ledger).expect("malformed font");
//! let glyph = font.glyph_or_missing(GlyphCode::new(0x41)).unwrap();
//! println!("'A' is {} pixels wide", glyph.bounding_box().unwrap().width);
//! ```
//!
//! [`write-bitfonts`]: https://docs.rs/write-bitfonts/
//! [`LayoutLedger`]: bitfont_types::LayoutLedger

#![forbid(unsafe_code)]

mod font;
mod font_data;
mod glyph;
mod read;

pub use font::{FontRef, Glyphs};
pub use font_data::FontData;
pub use glyph::GlyphRef;
pub use read::ReadError;

/// Public re-export of the bitfont-types crate.
pub extern crate bitfont_types as types;

#[cfg(test)]
pub(crate) mod test_helpers {
    use bitfont_types::{
        layout::{font, glyph},
        FieldType, LayoutLedger,
    };

    /// The ledger produced by compiling any font with the standard layout.
    pub fn standard_ledger() -> LayoutLedger {
        let mut ledger = LayoutLedger::new();
        ledger.record(font::SIZE, 0, FieldType::U8);
        ledger.record(font::CHARACTERS, 1, FieldType::U16);
        ledger.record(font::BOUNDING_BOX_WIDTH, 3, FieldType::U8);
        ledger.record(font::BOUNDING_BOX_HEIGHT, 4, FieldType::U8);
        ledger.record(font::BOUNDING_BOX_X_OFFSET, 5, FieldType::I8);
        ledger.record(font::BOUNDING_BOX_Y_OFFSET, 6, FieldType::I8);
        ledger.record(font::ASCENT, 7, FieldType::U8);
        ledger.record(font::DESCENT, 8, FieldType::U8);
        ledger.mark(font::FIRST_CHARACTER, 9);
        ledger.record(glyph::CODE, 0, FieldType::U16);
        ledger.record(glyph::BYTES, 2, FieldType::U16);
        ledger.record(glyph::DEVICE_WIDTH_X, 4, FieldType::U8);
        ledger.record(glyph::DEVICE_WIDTH_Y, 5, FieldType::U8);
        ledger.record(glyph::BBX_WIDTH, 6, FieldType::U8);
        ledger.record(glyph::BBX_HEIGHT, 7, FieldType::U8);
        ledger.record(glyph::BBX_X_OFFSET, 8, FieldType::I8);
        ledger.record(glyph::BBX_Y_OFFSET, 9, FieldType::I8);
        ledger.mark(glyph::BITMAP, 10);
        ledger
    }

    #[rustfmt::skip]
    pub static TWO_GLYPHS: &[u8] = &[
        0x04,             // size 4
        0x00, 0x01,       // one declared character
        0x03, 0x04,       // font bbox 3x4
        0x00, 0xff,       // offset (0, -1)
        0x03, 0x01,       // ascent, descent
        // missing glyph
        0x00, 0x00,       // code
        0x00, 0x0b,       // 11 bytes
        0x03, 0x04,       // device width
        0x02, 0x04,       // bbx 2x4
        0x00, 0x00,       // offset (0, 0)
        0xff,             // 11 11 11 11
        // 'A'
        0x00, 0x41,       // code
        0x00, 0x0c,       // 12 bytes
        0x04, 0x00,       // device width
        0x03, 0x03,       // bbx 3x3
        0x00, 0xfe,       // offset (0, -2)
        0xbe,             // 101 111 10
        0x80,             // 1 + padding
    ];
}
