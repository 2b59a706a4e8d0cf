//! test data shared between the bitfont crates.

/// The directory holding the BDF sources, laid out as `{name}/{name}.{size}.bdf`.
pub static BDF_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/test_data/bdf");

pub mod bdf {
    /// Two glyphs, 'A' and '.', at size 4.
    pub static TINY: &str = include_str!("../test_data/bdf/tiny/tiny.4.bdf");

    /// Space, '!' and 'A' in a 5x8 cell, at size 8.
    pub static MINI: &str = include_str!("../test_data/bdf/mini/mini.8.bdf");
}
