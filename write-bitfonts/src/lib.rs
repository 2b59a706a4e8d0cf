//! Compiling bitmap fonts for embedded displays.
//!
//! This crate turns BDF sources into compact binary fonts, along with a
//! [`LayoutLedger`] describing where every field lives so that firmware can
//! read the data by constant offset.
//!
//! # Example
//!
//! ```no_run
//! use write_bitfonts::{BdfFont, FontRecord, types::LayoutLedger};
//!
//! let source = std::fs::read_to_string("bailleul.8.bdf").unwrap();
//! let bdf = BdfFont::parse(&source).expect("malformed BDF");
//! let font = FontRecord::from_bdf("bailleul", bdf).expect("metrics out of range");
//!
//! let mut ledger = LayoutLedger::new();
//! let bytes = font.compile(&mut ledger).expect("font failed to compile");
//! println!("{} bytes, first glyph at {:?}", bytes.len(), ledger.offset("FONT_FIRST_CHARACTER"));
//! ```
//!
//! [`LayoutLedger`]: bitfont_types::LayoutLedger

#![forbid(unsafe_code)]

pub mod bdf;
mod error;
mod font;
mod glyph;
mod missing;
pub mod validate;
mod write;

#[cfg(test)]
mod hex_diff;

pub use bdf::{BdfFont, ParseError, ParseErrorKind};
pub use error::Error;
pub use font::{FontMetrics, FontRecord};
pub use glyph::{pack_bitmap, GlyphRecord};
pub use missing::missing_glyph;
pub use write::{dump_table, FontWrite, Placeholder, TableWriter};

/// Public re-export of the bitfont-types crate.
pub extern crate bitfont_types as types;
/// Public re-export of the read-bitfonts crate.
pub extern crate read_bitfonts as read;
