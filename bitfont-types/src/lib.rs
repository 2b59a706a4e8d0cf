//! Common scalar types used by compiled bitmap fonts.
//!
//! This crate is shared by [`read-bitfonts`] and [`write-bitfonts`]; it has
//! the integer codec, glyph metrics, and the [`LayoutLedger`] describing
//! where each field lives in the compiled data.
//!
//! [`read-bitfonts`]: https://docs.rs/read-bitfonts
//! [`write-bitfonts`]: https://docs.rs/write-bitfonts

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod code;
pub mod layout;
mod metrics;
pub mod scalar;

pub use code::{GlyphCode, InvalidGlyphCode};
pub use layout::{LayoutLedger, LedgerEntry};
pub use metrics::{BoundingBox, DeviceWidth};
pub use scalar::{FieldType, ScalarError};
