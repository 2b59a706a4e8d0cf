//! Generating C++ sources that embed compiled bitmap fonts.
//!
//! Every font listed in a [`Config`] is parsed and compiled with a single
//! shared [`LayoutLedger`]; the ledger becomes a set of `#define`s in the
//! generated header, and each font becomes a byte array.

use std::path::Path;

use bitfont_types::LayoutLedger;
use write_bitfonts::{BdfFont, Error, FontRecord};

mod config;
mod error;
mod formatting;

pub use config::{Config, FontConfig};
pub use error::ErrorReport;
pub use formatting::{header, source, CompiledFont};

/// The output of compiling every font in a config.
#[derive(Clone, Debug, Default)]
pub struct Compiled {
    pub fonts: Vec<CompiledFont>,
    pub ledger: LayoutLedger,
}

/// Compile every font in `config`, stopping at the first failure.
pub fn compile_fonts(config: &Config) -> Result<Compiled, ErrorReport> {
    let mut compiled = Compiled::default();
    for (name, size, path) in config.sources() {
        let text = std::fs::read_to_string(&path).map_err(|e| {
            ErrorReport::message(format!("error reading '{}': {e}", path.display()))
        })?;
        let font = compile_source(name, &path, text, &mut compiled.ledger)?;
        if font.record.metrics.size != size {
            log::warn!(
                "'{}' is listed at size {size} but declares size {}",
                path.display(),
                font.record.metrics.size
            );
        }
        compiled.fonts.push(font);
    }
    log::info!(
        "compiled {} fonts, {} layout entries",
        compiled.fonts.len(),
        compiled.ledger.len()
    );
    Ok(compiled)
}

/// Parse and compile the BDF source `text`, read from `path`.
pub fn compile_source(
    name: &str,
    path: &Path,
    text: String,
    ledger: &mut LayoutLedger,
) -> Result<CompiledFont, ErrorReport> {
    let bdf = match BdfFont::parse(&text) {
        Ok(bdf) => bdf,
        Err(e) => return Err(ErrorReport::from_parse_error(&e, path, text)),
    };
    let compile_failed =
        |e: Error| ErrorReport::message(format!("failed to compile '{}': {e}", path.display()));
    let record = FontRecord::from_bdf(name, bdf).map_err(compile_failed)?;
    let bytes = record.compile(ledger).map_err(compile_failed)?;
    Ok(CompiledFont { record, bytes })
}

/// The ledger as pretty-printed JSON.
pub fn layout_json(ledger: &LayoutLedger) -> Result<String, ErrorReport> {
    serde_json::to_string_pretty(ledger)
        .map_err(|e| ErrorReport::message(format!("failed to serialize layout: {e}")))
}
