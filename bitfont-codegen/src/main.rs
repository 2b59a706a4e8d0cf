//! Compile the bitmap fonts listed in a config file into C++ sources.
//!
//! With no output paths the generated header is written to stdout.

use std::path::Path;

use bitfont_codegen::{Compiled, Config, ErrorReport};
use miette::miette;

const DEFAULT_HEADER_NAME: &str = "Fonts.hpp";

fn main() -> miette::Result<()> {
    env_logger::init();
    let args = flags::Args::from_env().map_err(|e| miette!("{e}"))?;
    let config = Config::load(&args.config)?;
    let Compiled { fonts, ledger } = bitfont_codegen::compile_fonts(&config)?;

    let header = bitfont_codegen::header(&config, &ledger, &fonts);
    if args.header.is_none() && args.source.is_none() && args.layout_json.is_none() {
        print!("{header}");
        return Ok(());
    }

    if let Some(path) = &args.header {
        write_output(path, &header)?;
    }
    if let Some(path) = &args.source {
        let include = args
            .include
            .clone()
            .or_else(|| {
                args.header
                    .as_ref()
                    .and_then(|path| path.file_name())
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| DEFAULT_HEADER_NAME.to_owned());
        let source = bitfont_codegen::source(&config, &include, &fonts);
        write_output(path, &source)?;
    }
    if let Some(path) = &args.layout_json {
        let json = bitfont_codegen::layout_json(&ledger)?;
        write_output(path, &json)?;
    }
    Ok(())
}

fn write_output(path: &Path, contents: &str) -> Result<(), ErrorReport> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            ErrorReport::message(format!(
                "failed to create directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    log::info!("writing {} bytes to {}", contents.len(), path.display());
    std::fs::write(path, contents)
        .map_err(|e| ErrorReport::message(format!("error writing '{}': {e}", path.display())))
}

mod flags {
    use std::path::PathBuf;

    xflags::xflags! {
        /// Compile bitmap fonts into C++ sources
        cmd args {
            /// TOML file listing the fonts to compile
            required config: PathBuf
                /// Where to write the generated header
                optional --header header: PathBuf
                /// Where to write the generated source
                optional --source source: PathBuf
                /// Where to write the layout as JSON
                optional --layout-json layout_json: PathBuf
                /// The header name the source includes
                optional --include include: String
            }
    }
}
