//! rendering compiled fonts as C++ source

use std::fmt::Write;

use bitfont_types::LayoutLedger;
use write_bitfonts::FontRecord;

use crate::Config;

/// Bytes per line in generated array literals.
const BYTES_PER_LINE: usize = 20;

/// A font that has been compiled, ready to be written out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledFont {
    pub record: FontRecord,
    pub bytes: Vec<u8>,
}

impl CompiledFont {
    /// The name of the generated array, e.g. `bailleul_8_pt`.
    ///
    /// Characters that cannot appear in a C identifier are replaced with `_`.
    pub fn variable_name(&self) -> String {
        let name = format!("{}_{}_pt", self.record.name, self.record.metrics.size);
        name.chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect()
    }

    /// The declared length of the array, including the string literal's NUL.
    pub fn array_len(&self) -> usize {
        self.bytes.len() + 1
    }
}

/// Generate the header: layout defines, then an `extern` for each font.
pub fn header(config: &Config, ledger: &LayoutLedger, fonts: &[CompiledFont]) -> String {
    let mut out = String::new();
    // writing to a String cannot fail
    let _ = write_header(&mut out, config, ledger, fonts);
    out
}

/// Generate the source defining each font's data.
///
/// `include` is the name of the generated header.
pub fn source(config: &Config, include: &str, fonts: &[CompiledFont]) -> String {
    let mut out = String::new();
    let _ = write_source(&mut out, config, include, fonts);
    out
}

fn write_header(
    out: &mut String,
    config: &Config,
    ledger: &LayoutLedger,
    fonts: &[CompiledFont],
) -> std::fmt::Result {
    write_license(out, config)?;
    writeln!(out, "#pragma once\n")?;
    writeln!(out, "#include \"{}\"\n", config.platform_include)?;
    writeln!(out, "namespace {} {{\n", config.namespace)?;
    for (name, entry) in ledger.iter() {
        writeln!(out, "#define {name} {}", entry.offset)?;
        if let Some(ty) = entry.ty {
            writeln!(out, "#define {name}_TYPE {}", ty.c_type())?;
        }
    }
    for font in fonts {
        write!(
            out,
            "\n{}extern uint8_t {}[{}];\n",
            font.record.doc_comment(),
            font.variable_name(),
            font.array_len()
        )?;
    }
    writeln!(out, "\n}} // namespace {}", config.namespace)
}

fn write_source(
    out: &mut String,
    config: &Config,
    include: &str,
    fonts: &[CompiledFont],
) -> std::fmt::Result {
    write_license(out, config)?;
    writeln!(out, "#include \"{include}\"\n")?;
    writeln!(out, "namespace {} {{", config.namespace)?;
    for font in fonts {
        write!(
            out,
            "\n{}uint8_t {}[{}] =",
            font.record.doc_comment(),
            font.variable_name(),
            font.array_len()
        )?;
        for line in font.bytes.chunks(BYTES_PER_LINE) {
            out.push_str("\n  \"");
            for byte in line {
                write!(out, "\\x{byte:02x}")?;
            }
            out.push('"');
        }
        out.push_str(";\n");
    }
    writeln!(out, "\n}} // namespace {}", config.namespace)
}

fn write_license(out: &mut String, config: &Config) -> std::fmt::Result {
    let Some(license) = config.license.as_deref() else {
        return Ok(());
    };
    for line in license.lines().map(str::trim_end) {
        if line.is_empty() {
            writeln!(out, "//")?;
        } else {
            writeln!(out, "// {line}")?;
        }
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitfont_types::{layout::font, FieldType};
    use pretty_assertions::assert_eq;
    use write_bitfonts::FontMetrics;

    fn config(license: Option<&str>) -> Config {
        Config {
            source_dir: "fonts".into(),
            namespace: "Display::Font".into(),
            platform_include: "esp_types.h".into(),
            license: license.map(Into::into),
            fonts: Vec::new(),
        }
    }

    fn compiled(name: &str, bytes: Vec<u8>) -> CompiledFont {
        let metrics = FontMetrics {
            size: 8,
            declared_char_count: 95,
            ..Default::default()
        };
        CompiledFont {
            record: FontRecord::new(name, metrics, "Copyright 2021", []).unwrap(),
            bytes,
        }
    }

    #[test]
    fn variable_names() {
        let font = compiled("bailleul", vec![0; 3]);
        assert_eq!(font.variable_name(), "bailleul_8_pt");
        assert_eq!(font.array_len(), 4);
        assert_eq!(compiled("my-font", vec![]).variable_name(), "my_font_8_pt");
    }

    #[test]
    fn header_layout() {
        let mut ledger = LayoutLedger::new();
        ledger.record(font::SIZE, 0, FieldType::U8);
        ledger.record(font::CHARACTERS, 1, FieldType::U16);
        ledger.mark(font::FIRST_CHARACTER, 3);
        let fonts = [compiled("bailleul", vec![0; 41])];
        let header = header(&config(Some("SPDX-License-Identifier: MIT")), &ledger, &fonts);
        assert_eq!(
            header,
            "\
// SPDX-License-Identifier: MIT

#pragma once

#include \"esp_types.h\"

namespace Display::Font {

#define FONT_SIZE 0
#define FONT_SIZE_TYPE uint8_t
#define FONT_CHARACTERS 1
#define FONT_CHARACTERS_TYPE uint16_t
#define FONT_FIRST_CHARACTER 3

// bailleul
//   - Copyright 2021
//   - Size: 8
//   - Characters: 95
extern uint8_t bailleul_8_pt[42];

} // namespace Display::Font
"
        );
    }

    #[test]
    fn source_wraps_lines() {
        let bytes = (0u8..25).collect::<Vec<_>>();
        let source = source(&config(None), "Fonts.hpp", &[compiled("bailleul", bytes)]);
        assert_eq!(
            source,
            "\
#include \"Fonts.hpp\"

namespace Display::Font {

// bailleul
//   - Copyright 2021
//   - Size: 8
//   - Characters: 95
uint8_t bailleul_8_pt[26] =
  \"\\x00\\x01\\x02\\x03\\x04\\x05\\x06\\x07\\x08\\x09\\x0a\\x0b\\x0c\\x0d\\x0e\\x0f\\x10\\x11\\x12\\x13\"
  \"\\x14\\x15\\x16\\x17\\x18\";

} // namespace Display::Font
"
        );
    }

    #[test]
    fn multi_line_license() {
        let mut comment = String::new();
        let config = config(Some(
            "SPDX-FileCopyrightText: 2023 Someone\n\nSPDX-License-Identifier: GPL-3.0-or-later",
        ));
        write_license(&mut comment, &config).unwrap();
        assert_eq!(
            comment,
            "// SPDX-FileCopyrightText: 2023 Someone\n//\n// SPDX-License-Identifier: GPL-3.0-or-later\n\n"
        );
    }
}
