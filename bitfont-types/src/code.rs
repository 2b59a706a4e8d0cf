use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

/// The identifier of a glyph, as written after `STARTCHAR`.
///
/// In the sources we compile this token is always exactly four hex digits,
/// copied verbatim into the two byte code field of each glyph. Shorter
/// tokens are rejected: `A` is a glyph name, not code `000a`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct GlyphCode(u16);

impl GlyphCode {
    /// The code of the synthesized "character not found" glyph.
    pub const MISSING: GlyphCode = GlyphCode(0);

    /// The number of hex digits in a `STARTCHAR` token.
    pub const TOKEN_LEN: usize = 4;

    pub const fn new(raw: u16) -> Self {
        GlyphCode(raw)
    }

    pub const fn to_u16(self) -> u16 {
        self.0
    }

    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    pub const fn from_be_bytes(bytes: [u8; 2]) -> Self {
        GlyphCode(u16::from_be_bytes(bytes))
    }
}

/// An error returned when a `STARTCHAR` token is not a valid glyph code.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidGlyphCode {
    /// The token was not exactly 4 characters long.
    InvalidLength(usize),
    /// The token contained something other than a hex digit.
    InvalidChar { pos: usize, ch: char },
}

impl FromStr for GlyphCode {
    type Err = InvalidGlyphCode;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let len = src.chars().count();
        if len != GlyphCode::TOKEN_LEN {
            return Err(InvalidGlyphCode::InvalidLength(len));
        }
        if let Some((pos, ch)) = src.chars().enumerate().find(|(_, c)| !c.is_ascii_hexdigit()) {
            return Err(InvalidGlyphCode::InvalidChar { pos, ch });
        }
        u16::from_str_radix(src, 16)
            .map(GlyphCode)
            .map_err(|_| InvalidGlyphCode::InvalidLength(len))
    }
}

impl From<u16> for GlyphCode {
    fn from(src: u16) -> Self {
        GlyphCode(src)
    }
}

impl From<GlyphCode> for u16 {
    fn from(src: GlyphCode) -> u16 {
        src.0
    }
}

impl Display for GlyphCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04x}", self.0)
    }
}

impl Debug for GlyphCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "GlyphCode({self})")
    }
}

impl Display for InvalidGlyphCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidGlyphCode::InvalidLength(len) => {
                write!(f, "glyph code must be 4 hex digits, found {len}")
            }
            InvalidGlyphCode::InvalidChar { pos, ch } => {
                write!(f, "invalid character {ch:?} at index {pos} of glyph code")
            }
        }
    }
}

impl std::error::Error for InvalidGlyphCode {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_codes() {
        assert_eq!("0041".parse::<GlyphCode>(), Ok(GlyphCode::new(0x41)));
        assert_eq!("FFFF".parse::<GlyphCode>(), Ok(GlyphCode::new(0xffff)));
        assert_eq!("00fa".parse::<GlyphCode>(), Ok(GlyphCode::new(0xfa)));
        assert_eq!(
            "".parse::<GlyphCode>(),
            Err(InvalidGlyphCode::InvalidLength(0))
        );
        assert_eq!("A".parse::<GlyphCode>(), Err(InvalidGlyphCode::InvalidLength(1)));
        assert_eq!("41".parse::<GlyphCode>(), Err(InvalidGlyphCode::InvalidLength(2)));
        assert_eq!(
            "10000".parse::<GlyphCode>(),
            Err(InvalidGlyphCode::InvalidLength(5))
        );
        assert_eq!(
            "00g1".parse::<GlyphCode>(),
            Err(InvalidGlyphCode::InvalidChar { pos: 2, ch: 'g' })
        );
    }

    #[test]
    fn display_is_verbatim_width() {
        assert_eq!(GlyphCode::new(0x41).to_string(), "0041");
        assert_eq!(GlyphCode::MISSING.to_string(), "0000");
    }

    #[test]
    fn be_bytes() {
        let code = GlyphCode::new(0x06fc);
        assert_eq!(code.to_be_bytes(), [0x06, 0xfc]);
        assert_eq!(GlyphCode::from_be_bytes([0x06, 0xfc]), code);
    }
}
