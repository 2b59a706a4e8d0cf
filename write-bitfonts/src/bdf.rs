//! Parsing glyph sources in the Glyph Bitmap Distribution Format.
//!
//! Only the subset of BDF needed to compile a font is understood: the point
//! size, font bounding box, ascent and descent, the copyright notice, the
//! declared character count, and for each glyph its code, device width,
//! bounding box and bitmap. Every other line is skipped.
//!
//! The parser is a small state machine. While scanning, lines are matched
//! on their first token (case-insensitively); after a `BITMAP` line every
//! line up to `ENDCHAR` is a row of hex pixels.

use std::{fmt::Display, str::FromStr};

use bitfont_types::{BoundingBox, DeviceWidth, GlyphCode, InvalidGlyphCode};

use crate::glyph::GlyphRecord;

const SIZE: &str = "SIZE";
const FONTBOUNDINGBOX: &str = "FONTBOUNDINGBOX";
const FONT_ASCENT: &str = "FONT_ASCENT";
const FONT_DESCENT: &str = "FONT_DESCENT";
const COPYRIGHT: &str = "COPYRIGHT";
const CHARS: &str = "CHARS";
const STARTCHAR: &str = "STARTCHAR";
const DWIDTH: &str = "DWIDTH";
const BBX: &str = "BBX";
const BITMAP: &str = "BITMAP";
const ENDCHAR: &str = "ENDCHAR";

/// The contents of a BDF file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BdfFont {
    pub size: u32,
    pub bounding_box: BoundingBox,
    pub ascent: u32,
    pub descent: u32,
    /// The copyright notice, without its surrounding quotes.
    pub copyright: String,
    /// The character count given by `CHARS`.
    ///
    /// This is not checked against the number of glyphs.
    pub declared_char_count: u32,
    /// Glyphs in source order.
    pub glyphs: Vec<GlyphRecord>,
}

/// An error encountered while parsing a BDF file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    line: usize,
    kind: ParseErrorKind,
}

/// The kinds of errors that can occur while parsing a BDF file.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// A required field never appeared.
    MissingField(&'static str),
    /// A field's value was missing or not an integer of the expected sign.
    InvalidValue {
        keyword: &'static str,
        value: String,
    },
    InvalidGlyphCode(InvalidGlyphCode),
    /// A bitmap row contained something other than hex digits.
    InvalidHex(String),
    /// A bitmap row had fewer pixels than the glyph is wide.
    ShortRow { expected: u32, found: usize },
    /// A glyph had a different number of rows than it is tall.
    RowCount {
        code: GlyphCode,
        expected: u32,
        found: usize,
    },
    /// A keyword appeared where it is not allowed.
    Unexpected(&'static str),
    /// The input ended inside a glyph.
    UnexpectedEof,
}

impl ParseError {
    fn new(line: usize, kind: ParseErrorKind) -> Self {
        ParseError { line, kind }
    }

    /// The 1-based line on which the error occured.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

impl BdfFont {
    /// Parse the text of a BDF file.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut parser = Parser::default();
        let mut state = State::Scanning(None);
        let mut last_line = 0;
        for (i, line) in text.lines().enumerate() {
            last_line = i + 1;
            state = parser
                .step(state, line, last_line)
                .map_err(|kind| ParseError::new(last_line, kind))?;
        }
        parser.finish(state, last_line.max(1))
    }
}

impl FromStr for BdfFont {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BdfFont::parse(s)
    }
}

/// A glyph whose `BITMAP` has not been reached.
#[derive(Debug)]
struct PendingGlyph {
    code: GlyphCode,
    line: usize,
    device_width: Option<DeviceWidth>,
    bounding_box: Option<BoundingBox>,
}

#[derive(Debug)]
enum State {
    /// Matching keywords, possibly inside a glyph.
    Scanning(Option<PendingGlyph>),
    /// Collecting the rows of a glyph's bitmap.
    ReadingBitmap {
        glyph: PendingGlyph,
        device_width: DeviceWidth,
        bounding_box: BoundingBox,
        rows: Vec<Vec<bool>>,
    },
}

#[derive(Debug, Default)]
struct Parser {
    size: Option<u32>,
    bounding_box: Option<BoundingBox>,
    ascent: Option<u32>,
    descent: Option<u32>,
    copyright: Option<String>,
    declared_char_count: Option<u32>,
    glyphs: Vec<GlyphRecord>,
}

impl Parser {
    fn step(&mut self, state: State, line: &str, line_no: usize) -> Result<State, ParseErrorKind> {
        let (keyword, rest) = split_keyword(line);
        match state {
            State::ReadingBitmap {
                glyph,
                device_width,
                bounding_box,
                rows,
            } if keyword.eq_ignore_ascii_case(ENDCHAR) => {
                if rows.len() != bounding_box.height as usize {
                    return Err(ParseErrorKind::RowCount {
                        code: glyph.code,
                        expected: bounding_box.height,
                        found: rows.len(),
                    });
                }
                log::trace!("glyph {} ends on line {line_no}", glyph.code);
                self.glyphs.push(GlyphRecord::new(
                    glyph.code,
                    device_width,
                    bounding_box,
                    rows,
                ));
                Ok(State::Scanning(None))
            }
            State::ReadingBitmap {
                glyph,
                device_width,
                bounding_box,
                mut rows,
            } => {
                rows.push(parse_row(line.trim(), bounding_box.width)?);
                Ok(State::ReadingBitmap {
                    glyph,
                    device_width,
                    bounding_box,
                    rows,
                })
            }
            State::Scanning(glyph) => self.scan(glyph, keyword, rest, line_no),
        }
    }

    fn scan(
        &mut self,
        mut glyph: Option<PendingGlyph>,
        keyword: &str,
        rest: &str,
        line_no: usize,
    ) -> Result<State, ParseErrorKind> {
        let is = |name: &str| keyword.eq_ignore_ascii_case(name);
        let mut args = rest.split_whitespace();

        if is(SIZE) {
            self.size = Some(value(SIZE, args.next())?);
        } else if is(FONTBOUNDINGBOX) {
            self.bounding_box = Some(bounding_box(FONTBOUNDINGBOX, &mut args)?);
        } else if is(FONT_ASCENT) {
            self.ascent = Some(value(FONT_ASCENT, args.next())?);
        } else if is(FONT_DESCENT) {
            self.descent = Some(value(FONT_DESCENT, args.next())?);
        } else if is(COPYRIGHT) {
            self.copyright = Some(unquote(rest).to_owned());
        } else if is(CHARS) {
            self.declared_char_count = Some(value(CHARS, args.next())?);
        } else if is(STARTCHAR) {
            if glyph.is_some() {
                return Err(ParseErrorKind::Unexpected(STARTCHAR));
            }
            let code = args
                .next()
                .unwrap_or_default()
                .parse::<GlyphCode>()
                .map_err(ParseErrorKind::InvalidGlyphCode)?;
            log::trace!("glyph {code} starts on line {line_no}");
            glyph = Some(PendingGlyph {
                code,
                line: line_no,
                device_width: None,
                bounding_box: None,
            });
        } else if is(DWIDTH) || is(BBX) {
            let Some(glyph) = glyph.as_mut() else {
                log::debug!("ignoring {keyword} outside of a glyph on line {line_no}");
                return Ok(State::Scanning(None));
            };
            if is(DWIDTH) {
                glyph.device_width = Some(DeviceWidth::new(
                    value(DWIDTH, args.next())?,
                    value(DWIDTH, args.next())?,
                ));
            } else {
                glyph.bounding_box = Some(bounding_box(BBX, &mut args)?);
            }
        } else if is(BITMAP) {
            let glyph = glyph.ok_or(ParseErrorKind::Unexpected(BITMAP))?;
            let bounding_box = glyph.bounding_box.ok_or(ParseErrorKind::MissingField(BBX))?;
            let device_width = glyph
                .device_width
                .ok_or(ParseErrorKind::MissingField(DWIDTH))?;
            return Ok(State::ReadingBitmap {
                glyph,
                device_width,
                bounding_box,
                rows: Vec::new(),
            });
        } else if is(ENDCHAR) {
            return Err(match glyph {
                Some(_) => ParseErrorKind::MissingField(BITMAP),
                None => ParseErrorKind::Unexpected(ENDCHAR),
            });
        }
        Ok(State::Scanning(glyph))
    }

    fn finish(self, state: State, last_line: usize) -> Result<BdfFont, ParseError> {
        match state {
            State::Scanning(Some(glyph)) | State::ReadingBitmap { glyph, .. } => {
                return Err(ParseError::new(glyph.line, ParseErrorKind::UnexpectedEof));
            }
            State::Scanning(None) => (),
        }
        let missing = |field| ParseError::new(last_line, ParseErrorKind::MissingField(field));
        let font = BdfFont {
            size: self.size.ok_or_else(|| missing(SIZE))?,
            bounding_box: self.bounding_box.ok_or_else(|| missing(FONTBOUNDINGBOX))?,
            ascent: self.ascent.ok_or_else(|| missing(FONT_ASCENT))?,
            descent: self.descent.ok_or_else(|| missing(FONT_DESCENT))?,
            copyright: self.copyright.unwrap_or_default(),
            declared_char_count: self.declared_char_count.ok_or_else(|| missing(CHARS))?,
            glyphs: self.glyphs,
        };
        if font.glyphs.len() != font.declared_char_count as usize {
            log::warn!(
                "font declares {} characters but defines {}",
                font.declared_char_count,
                font.glyphs.len()
            );
        }
        log::debug!(
            "parsed {} glyphs at size {}",
            font.glyphs.len(),
            font.size
        );
        Ok(font)
    }
}

fn split_keyword(line: &str) -> (&str, &str) {
    let line = line.trim_start();
    match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line.trim_end(), ""),
    }
}

fn value<T: FromStr>(keyword: &'static str, token: Option<&str>) -> Result<T, ParseErrorKind> {
    let token = token.unwrap_or_default();
    token.parse().map_err(|_| ParseErrorKind::InvalidValue {
        keyword,
        value: token.to_owned(),
    })
}

fn bounding_box<'a>(
    keyword: &'static str,
    args: &mut impl Iterator<Item = &'a str>,
) -> Result<BoundingBox, ParseErrorKind> {
    Ok(BoundingBox::new(
        value(keyword, args.next())?,
        value(keyword, args.next())?,
        value(keyword, args.next())?,
        value(keyword, args.next())?,
    ))
}

fn unquote(text: &str) -> &str {
    let text = text.strip_prefix('"').unwrap_or(text);
    text.strip_suffix('"').unwrap_or(text)
}

/// Expand a row of hex digits to pixels, keeping the leftmost `width`.
fn parse_row(row: &str, width: u32) -> Result<Vec<bool>, ParseErrorKind> {
    let mut pixels = Vec::with_capacity(row.len() * 4);
    for digit in row.chars() {
        let nibble = digit
            .to_digit(16)
            .ok_or_else(|| ParseErrorKind::InvalidHex(row.to_owned()))?;
        pixels.extend((0..4).rev().map(|bit| nibble & (1 << bit) != 0));
    }
    if pixels.len() < width as usize {
        return Err(ParseErrorKind::ShortRow {
            expected: width,
            found: pixels.len(),
        });
    }
    pixels.truncate(width as usize);
    Ok(pixels)
}

impl Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorKind::MissingField(field) => write!(f, "missing required field {field}"),
            ParseErrorKind::InvalidValue { keyword, value } => {
                write!(f, "invalid value '{value}' for {keyword}")
            }
            ParseErrorKind::InvalidGlyphCode(err) => write!(f, "invalid glyph code: {err}"),
            ParseErrorKind::InvalidHex(row) => write!(f, "bitmap row '{row}' is not hex"),
            ParseErrorKind::ShortRow { expected, found } => write!(
                f,
                "bitmap row has {found} pixels, but the glyph is {expected} wide"
            ),
            ParseErrorKind::RowCount {
                code,
                expected,
                found,
            } => write!(
                f,
                "glyph {code} has {found} bitmap rows, but is {expected} tall"
            ),
            ParseErrorKind::Unexpected(keyword) => write!(f, "unexpected {keyword}"),
            ParseErrorKind::UnexpectedEof => f.write_str("unterminated glyph at end of input"),
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ParseErrorKind::InvalidGlyphCode(err) => Some(err),
            _ => None,
        }
    }
}
