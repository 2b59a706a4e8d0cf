//! Side by side hex diffs, for comparing compiled glyphs and fonts.

use std::fmt::{self, Write};

use nu_ansi_term::{Color, Style};

/// Bytes shown per line; one glyph header.
const LINE_WIDTH: usize = 10;

#[macro_export]
macro_rules! assert_hex_eq {
    ($left:expr, $right:expr$(,)?) => ({
        $crate::assert_hex_eq!(@ $left, $right, "", "");
    });
    ($left:expr, $right:expr, $($arg:tt)*) => ({
        $crate::assert_hex_eq!(@ $left, $right, ": ", $($arg)+);
    });
    (@ $left:expr, $right:expr, $maybe_colon:expr, $($arg:tt)*) => ({
        let hex_diff = $crate::hex_diff::HexDiff::new($left, $right);
        if !hex_diff.is_equal() {
            ::std::panic!("assertion failed: `(left == right)`{}{}\n\n{}\n",
               $maybe_colon,
               format_args!($($arg)*),
               hex_diff,
            )
        }
    });
}

pub(crate) struct HexDiff<'a> {
    left: &'a [u8],
    right: &'a [u8],
}

#[derive(Clone, Copy)]
enum Cell {
    Same(u8),
    Changed(u8),
    Gap,
}

impl<'a> HexDiff<'a> {
    pub(crate) fn new(left: &'a [u8], right: &'a [u8]) -> Self {
        HexDiff { left, right }
    }

    pub(crate) fn is_equal(&self) -> bool {
        self.left == self.right
    }

    /// Align both sides, padding with gaps so common bytes line up.
    fn columns(&self) -> (Vec<Cell>, Vec<Cell>) {
        let mut left = Vec::new();
        let mut right = Vec::new();
        for item in diff::slice(self.left, self.right) {
            match item {
                diff::Result::Both(byte, _) => {
                    let len = left.len().max(right.len());
                    left.resize(len, Cell::Gap);
                    right.resize(len, Cell::Gap);
                    left.push(Cell::Same(*byte));
                    right.push(Cell::Same(*byte));
                }
                diff::Result::Left(byte) => left.push(Cell::Changed(*byte)),
                diff::Result::Right(byte) => right.push(Cell::Changed(*byte)),
            }
        }
        let len = left.len().max(right.len());
        left.resize(len, Cell::Gap);
        right.resize(len, Cell::Gap);
        (left, right)
    }
}

impl fmt::Display for HexDiff<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (left, right) = self.columns();
        let separator = Color::White.dimmed();
        for (line, (l, r)) in left
            .chunks(LINE_WIDTH)
            .zip(right.chunks(LINE_WIDTH))
            .enumerate()
        {
            write!(f, "{:04x} ", line * LINE_WIDTH)?;
            write_cells(f, l)?;
            write!(f, "{}", separator.paint("| "))?;
            write_cells(f, r)?;
            f.write_char('\n')?;
        }
        Ok(())
    }
}

fn write_cells(f: &mut fmt::Formatter<'_>, cells: &[Cell]) -> fmt::Result {
    for cell in cells {
        match cell {
            Cell::Same(byte) => write!(f, "{byte:02x} ")?,
            Cell::Changed(byte) => write!(f, "{} ", Color::Red.paint(format!("{byte:02x}")))?,
            Cell::Gap => write!(f, "{} ", Style::new().dimmed().paint("__"))?,
        }
    }
    for _ in cells.len()..LINE_WIDTH {
        f.write_str("   ")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_slices_pass() {
        assert_hex_eq!(&[1, 2, 3], &[1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn unequal_slices_panic() {
        assert_hex_eq!(&[1, 2, 3], &[1, 4, 3], "glyph {}", 'A');
    }

    #[test]
    fn gaps_align_common_bytes() {
        let diff = HexDiff::new(&[0xaa, 0xbb], &[0xaa, 0x01, 0xbb]);
        let (left, right) = diff.columns();
        assert_eq!(left.len(), right.len());
        assert!(matches!(left[1], Cell::Gap));
        assert!(matches!(right[1], Cell::Changed(0x01)));
    }
}
