//! The layout ledger: a symbolic description of compiled font data.
//!
//! While a font is being encoded, every field that is written is also recorded
//! here, along with its byte offset (relative to the start of the record that
//! contains it) and its declared type. Once encoding is finished the ledger
//! describes the font header and the layout of a single glyph record; firmware
//! uses it to index into the compiled data by constant offset.

use indexmap::IndexMap;

use crate::FieldType;

/// Names of the fields in a font header.
pub mod font {
    pub const SIZE: &str = "FONT_SIZE";
    pub const CHARACTERS: &str = "FONT_CHARACTERS";
    pub const BOUNDING_BOX_WIDTH: &str = "FONT_BOUNDING_BOX_WIDTH";
    pub const BOUNDING_BOX_HEIGHT: &str = "FONT_BOUNDING_BOX_HEIGHT";
    pub const BOUNDING_BOX_X_OFFSET: &str = "FONT_BOUNDING_BOX_X_OFFSET";
    pub const BOUNDING_BOX_Y_OFFSET: &str = "FONT_BOUNDING_BOX_Y_OFFSET";
    pub const ASCENT: &str = "FONT_ASCENT";
    pub const DESCENT: &str = "FONT_DESCENT";
    /// Marker: where the sequence of glyph records begins.
    pub const FIRST_CHARACTER: &str = "FONT_FIRST_CHARACTER";
}

/// Names of the fields in a glyph record.
pub mod glyph {
    pub const CODE: &str = "CHARACTER_CODE";
    /// Total length of the record, including this header.
    pub const BYTES: &str = "CHARACTER_BYTES";
    pub const DEVICE_WIDTH_X: &str = "CHARACTER_DEVICE_WIDTH_X";
    pub const DEVICE_WIDTH_Y: &str = "CHARACTER_DEVICE_WIDTH_Y";
    pub const BBX_WIDTH: &str = "CHARACTER_BBX_WIDTH";
    pub const BBX_HEIGHT: &str = "CHARACTER_BBX_HEIGHT";
    pub const BBX_X_OFFSET: &str = "CHARACTER_BBX_X_OFFSET";
    pub const BBX_Y_OFFSET: &str = "CHARACTER_BBX_Y_OFFSET";
    /// Marker: where the packed bitmap begins.
    pub const BITMAP: &str = "CHARACTER_BITMAP";
}

/// A single entry in a [`LayoutLedger`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedgerEntry {
    /// Byte offset from the start of the containing record.
    pub offset: usize,
    /// The declared type of the field, or `None` for position markers.
    pub ty: Option<FieldType>,
}

/// An ordered mapping from field name to offset and type.
///
/// Insertion order is layout order. Recording a name a second time replaces
/// the entry in place, so encoding a series of identically shaped records
/// leaves the ledger describing one of them.
///
/// A single ledger is shared by every font compiled in one invocation; all of
/// those fonts are expected to have the same layout. That expectation is not
/// enforced, but a record that changes an existing entry is logged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LayoutLedger {
    entries: IndexMap<String, LedgerEntry>,
}

impl LayoutLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a typed field at `offset`.
    pub fn record(&mut self, name: &str, offset: usize, ty: FieldType) {
        self.insert(name, LedgerEntry { offset, ty: Some(ty) });
    }

    /// Record an untyped position marker at `offset`.
    pub fn mark(&mut self, name: &str, offset: usize) {
        self.insert(name, LedgerEntry { offset, ty: None });
    }

    fn insert(&mut self, name: &str, entry: LedgerEntry) {
        match self.entries.get_mut(name) {
            Some(existing) => {
                if *existing != entry {
                    log::warn!(
                        "layout of '{name}' changed from {existing:?} to {entry:?}; \
                        all fonts in a batch should share one layout"
                    );
                }
                *existing = entry;
            }
            None => {
                self.entries.insert(name.to_owned(), entry);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<LedgerEntry> {
        self.entries.get(name).copied()
    }

    /// The offset recorded for `name`, if any.
    pub fn offset(&self, name: &str) -> Option<usize> {
        self.entries.get(name).map(|entry| entry.offset)
    }

    /// Iterate over all entries, in layout order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, LedgerEntry)> + '_ {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), *entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn insertion_order_is_layout_order() {
        let mut ledger = LayoutLedger::new();
        ledger.record(glyph::CODE, 0, FieldType::U16);
        ledger.record(glyph::BYTES, 2, FieldType::U16);
        ledger.mark(glyph::BITMAP, 4);
        let names = ledger.iter().map(|(name, _)| name).collect::<Vec<_>>();
        assert_eq!(names, [glyph::CODE, glyph::BYTES, glyph::BITMAP]);
        assert_eq!(ledger.get(glyph::BITMAP).unwrap().ty, None);
    }

    #[test]
    fn re_recording_keeps_position() {
        let mut ledger = LayoutLedger::new();
        ledger.record(font::SIZE, 0, FieldType::U8);
        ledger.record(font::CHARACTERS, 1, FieldType::U16);
        ledger.record(font::SIZE, 0, FieldType::U8);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.iter().next().unwrap().0, font::SIZE);

        // a conflicting record replaces the value but not the position
        ledger.record(font::SIZE, 3, FieldType::U16);
        assert_eq!(ledger.iter().next().unwrap().0, font::SIZE);
        assert_eq!(ledger.offset(font::SIZE), Some(3));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_ordered_map() {
        let mut ledger = LayoutLedger::new();
        ledger.record(font::SIZE, 0, FieldType::U8);
        ledger.mark(font::FIRST_CHARACTER, 9);
        let json = serde_json::to_string(&ledger).unwrap();
        assert_eq!(
            json,
            r#"{"FONT_SIZE":{"offset":0,"ty":{"width":1,"signed":false}},"FONT_FIRST_CHARACTER":{"offset":9,"ty":null}}"#
        );
    }
}
