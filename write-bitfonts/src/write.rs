use bitfont_types::{FieldType, LayoutLedger};

use crate::{error::Error, validate::Validate};

/// A type that can be written out as part of a compiled font.
///
/// This both handles writing big-endian bytes and describing where each
/// field ends up, via the [`LayoutLedger`] owned by the [TableWriter].
pub trait FontWrite {
    /// Write our data and the position of each of our fields into this [TableWriter].
    fn write_into(&self, writer: &mut TableWriter) -> Result<(), Error>;
}

/// Serializes records, recording the layout of every field as it goes.
///
/// Field offsets are recorded relative to the start of the record currently
/// being written; see [`TableWriter::write_record`].
#[derive(Debug)]
pub struct TableWriter<'a> {
    data: Vec<u8>,
    record_start: usize,
    ledger: &'a mut LayoutLedger,
}

/// A field that has been reserved, but whose value is not yet known.
///
/// This is used for fields that depend on the size of the data that follows
/// them; reserve the field, write the rest of the record, then
/// [patch][TableWriter::patch] in the value.
#[derive(Debug)]
#[must_use = "a reserved field must be patched"]
pub struct Placeholder {
    name: &'static str,
    pos: usize,
    ty: FieldType,
}

/// Attempt to serialize a record.
///
/// The record is validated first; if it is malformed this returns
/// [`Error::ValidationFailed`]. Otherwise it returns the encoded bytes, having
/// recorded the layout of every field into `ledger`.
pub fn dump_table<T: FontWrite + Validate>(
    table: &T,
    ledger: &mut LayoutLedger,
) -> Result<Vec<u8>, Error> {
    table.validate()?;
    let mut writer = TableWriter::new(ledger);
    writer.write_record(table)?;
    Ok(writer.into_data())
}

impl<'a> TableWriter<'a> {
    pub fn new(ledger: &'a mut LayoutLedger) -> Self {
        TableWriter {
            data: Vec::new(),
            record_start: 0,
            ledger,
        }
    }

    /// Write a nested record, returning its length in bytes.
    ///
    /// Offsets of fields written by `record` are relative to its start.
    pub fn write_record(&mut self, record: &dyn FontWrite) -> Result<usize, Error> {
        let outer_start = std::mem::replace(&mut self.record_start, self.data.len());
        let result = record.write_into(self);
        let len = self.data.len() - self.record_start;
        self.record_start = outer_start;
        result.map(|_| len)
    }

    /// The current position, relative to the start of the current record.
    pub fn position(&self) -> usize {
        self.data.len() - self.record_start
    }

    /// Encode `value` as a field of type `ty`, and record it in the ledger.
    pub fn write_field(
        &mut self,
        name: &'static str,
        ty: FieldType,
        value: impl Into<i64>,
    ) -> Result<(), Error> {
        let bytes = ty
            .encode(value.into())
            .map_err(|inner| Error::EncodingFailed { field: name, inner })?;
        self.ledger.record(name, self.position(), ty);
        self.write_slice(&bytes);
        Ok(())
    }

    /// Record an untyped marker at the current position.
    pub fn mark(&mut self, name: &'static str) {
        self.ledger.mark(name, self.position());
    }

    /// Write raw bytes into this record.
    ///
    /// The caller is responsible for ensuring bytes are in big-endian order.
    #[inline]
    pub fn write_slice(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes)
    }

    /// Reserve a field, writing zeros, and record it in the ledger.
    pub fn reserve(&mut self, name: &'static str, ty: FieldType) -> Placeholder {
        self.ledger.record(name, self.position(), ty);
        let pos = self.data.len();
        self.data.resize(pos + ty.width(), 0);
        Placeholder { name, pos, ty }
    }

    /// Overwrite a reserved field with its final value.
    pub fn patch(&mut self, placeholder: Placeholder, value: impl Into<i64>) -> Result<(), Error> {
        let Placeholder { name, pos, ty } = placeholder;
        let bytes = ty
            .encode(value.into())
            .map_err(|inner| Error::EncodingFailed { field: name, inner })?;
        self.data[pos..pos + ty.width()].copy_from_slice(&bytes);
        Ok(())
    }

    /// Finish writing, returning the encoded bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitfont_types::{LedgerEntry, ScalarError};

    struct Pair {
        first: u32,
        second: i32,
    }

    impl FontWrite for Pair {
        fn write_into(&self, writer: &mut TableWriter) -> Result<(), Error> {
            let len = writer.reserve("PAIR_LEN", FieldType::U8);
            writer.write_field("PAIR_FIRST", FieldType::U16, self.first)?;
            writer.write_field("PAIR_SECOND", FieldType::I8, self.second)?;
            let total = writer.position() as u32;
            writer.patch(len, total)
        }
    }

    struct TwoPairs(Pair, Pair);

    impl FontWrite for TwoPairs {
        fn write_into(&self, writer: &mut TableWriter) -> Result<(), Error> {
            writer.write_field("COUNT", FieldType::U8, 2u8)?;
            writer.mark("FIRST_PAIR");
            writer.write_record(&self.0)?;
            writer.write_record(&self.1)?;
            Ok(())
        }
    }

    #[test]
    fn nested_offsets_are_relative() {
        let mut ledger = LayoutLedger::new();
        let mut writer = TableWriter::new(&mut ledger);
        let len = writer
            .write_record(&TwoPairs(
                Pair {
                    first: 0x0102,
                    second: -1,
                },
                Pair {
                    first: 7,
                    second: 3,
                },
            ))
            .unwrap();
        let data = writer.into_data();
        assert_eq!(len, 9);
        assert_eq!(data, [2, 4, 1, 2, 0xff, 4, 0, 7, 3]);
        assert_eq!(
            ledger.get("PAIR_SECOND"),
            Some(LedgerEntry {
                offset: 3,
                ty: Some(FieldType::I8)
            })
        );
        assert_eq!(ledger.offset("FIRST_PAIR"), Some(1));
        assert_eq!(ledger.len(), 5);
    }

    #[test]
    fn encoding_errors_name_the_field() {
        let mut ledger = LayoutLedger::new();
        let mut writer = TableWriter::new(&mut ledger);
        let err = writer
            .write_record(&Pair {
                first: 1,
                second: 200,
            })
            .unwrap_err();
        match err {
            Error::EncodingFailed { field, inner } => {
                assert_eq!(field, "PAIR_SECOND");
                assert!(matches!(inner, ScalarError::OutOfRange { value: 200, .. }));
            }
            other => panic!("unexpected error {other}"),
        }
    }
}
