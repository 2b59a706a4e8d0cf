//! The pre-compilation validation pass

use std::fmt::{Debug, Display};

use bitfont_types::{BoundingBox, DeviceWidth, FieldType};

/// Pre-compilation validation of font records.
///
/// Source files can describe metrics that do not fit in the fields of a
/// compiled font, or bitmaps whose shape disagrees with their bounding box.
/// Rather than letting those values be truncated, they are reported here,
/// before anything is written.
pub trait Validate {
    /// Ensure that this record is well-formed, reporting any errors.
    ///
    /// This calls [validate_impl][Self::validate_impl] and collects any errors.
    fn validate(&self) -> Result<(), ValidationReport> {
        let mut ctx = Default::default();
        self.validate_impl(&mut ctx);
        if ctx.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationReport { errors: ctx.errors })
        }
    }

    /// Validate this record.
    ///
    /// Implementations look something like:
    ///
    /// ```rust
    /// # use write_bitfonts::validate::{Validate, ValidationCtx};
    /// # use write_bitfonts::types::FieldType;
    /// struct MyRecord {
    ///     advance: u32,
    /// }
    ///
    /// impl Validate for MyRecord {
    ///     fn validate_impl(&self, ctx: &mut ValidationCtx) {
    ///         ctx.in_table("MyRecord", |ctx| {
    ///             ctx.in_field("advance", |ctx| ctx.check_range(FieldType::U8, self.advance))
    ///         })
    ///     }
    /// }
    /// ```
    fn validate_impl(&self, ctx: &mut ValidationCtx);
}

/// A context for collecting validation errors.
///
/// This is responsible for tracking the position in the tree at which
/// a given error is reported.
///
/// ## paths/locations
///
/// As validation travels down through the records, the path is recorded
/// via [in_table][Self::in_table], [in_field][Self::in_field] and [in_item][Self::in_item].
#[derive(Clone, Debug, Default)]
pub struct ValidationCtx {
    cur_location: Vec<LocationElem>,
    errors: Vec<ValidationError>,
}

#[derive(Debug, Clone)]
struct ValidationError {
    error: String,
    location: Vec<LocationElem>,
}

/// One or more validation errors.
#[derive(Clone)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

#[derive(Debug, Clone)]
enum LocationElem {
    Table(&'static str),
    Field(&'static str),
    Index(usize),
}

impl ValidationCtx {
    /// Run the provided closure in the context of a new record.
    ///
    /// Errors reported in the closure will include the provided identifer
    /// in their path.
    pub fn in_table(&mut self, name: &'static str, f: impl FnOnce(&mut ValidationCtx)) {
        self.with_elem(LocationElem::Table(name), f);
    }

    /// Run the provided closure in the context of a new field.
    pub fn in_field(&mut self, name: &'static str, f: impl FnOnce(&mut ValidationCtx)) {
        self.with_elem(LocationElem::Field(name), f);
    }

    /// Run the provided closure in the context of the `index`th item of a list.
    pub fn in_item(&mut self, index: usize, f: impl FnOnce(&mut ValidationCtx)) {
        self.with_elem(LocationElem::Index(index), f);
    }

    /// Report a new error, associating it with the current path.
    pub fn report(&mut self, msg: impl Display) {
        self.errors.push(ValidationError {
            location: self.cur_location.clone(),
            error: msg.to_string(),
        });
    }

    /// Report an error if `value` does not fit in a field of type `ty`.
    pub fn check_range(&mut self, ty: FieldType, value: impl Into<i64>) {
        let value = value.into();
        if !ty.contains(value) {
            self.report(format_args!(
                "value {value} out of range for {ty} ({}..={})",
                ty.min_value(),
                ty.max_value()
            ));
        }
    }

    fn with_elem(&mut self, elem: LocationElem, f: impl FnOnce(&mut ValidationCtx)) {
        self.cur_location.push(elem);
        f(self);
        self.cur_location.pop();
    }
}

impl ValidationReport {
    /// The number of errors in this report.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let [error] = self.errors.as_slice() {
            return writeln!(f, "Validation error:\n{error}");
        }

        writeln!(f, "{} validation errors:", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "#{}\n{error}", i + 1)?;
        }
        Ok(())
    }
}

impl Debug for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl std::error::Error for ValidationReport {}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\"{}\"", self.error)?;
        let mut indent = 0;
        for (i, elem) in self.location.iter().enumerate() {
            match elem {
                LocationElem::Table(name) if i == 0 => write!(f, "in: {name}"),
                LocationElem::Table(name) => {
                    indent += 1;
                    write!(f, "\n{:indent$}{name}", "", indent = indent * 2)
                }
                LocationElem::Field(name) => write!(f, ".{name}"),
                LocationElem::Index(idx) => write!(f, "[{idx}]"),
            }?;
        }
        writeln!(f)
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        for (i, item) in self.iter().enumerate() {
            ctx.in_item(i, |ctx| item.validate_impl(ctx));
        }
    }
}

impl Validate for BoundingBox {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_field("width", |ctx| ctx.check_range(FieldType::U8, self.width));
        ctx.in_field("height", |ctx| ctx.check_range(FieldType::U8, self.height));
        ctx.in_field("x_offset", |ctx| ctx.check_range(FieldType::I8, self.x_offset));
        ctx.in_field("y_offset", |ctx| ctx.check_range(FieldType::I8, self.y_offset));
    }
}

impl Validate for DeviceWidth {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_field("x", |ctx| ctx.check_range(FieldType::U8, self.x));
        ctx.in_field("y", |ctx| ctx.check_range(FieldType::U8, self.y));
    }
}
