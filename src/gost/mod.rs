//! GOST/ESKD drafting standard support.
//!
//! This module holds the standard-driven pieces of division scheme
//! planning: the designation format of part codes and the drawing sheet
//! geometry of GOST 2.301.
//!
//! # Example
//!
//! ```
//! use kompas_scheme::gost::designation;
//! use kompas_scheme::gost::sheet::{Orientation, Sheet, SheetFormat};
//!
//! assert!(designation::is_valid("1234.00.00.000"));
//!
//! let sheet = Sheet::new(SheetFormat::A3, Orientation::Landscape);
//! assert!((sheet.width - 420.0).abs() < f64::EPSILON);
//! ```

pub mod designation;
pub mod sheet;

pub use sheet::{Margins, Orientation, Sheet, SheetFormat};
