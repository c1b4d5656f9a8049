//! Division scheme domain model and assembly pipeline.
//!
//! The pipeline turns a flat component list into a drawable scheme in
//! four stages, each usable on its own:
//!
//! 1. [`validation`] — accumulated error reporting across all stages
//! 2. [`hierarchy`] — parent links to a validated, cycle-free tree
//! 3. layout (see [`crate::layout`]) — boxes and connectors on a sheet
//! 4. [`bom`] — the ordered parts listing
//!
//! [`SchemeAssembler`] chains the stages for a whole
//! [`DivisionSchemeRequest`].

pub mod assembler;
pub mod bom;
pub mod component;
pub mod hierarchy;
pub mod request;
pub mod validation;

pub use assembler::SchemeAssembler;
pub use bom::{BomEntry, BomGenerator, QuantityRollup};
pub use component::{Component, TitleBlock};
pub use hierarchy::{Hierarchy, HierarchyBuilder, HierarchyNode};
pub use request::{DivisionScheme, DivisionSchemeRequest, SchemeResult};
pub use validation::{ErrorCategory, ErrorCode, ValidationError};
