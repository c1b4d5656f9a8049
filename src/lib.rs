//! kompas-scheme: division scheme planning core for KOMPAS-3D automation
//!
//! This library turns a flat list of hierarchical part-components into a
//! validated hierarchy, a deterministic 2D layout on a GOST drawing sheet,
//! and an ordered bill of materials. It is the computational core of a
//! KOMPAS-3D automation pipeline for division schemes (GOST 2.701 type E1).
//!
//! # Architecture
//!
//! The core is a pure function over its input. Rendering into a CAD
//! document, persistence and transport are external collaborators:
//!
//! - **Validation**: designation format per the ESKD pattern, structural
//!   hierarchy checks (duplicates, dangling references, cycles, levels)
//! - **Layout**: box and connector placement under tree, vertical or
//!   horizontal strategies, constrained to the sheet's usable area
//! - **BOM**: depth-first parts listing with optional quantity roll-up
//!
//! Every validation problem is accumulated and returned as data; nothing in
//! the pipeline fails fast or performs I/O. The bundled [`render`] seam is
//! the only place that touches the filesystem.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading and validation
//! - [`error`] — Configuration error types
//! - [`gost`] — GOST designation format and sheet geometry
//! - [`layout`] — Layout strategies and placement validation
//! - [`render`] — Renderer seam and the plan-file renderer
//! - [`scheme`] — Request model, hierarchy, BOM, assembler

pub mod config;
pub mod error;
pub mod gost;
pub mod layout;
pub mod render;
pub mod scheme;
