//! Request and result types for division scheme assembly.
//!
//! A [`DivisionSchemeRequest`] is the JSON document a caller hands to the
//! assembler; a [`SchemeResult`] is what comes back, carrying either the
//! assembled [`DivisionScheme`] or the accumulated validation errors.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::gost::sheet::{Orientation, Sheet, SheetFormat};
use crate::layout::{LayoutStrategy, SchemeLayout};
use crate::scheme::bom::BomEntry;
use crate::scheme::component::{Component, TitleBlock};
use crate::scheme::validation::ValidationError;

/// A complete request to build a division scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivisionSchemeRequest {
    /// Product name for the scheme header.
    pub product_name: String,
    /// ESKD designation of the product itself.
    pub product_code: String,
    /// Flat component list with parent references.
    pub components: Vec<Component>,
    /// Sheet format, A3 when omitted.
    #[serde(default)]
    pub gost_format: SheetFormat,
    /// Sheet orientation, landscape when omitted.
    #[serde(default)]
    pub orientation: Orientation,
    /// Placement strategy, tree when omitted.
    #[serde(default)]
    pub layout_type: LayoutStrategy,
    /// Title block fields; missing mandatory fields are reported during
    /// validation.
    #[serde(default, rename = "title_block_data")]
    pub title_block: TitleBlock,
    /// Whether to attach the BOM table to the scheme.
    #[serde(default = "default_true")]
    pub include_bom: bool,
    /// Multiply child quantities by their ancestors' in the BOM.
    #[serde(default)]
    pub rollup_quantities: bool,
    /// Where the renderer should write the document; overrides any
    /// configured output directory.
    #[serde(default)]
    pub output_path: Option<PathBuf>,
}

impl DivisionSchemeRequest {
    /// Creates a request with default sheet, strategy and BOM options.
    #[must_use]
    pub fn new(
        product_name: impl Into<String>,
        product_code: impl Into<String>,
        components: Vec<Component>,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            product_code: product_code.into(),
            components,
            gost_format: SheetFormat::default(),
            orientation: Orientation::default(),
            layout_type: LayoutStrategy::default(),
            title_block: TitleBlock::default(),
            include_bom: true,
            rollup_quantities: false,
            output_path: None,
        }
    }
}

const fn default_true() -> bool {
    true
}

/// An assembled division scheme ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivisionScheme {
    /// ESKD designation of the product.
    pub product_code: String,
    /// Product name.
    pub product_name: String,
    /// The resolved drawing sheet.
    pub sheet: Sheet,
    /// Title block fields as validated.
    pub title_block: TitleBlock,
    /// Computed box and connector placement.
    pub layout: SchemeLayout,
    /// Ordered BOM table, present when the request asked for one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bom: Option<Vec<BomEntry>>,
}

/// Outcome of a scheme assembly run.
///
/// `success` is `true` exactly when `errors` is empty; the scheme is
/// attached only on success. Warnings never block assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeResult {
    /// Whether assembly produced a scheme.
    pub success: bool,
    /// Accumulated validation errors, empty on success.
    pub errors: Vec<ValidationError>,
    /// Non-blocking findings.
    pub warnings: Vec<String>,
    /// The assembled scheme, on success only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<DivisionScheme>,
}

impl SchemeResult {
    /// Builds a successful result carrying the scheme.
    #[must_use]
    pub fn success(scheme: DivisionScheme, warnings: Vec<String>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            scheme: Some(scheme),
        }
    }

    /// Builds a failed result carrying the accumulated errors.
    #[must_use]
    pub fn failure(errors: Vec<ValidationError>, warnings: Vec<String>) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            scheme: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_request_fills_defaults() {
        let json = r#"{
            "product_name": "Редуктор",
            "product_code": "1234.00.00.000",
            "components": [
                {"position": 1, "name": "Корпус", "designation": "1234.01.00.000"}
            ]
        }"#;
        let request: DivisionSchemeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.gost_format, SheetFormat::A3);
        assert_eq!(request.orientation, Orientation::Landscape);
        assert_eq!(request.layout_type, LayoutStrategy::Tree);
        assert!(request.include_bom);
        assert!(!request.rollup_quantities);
        assert!(request.output_path.is_none());
        assert_eq!(request.components[0].quantity, 1);
    }

    #[test]
    fn request_accepts_explicit_options() {
        let json = r#"{
            "product_name": "Редуктор",
            "product_code": "1234.00.00.000",
            "components": [],
            "gost_format": "A1",
            "orientation": "portrait",
            "layout_type": "vertical",
            "include_bom": false,
            "rollup_quantities": true,
            "title_block_data": {"developer": "Иванов И.И."}
        }"#;
        let request: DivisionSchemeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.gost_format, SheetFormat::A1);
        assert_eq!(request.orientation, Orientation::Portrait);
        assert_eq!(request.layout_type, LayoutStrategy::Vertical);
        assert!(!request.include_bom);
        assert!(request.rollup_quantities);
        assert_eq!(request.title_block.developer.as_deref(), Some("Иванов И.И."));
    }

    #[test]
    fn failure_result_omits_scheme_in_json() {
        let result = SchemeResult::failure(
            vec![ValidationError::empty_components()],
            vec!["warning".to_string()],
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("scheme").is_none());
        assert_eq!(json["errors"].as_array().unwrap().len(), 1);
    }
}
