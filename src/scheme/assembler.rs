//! End-to-end scheme assembly.
//!
//! The assembler runs the whole pipeline for one request: designation and
//! title block checks, hierarchy construction, layout, BOM generation.
//! Every stage accumulates into one error list instead of failing fast,
//! so a caller sees all defects of the input at once. The scheme is
//! attached to the result only when the error list ends up empty.

use tracing::{debug, info, warn};

use crate::gost::designation;
use crate::gost::sheet::{Margins, Sheet};
use crate::layout::{LayoutEngine, LayoutMetrics};
use crate::scheme::bom::{BomGenerator, QuantityRollup};
use crate::scheme::hierarchy::HierarchyBuilder;
use crate::scheme::request::{DivisionScheme, DivisionSchemeRequest, SchemeResult};
use crate::scheme::validation::ValidationError;

/// Assembles validated division schemes from flat component requests.
#[derive(Debug)]
pub struct SchemeAssembler {
    metrics: LayoutMetrics,
    margins: Margins,
}

impl Default for SchemeAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemeAssembler {
    /// Creates an assembler with the standard metrics and margins.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metrics: LayoutMetrics::default(),
            margins: Margins::default(),
        }
    }

    /// Creates an assembler with configured metrics and margins.
    #[must_use]
    pub const fn with_layout(metrics: LayoutMetrics, margins: Margins) -> Self {
        Self { metrics, margins }
    }

    /// Runs the full pipeline for one request.
    ///
    /// Never returns an `Err`: all input defects are reported inside the
    /// [`SchemeResult`] so the caller can present them together.
    #[must_use]
    pub fn assemble(&self, request: &DivisionSchemeRequest) -> SchemeResult {
        info!(
            product = %request.product_code,
            components = request.components.len(),
            strategy = %request.layout_type,
            "assembling division scheme"
        );

        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if request.components.is_empty() {
            errors.push(ValidationError::empty_components());
        }
        if request.product_name.trim().is_empty() {
            warnings.push("product name is empty".to_string());
        }
        if let Err(reason) = designation::check(&request.product_code) {
            errors.push(ValidationError::product_code_format(
                &request.product_code,
                &reason,
            ));
        }

        check_title_block(request, &mut errors, &mut warnings);
        check_components(request, &mut errors, &mut warnings);

        let tree = match HierarchyBuilder::new().build(&request.components) {
            Ok(tree) => Some(tree),
            Err(build_errors) => {
                errors.extend(build_errors);
                None
            }
        };

        let sheet = Sheet::with_margins(request.gost_format, request.orientation, self.margins);

        let mut layout = None;
        if let Some(tree) = &tree {
            if tree.roots().len() > 1 {
                warnings.push(format!(
                    "{} top-level components form a forest; their subtrees are drawn side by side",
                    tree.roots().len()
                ));
            }
            match LayoutEngine::new(self.metrics).compute(tree, &sheet, request.layout_type) {
                Ok(computed) => layout = Some(computed),
                Err(layout_errors) => errors.extend(layout_errors),
            }
        }

        if errors.is_empty() {
            if let (Some(tree), Some(layout)) = (tree, layout) {
                let bom = request.include_bom.then(|| {
                    let rollup = if request.rollup_quantities {
                        QuantityRollup::Multiplied
                    } else {
                        QuantityRollup::Declared
                    };
                    BomGenerator::new(rollup).generate(&tree)
                });
                debug!(
                    nodes = layout.nodes.len(),
                    bom_rows = bom.as_ref().map_or(0, Vec::len),
                    "scheme assembled"
                );
                let scheme = DivisionScheme {
                    product_code: request.product_code.clone(),
                    product_name: request.product_name.clone(),
                    sheet,
                    title_block: request.title_block.clone(),
                    layout,
                    bom,
                };
                return SchemeResult::success(scheme, warnings);
            }
        }

        warn!(
            errors = errors.len(),
            warnings = warnings.len(),
            "scheme request failed validation"
        );
        SchemeResult::failure(errors, warnings)
    }
}

/// Title block rules per GOST 2.104: designation and name are mandatory,
/// developer and organisation are only advisable.
fn check_title_block(
    request: &DivisionSchemeRequest,
    errors: &mut Vec<ValidationError>,
    warnings: &mut Vec<String>,
) {
    let title_block = &request.title_block;
    match &title_block.designation {
        Some(code) => {
            if let Err(reason) = designation::check(code) {
                errors.push(ValidationError::title_block_designation_format(code, &reason));
            }
        }
        None => errors.push(ValidationError::title_block_missing("designation")),
    }
    if title_block.name.is_none() {
        errors.push(ValidationError::title_block_missing("name"));
    }
    if title_block.developer.is_none() {
        warnings.push("title block has no developer".to_string());
    }
    if title_block.organization.is_none() {
        warnings.push("title block has no organisation".to_string());
    }
}

fn check_components(
    request: &DivisionSchemeRequest,
    errors: &mut Vec<ValidationError>,
    warnings: &mut Vec<String>,
) {
    for component in &request.components {
        if let Err(reason) = designation::check(&component.designation) {
            errors.push(ValidationError::designation_format(
                component.position,
                &component.designation,
                &reason,
            ));
        }
        if component.name.trim().is_empty() {
            warnings.push(format!("component {}: name is empty", component.position));
        }
    }
}
