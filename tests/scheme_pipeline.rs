//! Integration tests for the full scheme assembly pipeline.
//!
//! These tests drive the assembler from raw JSON requests, the way the
//! CLI does, and verify validation, layout, BOM ordering and the result
//! document shape.

use kompas_scheme::scheme::{
    DivisionSchemeRequest, ErrorCategory, ErrorCode, SchemeAssembler, SchemeResult,
};

fn assemble(json: &str) -> SchemeResult {
    let request: DivisionSchemeRequest =
        serde_json::from_str(json).expect("request JSON should parse");
    SchemeAssembler::new().assemble(&request)
}

const REDUCER_REQUEST: &str = r#"{
    "product_name": "Редуктор цилиндрический",
    "product_code": "АБВГ.01.00.000",
    "components": [
        {"position": 1, "name": "Редуктор", "designation": "АБВГ.01.00.000"},
        {"position": 2, "name": "Корпус", "designation": "АБВГ.01.01.000", "parent_position": 1},
        {"position": 3, "name": "Крышка", "designation": "АБВГ.01.01.100", "parent_position": 2}
    ],
    "title_block_data": {
        "designation": "АБВГ.01.00.000",
        "name": "Редуктор цилиндрический",
        "developer": "Иванов И.И.",
        "organization": "ООО Прибор"
    }
}"#;

// =============================================================================
// Happy Path
// =============================================================================

#[test]
fn test_chain_request_assembles_into_scheme() {
    let result = assemble(REDUCER_REQUEST);

    assert!(result.success, "unexpected errors: {:?}", result.errors);
    assert!(result.errors.is_empty());

    let scheme = result.scheme.expect("success carries a scheme");
    assert_eq!(scheme.product_code, "АБВГ.01.00.000");
    assert_eq!(scheme.layout.nodes.len(), 3);
    assert!((scheme.sheet.width - 420.0).abs() < f64::EPSILON);
}

#[test]
fn test_bom_lists_parents_before_their_children() {
    let result = assemble(REDUCER_REQUEST);
    let scheme = result.scheme.expect("success carries a scheme");
    let bom = scheme.bom.expect("BOM requested by default");

    let positions: Vec<u32> = bom.iter().map(|row| row.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);
    let levels: Vec<u32> = bom.iter().map(|row| row.level).collect();
    assert_eq!(levels, vec![0, 1, 2]);
}

#[test]
fn test_assembly_is_idempotent() {
    let first = assemble(REDUCER_REQUEST);
    let second = assemble(REDUCER_REQUEST);
    assert_eq!(first, second);
}

#[test]
fn test_result_serialises_with_scheme_inline() {
    let result = assemble(REDUCER_REQUEST);
    let json = serde_json::to_value(&result).expect("result serialises");

    assert_eq!(json["success"], true);
    assert_eq!(json["scheme"]["product_name"], "Редуктор цилиндрический");
    assert_eq!(json["scheme"]["layout"]["strategy"], "tree");
    assert_eq!(
        json["scheme"]["layout"]["nodes"]
            .as_array()
            .map(Vec::len),
        Some(3)
    );
    assert_eq!(json["scheme"]["bom"].as_array().map(Vec::len), Some(3));
}

// =============================================================================
// Validation Accumulation
// =============================================================================

#[test]
fn test_all_defects_surface_in_one_run() {
    let json = r#"{
        "product_name": "Изделие",
        "product_code": "INVALID",
        "components": [
            {"position": 1, "name": "Узел", "designation": "АБВГ.01.00.000"},
            {"position": 2, "name": "Деталь", "designation": "плохо", "parent_position": 9}
        ]
    }"#;
    let result = assemble(json);

    assert!(!result.success);
    assert!(result.scheme.is_none());

    let codes: Vec<ErrorCode> = result.errors.iter().map(|e| e.code).collect();
    // Bad product code, bad component designation, dangling parent and the
    // two mandatory title block fields, all reported together.
    assert!(codes.contains(&ErrorCode::DesignationFormat));
    assert!(codes.contains(&ErrorCode::DanglingParent));
    assert!(codes.contains(&ErrorCode::TitleBlockField));
    assert!(result.errors.len() >= 5);

    let categories: Vec<ErrorCategory> =
        result.errors.iter().map(|e| e.category).collect();
    assert!(categories.contains(&ErrorCategory::Format));
    assert!(categories.contains(&ErrorCategory::Structural));
}

#[test]
fn test_plain_numeric_designation_is_accepted() {
    let json = r#"{
        "product_name": "Изделие",
        "product_code": "1234.00.00.000",
        "components": [
            {"position": 1, "name": "Изделие", "designation": "1234.00.00.000"}
        ],
        "title_block_data": {"designation": "1234.00.00.000", "name": "Изделие"}
    }"#;
    let result = assemble(json);
    assert!(
        !result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::DesignationFormat),
        "{:?}",
        result.errors
    );
}

#[test]
fn test_validation_errors_keep_input_order_for_components() {
    let json = r#"{
        "product_name": "Изделие",
        "product_code": "1234.00.00.000",
        "components": [
            {"position": 7, "name": "А", "designation": "x"},
            {"position": 3, "name": "Б", "designation": "y"}
        ],
        "title_block_data": {"designation": "1234.00.00.000", "name": "Изделие"}
    }"#;
    let result = assemble(json);
    let format_positions: Vec<Option<u32>> = result
        .errors
        .iter()
        .filter(|e| e.code == ErrorCode::DesignationFormat)
        .map(|e| e.position)
        .collect();
    assert_eq!(format_positions, vec![Some(7), Some(3)]);
}

// =============================================================================
// Options
// =============================================================================

#[test]
fn test_quantity_rollup_option_multiplies_down_the_tree() {
    let json = r#"{
        "product_name": "Изделие",
        "product_code": "1234.00.00.000",
        "components": [
            {"position": 1, "name": "Изделие", "designation": "1234.00.00.000"},
            {"position": 2, "name": "Блок", "designation": "1234.01.00.000", "quantity": 2, "parent_position": 1},
            {"position": 3, "name": "Винт", "designation": "1234.01.01.000", "quantity": 4, "parent_position": 2}
        ],
        "title_block_data": {"designation": "1234.00.00.000", "name": "Изделие"},
        "rollup_quantities": true
    }"#;
    let result = assemble(json);
    let bom = result.scheme.expect("scheme").bom.expect("bom");
    let quantities: Vec<u32> = bom.iter().map(|row| row.quantity).collect();
    assert_eq!(quantities, vec![1, 2, 8]);
}

#[test]
fn test_declared_quantities_kept_without_rollup() {
    let json = r#"{
        "product_name": "Изделие",
        "product_code": "1234.00.00.000",
        "components": [
            {"position": 1, "name": "Изделие", "designation": "1234.00.00.000"},
            {"position": 2, "name": "Блок", "designation": "1234.01.00.000", "quantity": 2, "parent_position": 1},
            {"position": 3, "name": "Винт", "designation": "1234.01.01.000", "quantity": 4, "parent_position": 2}
        ],
        "title_block_data": {"designation": "1234.00.00.000", "name": "Изделие"}
    }"#;
    let result = assemble(json);
    let bom = result.scheme.expect("scheme").bom.expect("bom");
    let quantities: Vec<u32> = bom.iter().map(|row| row.quantity).collect();
    assert_eq!(quantities, vec![1, 2, 4]);
}

#[test]
fn test_sheet_options_reach_the_scheme() {
    let json = r#"{
        "product_name": "Изделие",
        "product_code": "1234.00.00.000",
        "components": [
            {"position": 1, "name": "Изделие", "designation": "1234.00.00.000"}
        ],
        "title_block_data": {"designation": "1234.00.00.000", "name": "Изделие"},
        "gost_format": "A2",
        "orientation": "portrait",
        "layout_type": "horizontal"
    }"#;
    let result = assemble(json);
    let scheme = result.scheme.expect("scheme");
    assert!((scheme.sheet.width - 420.0).abs() < f64::EPSILON);
    assert!((scheme.sheet.height - 594.0).abs() < f64::EPSILON);
    let json = serde_json::to_value(&scheme).expect("scheme serialises");
    assert_eq!(json["sheet"]["format"], "A2");
    assert_eq!(json["layout"]["strategy"], "horizontal");
}
