//! Naming-convention inference: classification, record types, field names

use lineage_graph::config::{InferenceConfig, SuffixRule};
use lineage_graph::features::inference::{to_lower_camel, InferenceRules};
use lineage_graph::{
    classify_physical_table, infer_field_name, infer_record_type, inferred_source, is_generated,
    TableCategory,
};
use proptest::prelude::*;

// ═══════════════════════════════════════════════════════════════════════════
// Classification
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_suffix_precedence() {
    let cases = [
        ("DW_NS_ACCOUNT_CF_DH", TableCategory::Hierarchy),
        ("DW_NS_ACCOUNT_DH", TableCategory::Hierarchy),
        ("DW_NS_ACCOUNT_CF_D", TableCategory::Calculated),
        ("DW_NS_ACCOUNT_CF_F", TableCategory::Calculated),
        ("DW_NS_ACCOUNT_CF", TableCategory::Calculated),
        ("DW_GL_BALANCE_EF", TableCategory::Enhanced),
        ("DW_NS_ITEM_PF", TableCategory::Prediction),
        ("DW_NS_ROLE_SEC", TableCategory::Security),
        ("DW_CURRENCY_G", TableCategory::Global),
        ("DW_NS_CUSTOMER_D", TableCategory::Dimension),
        ("DW_NS_SALES_F", TableCategory::Fact),
        ("DW_NS_SALES", TableCategory::Unknown),
        ("", TableCategory::Unknown),
    ];
    for (table, expected) in cases {
        assert_eq!(classify_physical_table(table), expected, "{}", table);
    }
}

#[test]
fn test_classification_is_case_and_whitespace_insensitive() {
    assert_eq!(classify_physical_table("  dw_ns_customer_d "), TableCategory::Dimension);
}

#[test]
fn test_custom_rules_override_builtin() {
    let config = InferenceConfig {
        suffix_rules: vec![SuffixRule::new("_X", TableCategory::Security)],
        ..InferenceConfig::default()
    };
    let rules = InferenceRules::new(&config).unwrap();
    assert_eq!(rules.classify("DW_NS_THING_X"), TableCategory::Security);
    assert_eq!(rules.classify("DW_NS_THING_D"), TableCategory::Unknown);
}

// ═══════════════════════════════════════════════════════════════════════════
// Record type / field name
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_documented_examples() {
    assert_eq!(infer_record_type("DW_NS_CUSTOMER_D").as_deref(), Some("customer"));
    assert_eq!(infer_field_name("ACCOUNT_NUMBER").as_deref(), Some("accountNumber"));
    assert_eq!(
        infer_record_type("DW_NS_SALES_ORDER_F").as_deref(),
        Some("salesOrder")
    );
}

#[test]
fn test_outside_convention_is_none() {
    assert_eq!(infer_record_type("DW_GL_BALANCE_EF"), None);
    assert_eq!(infer_record_type("CUSTOMER_D"), None);
    assert_eq!(infer_field_name(""), None);
    assert_eq!(infer_field_name("___"), None);
}

#[test]
fn test_generated_tables_null_the_source() {
    assert!(is_generated("DW_NS_DAY_D"));
    for column in ["DAY_NAME", "ID", "FISCAL_YEAR"] {
        let source = inferred_source("DW_NS_DAY_D", column);
        assert!(source.is_nsaw_generated());
        assert_eq!(source.record_type(), None);
        assert_eq!(source.field_name(), None);
    }
    assert!(!is_generated("DW_NS_CUSTOMER_D"));
}

#[test]
fn test_lower_camel() {
    assert_eq!(to_lower_camel("SALES_ORDER_LINE"), "salesOrderLine");
    assert_eq!(to_lower_camel("ID"), "id");
}

// ═══════════════════════════════════════════════════════════════════════════
// Properties
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    /// Total: any string gets exactly one category, and never panics
    #[test]
    fn prop_classification_total(table in ".*") {
        let category = classify_physical_table(&table);
        prop_assert!(TableCategory::ALL.contains(&category));
    }

    #[test]
    fn prop_inference_never_panics(table in ".*", column in ".*") {
        let source = inferred_source(&table, &column);
        if is_generated(&table) {
            prop_assert_eq!(source.record_type(), None);
            prop_assert_eq!(source.field_name(), None);
        }
    }

    /// Field names start lowercase and carry no separators
    #[test]
    fn prop_field_name_shape(column in "[A-Z]{1,8}(_[A-Z0-9]{1,8}){0,4}") {
        let name = infer_field_name(&column).unwrap();
        prop_assert!(!name.contains('_'));
        prop_assert!(name.chars().next().unwrap().is_lowercase());
    }

    /// Any replicated dimension yields a record type
    #[test]
    fn prop_replicated_dimension_has_record_type(token in "[A-Z]{2,10}(_[A-Z]{2,10}){0,2}") {
        let table = format!("DW_NS_{}_D", token);
        prop_assume!(!is_generated(&table) && !table.ends_with("_CF_D"));
        prop_assert!(infer_record_type(&table).is_some());
        prop_assert_eq!(classify_physical_table(&table), TableCategory::Dimension);
    }
}
