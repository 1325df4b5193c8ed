//! Test fixture generators
//!
//! Raw export rows and enriched records in the shapes the loader sees.

use lineage_graph::config::IngestConfig;
use lineage_graph::features::inference::InferenceRules;
use lineage_graph::{load_records, RawLineageRow, RecordRef};

pub fn row(sa: &str, pt: &str, pc: &str, table: &str, col: &str) -> RawLineageRow {
    RawLineageRow::new(sa, pt, pc, table, col)
}

/// Load rows with the default config
pub fn records(rows: Vec<RawLineageRow>) -> Vec<RecordRef> {
    load_records(rows, &IngestConfig::default(), InferenceRules::builtin()).records
}

/// Three "Customer" columns over two physical tables, one of them
/// warehouse-generated
pub fn fixture_customer_rows() -> Vec<RawLineageRow> {
    vec![
        row("Customers", "Customer", "Customer Name", "DW_NS_CUSTOMER_D", "NAME"),
        row("Customers", "Customer", "Email", "DW_NS_CUSTOMER_D", "EMAIL"),
        row("Customers", "Customer", "Created Day", "DW_NS_DAY_D", "DAY_NAME"),
    ]
}

/// A sales star: one matching fact, one line-level fact, `dimensions`
/// dimension tables, plus noise rows that must be filtered or excluded
pub fn fixture_sales_star(dimensions: usize) -> Vec<RawLineageRow> {
    let mut rows = vec![
        row("Sales Orders", "Orders", "Amount", "DW_NS_SALES_ORDER_F", "AMOUNT"),
        row("Sales Orders", "Order Lines", "Quantity", "DW_NS_SALES_ORDER_LINES_F", "QUANTITY"),
        row("Sales Orders", "Orders", "Staged", "DW_NS_SALES_ORDER_STG", "ID"),
        row("Sales Orders", "Orders", "Raw", "SELECT ID FROM X", "ID"),
    ];
    for i in 0..dimensions {
        rows.push(row(
            "Sales Orders",
            "Orders",
            &format!("Attribute {}", i),
            &format!("DW_NS_ATTR{:02}_D", i),
            "NAME",
        ));
    }
    rows
}

/// Presentation tables × columns spread over a few physical tables
pub fn fixture_wide(subject_areas: usize, tables: usize, columns: usize) -> Vec<RawLineageRow> {
    let mut rows = Vec::with_capacity(subject_areas * tables * columns);
    for s in 0..subject_areas {
        for t in 0..tables {
            for c in 0..columns {
                let physical = match c % 3 {
                    0 => format!("DW_NS_ENTITY{}_F", t),
                    1 => format!("DW_NS_ENTITY{}_D", t),
                    _ => "DW_NS_DAY_D".to_string(),
                };
                rows.push(row(
                    &format!("Area {}", s),
                    &format!("Table {}", t),
                    &format!("Column {}", c),
                    &physical,
                    &format!("FIELD_{}_VALUE", c),
                ));
            }
        }
    }
    rows
}
