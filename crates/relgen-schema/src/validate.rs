use crate::{err, error::ErrorTree, node::Table};
use std::collections::BTreeMap;

///
/// Validation
///
/// Staged checks over the resolved table set, run before any plan is
/// emitted. Every problem in the run is reported at once; a non-empty tree
/// rejects the whole run with no partial emission.
///

pub fn validate_tables(tables: &[Table]) -> Result<(), ErrorTree> {
    let mut errs = ErrorTree::new();

    for table in tables {
        validate_idents(table, &mut errs);
        validate_column_storage_names(table, &mut errs);
    }
    validate_table_storage_names(tables, &mut errs);

    errs.result()
}

fn validate_idents(table: &Table, errs: &mut ErrorTree) {
    if table.name.is_empty() {
        err!(errs, "entity with empty name");
    }
    for column in &table.columns {
        if column.name.is_empty() || column.storage_name.is_empty() {
            err!(errs, "entity '{}' has a column with an empty name", table.name);
        }
    }
}

// Two columns resolving to the same storage name must reject the run, never
// be silently overwritten.
fn validate_column_storage_names(table: &Table, errs: &mut ErrorTree) {
    let mut seen: BTreeMap<&str, &str> = BTreeMap::new();

    for column in &table.columns {
        if let Some(prev) = seen.insert(&column.storage_name, &column.name) {
            err!(
                errs,
                "entity '{}': columns '{prev}' and '{}' both map to storage name '{}'",
                table.name,
                column.name,
                column.storage_name
            );
        }
    }
}

fn validate_table_storage_names(tables: &[Table], errs: &mut ErrorTree) {
    let mut seen: BTreeMap<&str, &str> = BTreeMap::new();

    for table in tables {
        if let Some(prev) = seen.insert(&table.storage_name, &table.name) {
            err!(
                errs,
                "entities '{prev}' and '{}' both map to storage name '{}'",
                table.name,
                table.storage_name
            );
        }
    }
}
